//! Printing of solver results and passport reports

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

/// Prints results as they come in, then a timing summary
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{}", answer),
            (Ok(answer), false) => println!("{}", format_result_line(result, answer)),
            (Err(e), true) => eprintln!("Error: {}", e),
            (Err(e), false) => eprintln!("{}: Error - {}", result_prefix(result), e),
        }
    }

    /// Counts and summed durations over every result; silent in quiet mode
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::of(results);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.solved, summary.failed
        );
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed)
        );
        if !elapsed.is_zero() {
            let compute = summary.parse_time + summary.solve_time;
            let compute_secs = compute.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed.as_secs_f64());
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    solved: usize,
    failed: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    fn of(results: &[SolverResult]) -> Self {
        results.iter().fold(Summary::default(), |mut acc, r| {
            if r.answer.is_ok() {
                acc.solved += 1;
                acc.parse_time += r.parse_duration.unwrap_or_default();
                acc.solve_time += r.solve_duration;
            } else {
                acc.failed += 1;
            }
            acc
        })
    }
}

fn result_prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

fn format_result_line(result: &SolverResult, answer: &str) -> String {
    let parse = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    format!(
        "{}: {} ({}solve: {})",
        result_prefix(result),
        answer,
        parse,
        format_duration(result.solve_duration)
    )
}

/// Counts for one passport batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassportReport {
    pub present: usize,
    pub valid: usize,
}

impl PassportReport {
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Required fields present: {}", self.present),
            format!("Strictly valid: {}", self.valid),
        ]
    }

    pub fn print(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };
    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }
    format_micros(micros.unsigned_abs())
}

fn format_std_duration(d: std::time::Duration) -> String {
    format_micros(u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
}

fn format_micros(micros: u64) -> String {
    match micros {
        0..1_000 => format!("{}µs", micros),
        1_000..1_000_000 => format!("{:.2}ms", micros as f64 / 1_000.0),
        _ => format!("{:.2}s", micros as f64 / 1_000_000.0),
    }
}
