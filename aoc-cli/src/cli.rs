//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code 2020 solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code 2020 solvers", version)]
pub struct Args {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run registered solvers against puzzle inputs on disk
    Run(RunArgs),
    /// Count valid passports in a batch file and optionally export them
    Passports(PassportArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}/day{DD}.txt` inputs
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(clap::Args, Debug)]
pub struct PassportArgs {
    /// Batch file with blank-line separated passports
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the strictly valid passports to this CSV file
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let args = Args::try_parse_from(["aoc", "run"]).unwrap();
        let Command::Run(run) = args.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.verbose, 0);
        assert_eq!(run.input_dir, PathBuf::from("inputs"));
        assert_eq!(run.parallelize_by, ParallelizeBy::Day);
        assert!(run.tags.is_empty());
        assert!(!run.quiet);
    }

    #[test]
    fn test_run_filters() {
        let args = Args::try_parse_from([
            "aoc", "-vv", "run", "--year", "2020", "-d", "4", "-p", "2", "-t", "parsing,validation",
            "--parallelize-by", "part",
        ])
        .unwrap();
        let Command::Run(run) = args.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.verbose, 2);
        assert_eq!(run.year, Some(2020));
        assert_eq!(run.day, Some(4));
        assert_eq!(run.part, Some(2));
        assert_eq!(run.tags, ["parsing", "validation"]);
        assert_eq!(run.parallelize_by, ParallelizeBy::Part);
    }

    #[test]
    fn test_day_and_part_bounds() {
        assert!(Args::try_parse_from(["aoc", "run", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "run", "-p", "3"]).is_err());
    }

    #[test]
    fn test_passports() {
        let args = Args::try_parse_from([
            "aoc", "passports", "-i", "day04.txt", "--export", "valid.csv", "-v",
        ])
        .unwrap();
        let Command::Passports(passports) = args.command else {
            panic!("expected passports subcommand");
        };
        assert_eq!(args.verbose, 1);
        assert_eq!(passports.input, PathBuf::from("day04.txt"));
        assert_eq!(passports.export, Some(PathBuf::from("valid.csv")));
    }

    #[test]
    fn test_passports_requires_input() {
        assert!(Args::try_parse_from(["aoc", "passports"]).is_err());
    }
}
