//! AOC CLI - run the 2020 solvers or validate passport batches

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod logger;
mod output;
mod passports;

// Link the 2020 crate so its solver plugins are submitted
use aoc_2020 as _;

use aggregator::ResultAggregator;
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::{Args, Command, RunArgs};
use config::Config;
use error::{ArcExecutorError, CliError, ExecutorError};
use executor::{Executor, WorkItem};
use log::{debug, warn};
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let quiet = matches!(&args.command, Command::Run(run) if run.quiet);
    logger::init(logger::level_for(args.verbose, quiet))?;

    match args.command {
        Command::Run(run_args) => run_solvers(run_args),
        Command::Passports(passport_args) => {
            passports::run(&passport_args, args.verbose > 0)?.print();
            Ok(())
        }
    }
}

fn run_solvers(args: RunArgs) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    debug!("{:?}", config);

    let registry = build_registry(&config.tags)?;
    let executor =
        Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing = missing_inputs(&work_items, &executor);
    if !missing.is_empty() && !config.quiet {
        println!("Missing {} input file(s):", missing.len());
        for (year, day) in &missing {
            println!(
                "  - {}",
                executor.inputs().input_path(*year, *day).display()
            );
        }
    }

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }
    run_executor(executor, &work_items, config.quiet)
}

fn missing_inputs(work_items: &[WorkItem], executor: &Executor) -> Vec<(u16, u8)> {
    work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .map(|w| (w.year, w.day))
        .collect()
}

/// Stream results in order while the executor runs on its own thread
fn run_executor(executor: Executor, work_items: &[WorkItem], quiet: bool) -> Result<(), CliError> {
    let (tx, rx) = std::sync::mpsc::channel();
    let handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::new(aggregator::expected_keys(work_items));
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    if !aggregator.is_complete() {
        for key in aggregator.missing() {
            warn!("no result for {}/{:02} part {}", key.year, key.day, key.part);
        }
    }
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    handle
        .join()
        .map_err(|_| ArcExecutorError::from(ExecutorError::Panicked))??;

    formatter.print_summary(&results);
    Ok(())
}

/// Registry of every linked plugin carrying all of `tags`
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
