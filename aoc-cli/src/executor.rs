//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use log::{debug, warn};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Outcome of one year/day/part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Parse time of the instance that solved this part, if parsing succeeded
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: SolverError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// A registered solver and the parts to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Runs work items on a rayon pool at the configured granularity
pub struct Executor {
    shared: ExecutorShared,
    thread_pool: rayon::ThreadPool,
}

/// Read-only state every worker needs
struct ExecutorShared {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: ExecutorShared {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.shared.inputs
    }

    /// Registered solvers matching the year/day/part filters, in year/day order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.shared;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.shared.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Run every work item, sending one result per part to `tx`
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let shared = &self.shared;

        match shared.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .filter_map(|work| run_work_item(work, &tx, shared).err())
                .reduce(ArcExecutorError::combine)
                .map_or(Ok(()), Err),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .filter_map(|items| {
                            items
                                .iter()
                                .filter_map(|work| run_work_item(work, &tx, shared).err())
                                .reduce(ArcExecutorError::combine)
                        })
                        .reduce_with(ArcExecutorError::combine)
                        .map_or(Ok(()), Err)
                })
            }
            // Part mode differs only inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .into_par_iter()
                    .filter_map(|work| run_work_item(&work, &tx, shared).err())
                    .reduce_with(ArcExecutorError::combine)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Report `error` for every requested part of `work`
fn send_failure(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: impl Fn() -> SolverError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error()))?;
    }
    Ok(())
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &ExecutorShared,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match shared.inputs.get(year, day) {
        Ok(Some(input)) => input,
        Ok(None) => {
            let path = shared.inputs.input_path(year, day);
            warn!("no input for {}/day{:02} at {}", year, day, path.display());
            return send_failure(work, tx, || {
                SolverError::ParseError(ParseError::MissingData(format!(
                    "input file {} not found",
                    path.display()
                )))
            });
        }
        Err(e) => {
            let message = e.to_string();
            return send_failure(work, tx, || {
                SolverError::ParseError(ParseError::Other(message.clone()))
            });
        }
    };

    debug!("running {}/day{:02} parts {:?}", year, day, work.parts);
    if shared.parallelize_by == ParallelizeBy::Part {
        run_parts_parallel(work, &input, tx, &shared.registry)
    } else {
        run_parts_in_order(work, &input, tx, &shared.registry)
    }
}

/// Parse once and solve the parts one after another
fn run_parts_in_order(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let mut solver = match registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(SolverError::ParseError(e)) => {
            return send_failure(work, tx, || SolverError::ParseError(e.clone()));
        }
        Err(e) => {
            let message = e.to_string();
            return send_failure(work, tx, || {
                SolverError::ParseError(ParseError::Other(message.clone()))
            });
        }
    };

    for part in work.parts.clone() {
        send(tx, solve_part(work.year, work.day, part, &mut *solver))?;
    }
    Ok(())
}

/// Solve every part on its own instance, emitting results in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(year, day, part, &mut *solver),
            Err(e) => SolverResult::failed(year, day, part, e),
        })
        .collect();
    results.sort_by_key(|r| r.part);

    results.into_iter().try_for_each(|result| send(tx, result))
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(year, day, part, e.into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{
        AocParser, RegisterableSolver, SolveError, Solver, SolverRegistryBuilder,
    };
    use std::fs;
    use tempfile::TempDir;

    struct Echo;

    impl AocParser for Echo {
        type SharedData<'a> = &'a str;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.starts_with('!') {
                return Err(ParseError::InvalidFormat("bang".into()));
            }
            Ok(input.trim())
        }
    }

    impl Solver for Echo {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            Ok(format!("{}-{}", shared, part))
        }
    }

    fn registry() -> SolverRegistry {
        let builder = SolverRegistryBuilder::new();
        let builder = Echo.register_with(builder, 2020, 1).unwrap();
        let builder = Echo.register_with(builder, 2020, 2).unwrap();
        let builder = Echo.register_with(builder, 2021, 1).unwrap();
        builder.build()
    }

    fn config(dir: &TempDir, parallelize_by: ParallelizeBy) -> Config {
        Config {
            year_filter: None,
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input_dir: dir.path().to_path_buf(),
            thread_count: 2,
            parallelize_by,
            quiet: true,
        }
    }

    fn write_input(dir: &TempDir, year: u16, day: u8, contents: &str) {
        let store = InputStore::new(dir.path().to_path_buf());
        let path = store.input_path(year, day);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_collect_work_items_with_filters() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir, ParallelizeBy::Sequential);
        cfg.year_filter = Some(2020);
        cfg.part_filter = Some(2);
        let executor = Executor::new(registry(), &cfg).unwrap();

        let items = executor.collect_work_items();
        assert_eq!(
            items,
            vec![
                WorkItem { year: 2020, day: 1, parts: 2..=2 },
                WorkItem { year: 2020, day: 2, parts: 2..=2 },
            ]
        );
    }

    #[test]
    fn test_every_mode_produces_all_results() {
        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let dir = TempDir::new().unwrap();
            write_input(&dir, 2020, 1, "a\n");
            write_input(&dir, 2020, 2, "b\n");
            write_input(&dir, 2021, 1, "c\n");
            let executor = Executor::new(registry(), &config(&dir, mode)).unwrap();

            let answers: Vec<_> = run(&executor)
                .into_iter()
                .map(|r| r.answer.unwrap())
                .collect();
            assert_eq!(answers, ["a-1", "a-2", "b-1", "b-2", "c-1", "c-2"], "{mode:?}");
        }
    }

    #[test]
    fn test_missing_input_and_parse_failure_are_reported_per_part() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2020, 1, "!bad");
        let mut cfg = config(&dir, ParallelizeBy::Day);
        cfg.year_filter = Some(2020);
        let executor = Executor::new(registry(), &cfg).unwrap();

        let results = run(&executor);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.answer.is_err()));
        assert!(matches!(
            results[2].answer,
            Err(SolverError::ParseError(ParseError::MissingData(_)))
        ));
        assert!(matches!(
            results[0].answer,
            Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_closed_channel_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2020, 1, "a");
        let executor =
            Executor::new(registry(), &config(&dir, ParallelizeBy::Sequential)).unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        assert!(executor.execute(tx).is_err());
    }
}
