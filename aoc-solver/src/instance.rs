//! Parsed solver instances and the type-erased [`DynSolver`] interface

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Wall-clock start and end of one parse or solve step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Span {
    /// Run `step` and record when it started and finished
    pub fn measure<T>(step: impl FnOnce() -> T) -> (T, Span) {
        let start = Utc::now();
        let value = step();
        (
            value,
            Span {
                start,
                end: Utc::now(),
            },
        )
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Answer for one part together with when it was computed
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub span: Span,
}

impl SolveResult {
    /// Time spent solving
    pub fn duration(&self) -> TimeDelta {
        self.span.duration()
    }
}

/// Parsed input for one year/day, ready to solve any of its parts.
///
/// Parsing happens once in [`SolverInstance::new`]; every part then works on
/// the same shared data.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_span: Span,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (parsed, parse_span) = Span::measure(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: parsed?,
            parse_span,
        })
    }

    /// Borrow the parsed data
    pub fn shared(&self) -> &S::SharedData<'a> {
        &self.shared
    }
}

/// Object-safe view of a [`SolverInstance`], used by the registry and runners.
///
/// ```
/// use aoc_solver::DynSolver;
///
/// fn run_all(solver: &mut dyn DynSolver) -> Vec<String> {
///     (1..=solver.parts())
///         .filter_map(|part| solver.solve(part).ok())
///         .map(|result| result.answer)
///         .collect()
/// }
/// ```
pub trait DynSolver {
    /// Solve one part, timing the call
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    /// When parsing ran
    fn parse_span(&self) -> Span;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts this solver supports
    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_span().duration()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let shared = &mut self.shared;
        let (answer, span) = Span::measure(|| S::solve_part_checked_range(shared, part));
        Ok(SolveResult {
            answer: answer?,
            span,
        })
    }

    fn parse_span(&self) -> Span {
        self.parse_span
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
