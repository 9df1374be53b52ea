//! Shared data between parts and borrowed shared data

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, RegisterableSolver, SolveError,
    SolverInstance, SolverRegistryBuilder,
};

#[derive(Debug)]
struct SeatMap {
    ids: Vec<u32>,
    sorted: Option<Vec<u32>>,
}

/// Part 1 sorts and caches, part 2 reuses the cache if present
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Seats;

impl AocParser for Seats {
    type SharedData<'a> = SeatMap;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let ids = input
            .split_whitespace()
            .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
            .collect::<Result<_, _>>()?;
        Ok(SeatMap { ids, sorted: None })
    }
}

fn sorted(shared: &mut SeatMap) -> &[u32] {
    shared.sorted.get_or_insert_with(|| {
        let mut ids = shared.ids.clone();
        ids.sort_unstable();
        ids
    })
}

impl PartSolver<1> for Seats {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sorted(shared).last().copied().unwrap_or_default().to_string())
    }
}

impl PartSolver<2> for Seats {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sorted(shared).first().copied().unwrap_or_default().to_string())
    }
}

/// Zero-copy solver over the raw input
#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct LineCount;

impl AocParser for LineCount {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.lines().collect())
    }
}

impl PartSolver<1> for LineCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

#[test]
fn test_part_one_caches_for_part_two() {
    let mut instance = SolverInstance::<Seats>::new(2020, 5, "7 3 9").unwrap();
    assert!(instance.shared().sorted.is_none());

    assert_eq!(instance.solve(1).unwrap().answer, "9");
    assert_eq!(instance.shared().sorted.as_deref(), Some(&[3, 7, 9][..]));
    assert_eq!(instance.solve(2).unwrap().answer, "3");
}

#[test]
fn test_part_two_runs_alone() {
    let mut instance = SolverInstance::<Seats>::new(2020, 5, "7 3 9").unwrap();
    assert_eq!(instance.solve(2).unwrap().answer, "3");
}

#[test]
fn test_timing_is_recorded() {
    let mut instance = SolverInstance::<Seats>::new(2020, 5, "1 2").unwrap();
    let span = instance.parse_span();
    assert!(span.end >= span.start);
    assert_eq!(instance.parse_duration(), span.duration());

    let result = instance.solve(1).unwrap();
    assert!(result.span.end >= result.span.start);
    assert!(result.duration() >= chrono::TimeDelta::zero());
}

#[test]
fn test_borrowed_shared_data_through_registry() {
    let registry = LineCount
        .register_with(SolverRegistryBuilder::new(), 2020, 2)
        .unwrap()
        .build();

    let input = String::from("a\nb\nc");
    let mut solver = registry.create_solver(2020, 2, &input).unwrap();
    assert_eq!(solver.parts(), 1);
    assert_eq!(solver.solve(1).unwrap().answer, "3");
    assert!(matches!(solver.solve(2), Err(SolveError::PartOutOfRange(2))));
}
