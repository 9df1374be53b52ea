//! Day 9: Encoding Error

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;
use itertools::Itertools;

/// Number of preceding values each number is checked against
pub const PREAMBLE: usize = 25;

#[derive(Debug)]
pub struct Xmas {
    numbers: Vec<u64>,
    preamble: usize,
    invalid: Option<u64>,
}

impl Xmas {
    pub fn new(numbers: Vec<u64>, preamble: usize) -> Self {
        Self {
            numbers,
            preamble,
            invalid: None,
        }
    }

    /// Part 1 result, computed once and reused by part 2
    fn invalid(&mut self) -> Result<u64, SolveError> {
        if let Some(value) = self.invalid {
            return Ok(value);
        }
        let value = first_invalid(&self.numbers, self.preamble).ok_or_else(|| {
            SolveError::failed(anyhow!(
                "every number is a sum of two of the previous {}",
                self.preamble
            ))
        })?;
        self.invalid = Some(value);
        Ok(value)
    }
}

/// Whether two values at different positions of `window` add up to `target`
fn is_pair_sum(window: &[u64], target: u64) -> bool {
    window
        .iter()
        .tuple_combinations()
        .any(|(a, b)| a.checked_add(*b) == Some(target))
}

/// First number after the preamble that is not a sum of two of the `preamble` values before it
pub fn first_invalid(numbers: &[u64], preamble: usize) -> Option<u64> {
    numbers.windows(preamble + 1).find_map(|window| {
        let (previous, current) = window.split_at(preamble);
        let target = current[0];
        (!is_pair_sum(previous, target)).then_some(target)
    })
}

/// Contiguous run of at least two numbers adding up to `target`
pub fn contiguous_sum(numbers: &[u64], target: u64) -> Option<&[u64]> {
    let target = u128::from(target);
    let mut start = 0;
    // u128 cannot overflow on a sum of u64 values from a slice
    let mut sum = 0u128;
    for end in 0..numbers.len() {
        sum += u128::from(numbers[end]);
        while sum > target && start < end {
            sum -= u128::from(numbers[start]);
            start += 1;
        }
        if sum == target && end > start {
            return Some(&numbers[start..=end]);
        }
    }
    None
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 9, tags = ["sliding-window"])]
pub struct EncodingError;

impl AocParser for EncodingError {
    type SharedData<'a> = Xmas;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(idx, line)| {
                line.parse::<u64>()
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Xmas::new(numbers, PREAMBLE))
    }
}

impl PartSolver<1> for EncodingError {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.invalid()?.to_string())
    }
}

impl PartSolver<2> for EncodingError {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let target = shared.invalid()?;
        let run = contiguous_sum(&shared.numbers, target).ok_or_else(|| {
            SolveError::failed(anyhow!("no contiguous run sums to {}", target))
        })?;
        let (min, max) = run
            .iter()
            .minmax()
            .into_option()
            .ok_or_else(|| SolveError::failed(anyhow!("empty run")))?;
        Ok((min + max).to_string())
    }
}
