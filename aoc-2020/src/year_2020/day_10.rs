//! Day 10: Adapter Array
//!
//! The chain runs from the outlet (0 jolts) through every adapter in order to
//! the device, rated 3 above the largest adapter. Each step may rise by 1-3.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;
use itertools::Itertools;

const MAX_STEP: u64 = 3;

/// Outlet, sorted adapters and device joltages.
///
/// Adapters are read as `u32` and widened so the device rating always fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    joltages: Vec<u64>,
}

impl Chain {
    pub fn new(mut adapters: Vec<u32>) -> Self {
        adapters.sort_unstable();
        let device = adapters.last().copied().map_or(0, u64::from) + MAX_STEP;
        let joltages = std::iter::once(0)
            .chain(adapters.into_iter().map(u64::from))
            .chain(std::iter::once(device))
            .collect();
        Self { joltages }
    }

    pub fn joltages(&self) -> &[u64] {
        &self.joltages
    }

    /// How many steps of each size (index 1..=3) the full chain uses
    pub fn step_counts(&self) -> Result<[usize; 4], SolveError> {
        let mut counts = [0usize; 4];
        for (low, high) in self.joltages.iter().tuple_windows() {
            let step = high - low;
            if !(1..=MAX_STEP).contains(&step) {
                return Err(SolveError::failed(anyhow!(
                    "cannot step from {} to {} jolts",
                    low,
                    high
                )));
            }
            counts[step as usize] += 1;
        }
        Ok(counts)
    }

    /// Distinct adapter subsets that still connect outlet to device.
    ///
    /// Fails when the count does not fit in a `u64`.
    pub fn arrangements(&self) -> Result<u64, SolveError> {
        let mut ways = vec![0u64; self.joltages.len()];
        if let Some(first) = ways.first_mut() {
            *first = 1;
        }
        for i in 1..self.joltages.len() {
            let current = self.joltages[i];
            ways[i] = (0..i)
                .rev()
                .take_while(|&j| current - self.joltages[j] <= MAX_STEP)
                .try_fold(0u64, |acc, j| acc.checked_add(ways[j]))
                .ok_or_else(|| {
                    SolveError::failed(anyhow!(
                        "arrangements up to {} jolts overflow u64",
                        current
                    ))
                })?;
        }
        Ok(ways.last().copied().unwrap_or(0))
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 10, tags = ["dynamic-programming"])]
pub struct AdapterArray;

impl AocParser for AdapterArray {
    type SharedData<'a> = Chain;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let adapters = input
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u32>()
                    .map_err(|e| ParseError::InvalidFormat(format!("`{}`: {}", token, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Chain::new(adapters))
    }
}

impl PartSolver<1> for AdapterArray {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let counts = shared.step_counts()?;
        Ok((counts[1] * counts[3]).to_string())
    }
}

impl PartSolver<2> for AdapterArray {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.step_counts()?;
        Ok(shared.arrangements()?.to_string())
    }
}
