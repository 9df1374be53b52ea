//! Day 5: Binary Boarding
//!
//! A boarding pass is ten binary digits written as letters: seven `F`/`B` for
//! the row, three `L`/`R` for the column.

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;
use itertools::Itertools;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatError {
    #[error("boarding pass `{0}` must be exactly 10 characters")]
    Length(String),
    #[error("boarding pass `{pass}` has unexpected `{found}` at position {position}")]
    Character {
        pass: String,
        found: char,
        position: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seat {
    pub row: u8,
    pub column: u8,
}

impl Seat {
    pub fn id(self) -> u16 {
        u16::from(self.row) * 8 + u16::from(self.column)
    }
}

impl FromStr for Seat {
    type Err = SeatError;

    fn from_str(pass: &str) -> Result<Self, Self::Err> {
        if pass.chars().count() != 10 {
            return Err(SeatError::Length(pass.to_string()));
        }

        let mut bits: u16 = 0;
        for (position, found) in pass.chars().enumerate() {
            let bit = match (position, found) {
                (0..7, 'F') | (7.., 'L') => 0,
                (0..7, 'B') | (7.., 'R') => 1,
                _ => {
                    return Err(SeatError::Character {
                        pass: pass.to_string(),
                        found,
                        position,
                    });
                }
            };
            bits = bits << 1 | bit;
        }

        Ok(Seat {
            row: (bits >> 3) as u8,
            column: (bits & 0b111) as u8,
        })
    }
}

/// The seat missing from `sorted_ids` whose neighbours are both taken
pub fn find_gap(sorted_ids: &[u16]) -> Option<u16> {
    sorted_ids
        .iter()
        .tuple_windows()
        .find(|(a, b)| **b == **a + 2)
        .map(|(a, _)| a + 1)
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 5, tags = ["parsing"])]
pub struct BinaryBoarding;

impl AocParser for BinaryBoarding {
    /// Seat ids in ascending order
    type SharedData<'a> = Vec<u16>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut ids = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(idx, line)| {
                line.parse::<Seat>()
                    .map(Seat::id)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        ids.sort_unstable();
        Ok(ids)
    }
}

impl PartSolver<1> for BinaryBoarding {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .last()
            .map(u16::to_string)
            .ok_or_else(|| SolveError::failed(anyhow!("no boarding passes")))
    }
}

impl PartSolver<2> for BinaryBoarding {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_gap(shared)
            .map(|id| id.to_string())
            .ok_or_else(|| SolveError::failed(anyhow!("no free seat between two taken seats")))
    }
}
