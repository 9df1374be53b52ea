//! Day 4: Passport Processing
//!
//! Passports are blank-line separated blocks of `key:value` tokens. Part 1
//! counts passports carrying every required field, part 2 those whose values
//! also pass the per-field rules.

mod export;
mod passport;
mod rules;

pub use export::{ValidTable, export_valid};
pub use passport::{Field, Passport, PassportError, parse_batch};
pub use rules::{RULES, Validation, count_valid};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 4, tags = ["parsing", "validation"])]
pub struct PassportProcessing;

impl AocParser for PassportProcessing {
    type SharedData<'a> = Vec<Passport>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let batch = parse_batch(input).map_err(ParseError::invalid)?;
        debug!("parsed {} passports", batch.len());
        Ok(batch)
    }
}

impl PartSolver<1> for PassportProcessing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_valid(shared, Validation::Presence).to_string())
    }
}

impl PartSolver<2> for PassportProcessing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_valid(shared, Validation::Strict).to_string())
    }
}
