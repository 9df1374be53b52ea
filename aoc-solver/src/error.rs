//! Errors raised while registering, parsing and solving

use std::fmt::Display;
use thiserror::Error;

/// Input that a solver could not turn into its shared data
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("invalid input: {0}")]
    InvalidFormat(String),
    /// The input, or something it must contain, is absent
    #[error("missing input: {0}")]
    MissingData(String),
    #[error("cannot parse input: {0}")]
    Other(String),
}

impl ParseError {
    /// `InvalidFormat` carrying the display text of `err`
    pub fn invalid(err: impl Display) -> Self {
        ParseError::InvalidFormat(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver has no implementation for this part
    #[error("part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Part 0, or a part above the solver's part count
    #[error("part {0} is out of range")]
    PartOutOfRange(u8),
    #[error("solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap any error (including `anyhow::Error`) as a failed solve
    pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        SolveError::SolveFailed(err.into())
    }
}

/// Failure to produce an answer for a year/day/part
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no solver registered for {0}/day{1:02}")]
    NotFound(u16, u8),
    #[error("{0}/day{1:02} is outside the supported range")]
    InvalidYearDay(u16, u8),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    SolveError(#[from] SolveError),
}

#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// Two solvers claim the same year/day slot
    #[error("duplicate solver for {0}/day{1:02}")]
    DuplicateSolver(u16, u8),
    #[error("cannot register a solver for {0}/day{1:02}: out of range")]
    InvalidYearDay(u16, u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SolverError::NotFound(2020, 4).to_string(),
            "no solver registered for 2020/day04"
        );
        assert_eq!(
            SolverError::from(ParseError::invalid("bad token")).to_string(),
            "invalid input: bad token"
        );
        assert_eq!(
            RegistrationError::DuplicateSolver(2020, 9).to_string(),
            "duplicate solver for 2020/day09"
        );
    }

    #[test]
    fn test_failed_keeps_source() {
        let err = SolveError::failed("no seat");
        assert_eq!(err.to_string(), "solve failed: no seat");
        assert!(std::error::Error::source(&err).is_some());
    }
}
