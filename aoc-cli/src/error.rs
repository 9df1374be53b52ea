//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Passport batch could not be parsed
    #[error("Passport error: {0}")]
    Passport(#[from] aoc_2020::year_2020::day_4::PassportError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Export file could not be written
    #[error("Export to {} failed: {source}", .path.display())]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Logger installation failed
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Result channel closed before all results were sent
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Worker thread panicked
    #[error("Executor thread panicked")]
    Panicked,

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested ones
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = first.flatten();
        errors.extend(second.flatten());
        ExecutorError::Multiple(errors).into()
    }

    fn flatten(self) -> Vec<ArcExecutorError> {
        if let ExecutorError::Multiple(errors) = self.inner() {
            return errors.clone();
        }
        vec![self]
    }
}

/// Errors reading puzzle or batch input files
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_singles() {
        let combined = ArcExecutorError::combine(
            ExecutorError::ChannelSend.into(),
            ExecutorError::ThreadPool("boom".into()).into(),
        );
        assert_eq!(len(&combined), 2);
        assert_eq!(combined.to_string(), "Multiple errors occurred (2 total)");
    }

    #[test]
    fn test_combine_flattens_nested() {
        let pair = ArcExecutorError::combine(
            ExecutorError::ChannelSend.into(),
            ExecutorError::Panicked.into(),
        );
        let other = ArcExecutorError::combine(
            ExecutorError::ChannelSend.into(),
            ExecutorError::ChannelSend.into(),
        );
        assert_eq!(len(&ArcExecutorError::combine(pair.clone(), other)), 4);
        assert_eq!(
            len(&ArcExecutorError::combine(ExecutorError::Panicked.into(), pair)),
            3
        );
    }
}
