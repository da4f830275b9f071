//! Drill error types.
//!
//! These are contract errors raised by the formula bank, the loader and the
//! drill engine. Invalid answers typed at a prompt are not errors: the engine
//! re-prompts for those and never surfaces them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a formula bank or running a drill.
#[derive(Debug, Error)]
pub enum DrillError {
    /// A blank topic, formula name, or answer was passed to the bank.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The formula source could not be opened or read.
    #[error("formula source unavailable: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A topic was requested that the bank does not contain.
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// The console failed to read or write a line.
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl DrillError {
    /// Returns `true` if the caller can carry on with whatever was loaded.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DrillError::SourceUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_unavailable_is_recoverable() {
        let err = DrillError::SourceUnavailable {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn contract_errors_are_not_recoverable() {
        assert!(!DrillError::InvalidArgument("empty name".into()).is_recoverable());
        assert!(!DrillError::UnknownTopic("Physics".into()).is_recoverable());
    }
}
