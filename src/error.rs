//! Error handling for the grading oracle.
//!
//! Only conditions that stop the engine itself are errors. A callable that
//! fails while being graded is not an error: it becomes a
//! [`Failure`](crate::value::Failure) value and is compared like any other
//! result.
//!
//! # Taxonomy
//!
//! - ImportFailure: the submission could not be resolved, fatal for the batch
//! - MalformedRecord: the golden record file does not follow the line format
//! - Io: reading or persisting the golden record failed
//! - UnknownProblem / Config: the caller asked for something that is not there

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the oracle engine.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The submission under test could not be loaded.
    #[error("unable to import {submission}: {reason}")]
    ImportFailure {
        /// Name of the submission that was requested.
        submission: String,
        /// Why it could not be loaded.
        reason: String,
    },

    /// The golden record file is not in the expected format.
    #[error("malformed record file at line {line}: {reason}")]
    MalformedRecord {
        /// One-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Underlying I/O failure while touching the golden record.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// The original error.
        #[source]
        source: std::io::Error,
    },

    /// A problem name that is not in the registration table.
    #[error("unknown problem '{0}'")]
    UnknownProblem(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl OracleError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short stable name of the error kind, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImportFailure { .. } => "ImportFailure",
            Self::MalformedRecord { .. } => "MalformedRecord",
            Self::Io { .. } => "Io",
            Self::UnknownProblem(_) => "UnknownProblem",
            Self::Config(_) => "Config",
        }
    }
}

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OracleError::MalformedRecord {
            line: 1,
            reason: "data line before header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record file at line 1: data line before header"
        );
        assert_eq!(err.name(), "MalformedRecord");
    }

    #[test]
    fn test_import_failure_display() {
        let err = OracleError::ImportFailure {
            submission: "labs".to_string(),
            reason: "no such submission".to_string(),
        };
        assert!(err.to_string().contains("unable to import labs"));
    }
}
