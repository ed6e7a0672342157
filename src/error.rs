//! Error types for the fixture engine.
//!
//! Three classes with distinct propagation policies:
//! - configuration errors (bad fixture root, malformed identifier) are fatal
//!   to the test and cross the engine boundary as `Err`;
//! - execution errors (a single fixture or rollback unit fails) are caught at
//!   the unit, reported via `log::warn!`, and the batch continues;
//! - persistence errors (the storage layer fails mid-batch) are caught at the
//!   batch level, reported, and the suite continues with the next test.

use std::io::Error as IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for fixture resolution and lifecycle operations.
///
/// Only the configuration variants are ever returned from the lifecycle
/// manager; the execution and persistence variants exist for classification
/// and diagnostics of contained failures.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// No fixture root was supplied at construction.
    #[error("no fixture root configured")]
    RootNotConfigured,

    /// Fixture root does not exist or is not a directory.
    #[error("fixture root is not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),

    /// Fixture root could not be resolved to a canonical path.
    #[error("fixture root {} cannot be resolved: {source}", .path.display())]
    RootUnresolvable {
        /// The configured root as supplied.
        path: PathBuf,
        /// Underlying I/O error from canonicalization.
        source: IoError,
    },

    /// Fixture identifier contains a reserved path-separator character.
    ///
    /// Identifiers are flat names joined onto the fixture root; embedded
    /// separators would make the join ambiguous across platforms.
    #[error("fixture identifier `{0}` contains a reserved path separator")]
    ReservedSeparator(String),

    /// A single fixture or rollback unit failed while executing.
    #[error("fixture `{fixture}` failed: {source}")]
    Execution {
        /// Display form of the fixture reference that failed.
        fixture: String,
        /// The failure raised by the test's runtime context.
        source: anyhow::Error,
    },

    /// The storage layer failed while a fixture batch was being applied.
    #[error("storage failure while applying fixtures: {0}")]
    Persistence(String),
}

impl FixtureError {
    /// Whether this error is fatal to the test (configuration class).
    ///
    /// Execution and persistence failures are contained and reported; only
    /// configuration errors abort the test they belong to.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FixtureError::RootNotConfigured
                | FixtureError::RootNotADirectory(_)
                | FixtureError::RootUnresolvable { .. }
                | FixtureError::ReservedSeparator(_)
        )
    }
}

/// Marker error a [`TestInstance`](crate::metadata::TestInstance) returns to
/// flag a storage-layer failure (e.g. a database driver error) rather than a
/// failure of the fixture unit itself.
///
/// The ledger stops the current batch when it sees one of these; a plain
/// execution failure only skips the failing unit.
#[derive(Error, Debug)]
#[error("storage failure: {0}")]
pub struct PersistenceError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_fatal() {
        assert!(FixtureError::RootNotADirectory(PathBuf::from("/nope")).is_fatal());
        assert!(FixtureError::ReservedSeparator("a/b".to_string()).is_fatal());
    }

    #[test]
    fn test_contained_errors_are_not_fatal() {
        let exec = FixtureError::Execution {
            fixture: "seed_users".to_string(),
            source: anyhow::anyhow!("boom"),
        };
        assert!(!exec.is_fatal());
        assert!(!FixtureError::Persistence("driver gone".to_string()).is_fatal());
    }

    #[test]
    fn test_persistence_marker_is_downcastable() {
        let err: anyhow::Error = PersistenceError("connection lost".to_string()).into();
        assert!(err.downcast_ref::<PersistenceError>().is_some());
    }
}
