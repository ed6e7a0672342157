//! FixtureLifecycleBuilder - fluent API for configuring the lifecycle manager

use super::manager::FixtureLifecycleManager;
use crate::coordinator::{NullCoordinator, TransactionCoordinator};
use crate::error::FixtureError;
use crate::fixtures::FixtureResolver;
use std::path::{Path, PathBuf};

/// Builder for [`FixtureLifecycleManager`] instances.
///
/// # Example
///
/// ```rust,ignore
/// let manager = FixtureLifecycleManager::builder()
///     .with_fixture_root("tests/fixtures")
///     .with_coordinator(Box::new(db_coordinator))
///     .build()?;
/// ```
#[derive(Default)]
pub struct FixtureLifecycleBuilder {
    /// Fixture root; required.
    fixture_root: Option<PathBuf>,

    /// Transaction coordinator; defaults to [`NullCoordinator`] for suites
    /// that disable isolation everywhere.
    coordinator: Option<Box<dyn TransactionCoordinator>>,
}

impl FixtureLifecycleBuilder {
    /// Create a builder with no configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixture root directory (required).
    pub fn with_fixture_root(mut self, root: impl AsRef<Path>) -> Self {
        self.fixture_root = Some(root.as_ref().to_path_buf());
        self
    }

    /// Set the transaction coordinator.
    ///
    /// If not set, a [`NullCoordinator`] is used; only suites that disable
    /// isolation for every test should rely on that.
    pub fn with_coordinator(mut self, coordinator: Box<dyn TransactionCoordinator>) -> Self {
        self.coordinator = Some(coordinator);
        self
    }

    /// Build the manager.
    ///
    /// # Errors
    ///
    /// Fails if no fixture root was supplied, or if the root does not exist
    /// or cannot be resolved.
    pub fn build(self) -> Result<FixtureLifecycleManager, FixtureError> {
        let root = self.fixture_root.ok_or(FixtureError::RootNotConfigured)?;
        let resolver = FixtureResolver::new(root)?;
        let coordinator = self
            .coordinator
            .unwrap_or_else(|| Box::new(NullCoordinator));
        Ok(FixtureLifecycleManager::new(resolver, coordinator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_fixture_root() {
        let err = FixtureLifecycleBuilder::new().build().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_build_validates_the_root() {
        let err = FixtureLifecycleBuilder::new()
            .with_fixture_root("/no/such/fixture/root")
            .build()
            .unwrap_err();
        assert!(matches!(err, FixtureError::RootUnresolvable { .. }));
    }

    #[test]
    fn test_build_defaults_to_null_coordinator() {
        let root = tempfile::tempdir().unwrap();
        let manager = FixtureLifecycleBuilder::new()
            .with_fixture_root(root.path())
            .build()
            .unwrap();
        assert!(manager.ledger().is_empty());
    }
}
