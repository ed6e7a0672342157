//! Test metadata: annotation maps, isolation configuration, and the contract
//! a test must satisfy for the engine to drive its fixtures.
//!
//! Annotations arrive as two maps — class-level and method-level — of key to
//! value list. The effective view merges them key-wise, method overriding
//! class, matching how test runners layer declarations.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Reserved annotation key listing fixture identifiers.
pub const FIXTURE_KEY: &str = "fixture";

/// Reserved annotation key selecting the isolation mode.
pub const ISOLATION_KEY: &str = "isolation";

/// Reserved annotation key declaring a dependency on another test's outcome.
pub const DEPENDS_KEY: &str = "depends";

/// `isolation` value that disables transactional isolation for a test.
pub const ISOLATION_DISABLED: &str = "disabled";

/// Which annotation view fixture resolution reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureScope {
    /// Only fixtures declared on the test method itself.
    MethodOnly,
    /// Class-level declarations overridden key-wise by method-level ones.
    Merged,
}

/// Per-test transactional-isolation mode, derived from annotations.
///
/// Never persisted across tests; it only selects between the
/// "request the coordinator" and "apply/revert immediately" paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsolationMode {
    /// No declaration: isolation is on.
    Default,
    /// Explicitly disabled: fixtures are applied and reverted directly.
    Disabled,
    /// An explicit non-"disabled" value (isolation stays on).
    Explicit(String),
}

impl IsolationMode {
    /// Whether isolation is explicitly disabled.
    pub fn is_disabled(&self) -> bool {
        matches!(self, IsolationMode::Disabled)
    }
}

/// Class-level and method-level annotation maps for one test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotations {
    /// Class-level declarations (key → values).
    #[serde(default)]
    pub class: HashMap<String, Vec<String>>,
    /// Method-level declarations (key → values); override class key-wise.
    #[serde(default)]
    pub method: HashMap<String, Vec<String>>,
}

impl Annotations {
    /// Create an empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective view: class declarations overridden key-wise by method ones.
    pub fn merged(&self) -> HashMap<String, Vec<String>> {
        let mut merged = self.class.clone();
        for (key, values) in &self.method {
            merged.insert(key.clone(), values.clone());
        }
        merged
    }

    /// Raw fixture identifiers visible in the given scope, declaration order.
    pub fn fixtures(&self, scope: FixtureScope) -> Vec<String> {
        let values = match scope {
            FixtureScope::MethodOnly => self.method.get(FIXTURE_KEY).cloned(),
            FixtureScope::Merged => self.merged().remove(FIXTURE_KEY),
        };
        values.unwrap_or_default()
    }

    /// Isolation mode for this test, from the merged view.
    pub fn isolation_mode(&self) -> IsolationMode {
        match self.merged().get(ISOLATION_KEY).and_then(|v| v.first()) {
            None => IsolationMode::Default,
            Some(value) if value == ISOLATION_DISABLED => IsolationMode::Disabled,
            Some(value) => IsolationMode::Explicit(value.clone()),
        }
    }

    /// Whether this test declares a dependency on another test's outcome.
    ///
    /// A depending chain wants this test's data to carry forward, so
    /// teardown reversion is suppressed.
    pub fn depends_on_other_test(&self) -> bool {
        self.merged()
            .get(DEPENDS_KEY)
            .is_some_and(|values| !values.is_empty())
    }
}

/// The test as seen by the fixture engine.
///
/// A test supplies its annotations and executes fixture units inside its own
/// runtime context: a callable fixture is a named zero-argument routine on
/// the test, a script fixture is a file the test feeds to whatever resource
/// it manages (typically a SQL script to its database handle).
///
/// Execution methods return `anyhow::Result`; returning a
/// [`PersistenceError`](crate::error::PersistenceError) marks a storage-layer
/// failure (the ledger stops the current batch on those).
pub trait TestInstance {
    /// Name of the test's type; part of callable-fixture identity.
    fn type_name(&self) -> &str;

    /// Annotation maps declared for this test.
    fn annotations(&self) -> &Annotations;

    /// Whether a callable fixture of this name exists on the test.
    fn has_callable(&self, name: &str) -> bool;

    /// Invoke the named callable fixture.
    fn invoke_callable(&self, name: &str) -> Result<()>;

    /// Execute a script fixture in the test's runtime context.
    fn run_script(&self, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotations(
        class: &[(&str, &[&str])],
        method: &[(&str, &[&str])],
    ) -> Annotations {
        let to_map = |entries: &[(&str, &[&str])]| {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
                .collect()
        };
        Annotations {
            class: to_map(class),
            method: to_map(method),
        }
    }

    #[test]
    fn test_method_overrides_class_key_wise() {
        let ann = annotations(
            &[("fixture", &["base.sql"]), ("isolation", &["disabled"])],
            &[("fixture", &["extra.sql"])],
        );
        let merged = ann.merged();

        // Overridden key takes the method values wholesale
        assert_eq!(merged["fixture"], vec!["extra.sql"]);
        // Untouched class key survives
        assert_eq!(merged["isolation"], vec!["disabled"]);
    }

    #[test]
    fn test_fixture_scopes() {
        let ann = annotations(&[("fixture", &["base.sql"])], &[]);
        assert_eq!(ann.fixtures(FixtureScope::Merged), vec!["base.sql"]);
        assert!(ann.fixtures(FixtureScope::MethodOnly).is_empty());
    }

    #[test]
    fn test_isolation_mode_parsing() {
        assert_eq!(
            annotations(&[], &[]).isolation_mode(),
            IsolationMode::Default
        );
        assert!(annotations(&[], &[("isolation", &["disabled"])])
            .isolation_mode()
            .is_disabled());
        assert_eq!(
            annotations(&[("isolation", &["per-class"])], &[]).isolation_mode(),
            IsolationMode::Explicit("per-class".to_string())
        );
    }

    #[test]
    fn test_depends_declaration() {
        assert!(!annotations(&[], &[]).depends_on_other_test());
        assert!(annotations(&[], &[("depends", &["test_seed"])]).depends_on_other_test());
        // An empty depends list is no declaration at all
        assert!(!annotations(&[], &[("depends", &[])]).depends_on_other_test());
    }

    #[test]
    fn test_annotations_roundtrip_as_json() {
        let ann = annotations(&[("fixture", &["base.sql"])], &[("depends", &["other"])]);
        let json = serde_json::to_string(&ann).unwrap();
        let back: Annotations = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fixtures(FixtureScope::Merged), vec!["base.sql"]);
        assert!(back.depends_on_other_test());
    }
}
