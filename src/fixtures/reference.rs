//! Resolved fixture references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A resolved, executable fixture unit.
///
/// The tagged variant carries its own equality: two callables are equal when
/// owner type and routine name match; two scripts are equal when their
/// normalized paths are identical. The ledger deduplicates on this equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixtureReference {
    /// A named zero-argument routine on the owning test's type.
    Callable {
        /// Type name of the test that owns the routine.
        owner: String,
        /// Routine name as declared.
        name: String,
    },
    /// A script file under the configured fixture root.
    Script {
        /// Absolute, normalized (symlinks resolved) path.
        path: PathBuf,
    },
}

impl FixtureReference {
    /// Whether this reference is a callable fixture.
    pub fn is_callable(&self) -> bool {
        matches!(self, FixtureReference::Callable { .. })
    }

    /// Whether this reference is a script fixture.
    pub fn is_script(&self) -> bool {
        matches!(self, FixtureReference::Script { .. })
    }
}

impl fmt::Display for FixtureReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureReference::Callable { owner, name } => write!(f, "{owner}::{name}"),
            FixtureReference::Script { path } => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callable_equality_is_owner_plus_name() {
        let a = FixtureReference::Callable {
            owner: "UserTest".to_string(),
            name: "seed_users".to_string(),
        };
        let b = FixtureReference::Callable {
            owner: "UserTest".to_string(),
            name: "seed_users".to_string(),
        };
        let other_owner = FixtureReference::Callable {
            owner: "OrderTest".to_string(),
            name: "seed_users".to_string(),
        };

        assert_eq!(a, b);
        assert_ne!(a, other_owner);
    }

    #[test]
    fn test_display_identifies_the_fixture() {
        let callable = FixtureReference::Callable {
            owner: "UserTest".to_string(),
            name: "seed_users".to_string(),
        };
        assert_eq!(callable.to_string(), "UserTest::seed_users");

        let script = FixtureReference::Script {
            path: PathBuf::from("/fixtures/base.sql"),
        };
        assert_eq!(script.to_string(), "/fixtures/base.sql");
    }
}
