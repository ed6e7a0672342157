//! Identifier → reference resolution.

use super::reference::FixtureReference;
use crate::error::FixtureError;
use crate::metadata::{FixtureScope, TestInstance};
use std::path::{Path, PathBuf};

/// Resolves raw fixture identifiers declared on a test into executable
/// [`FixtureReference`]s.
///
/// Resolution order per identifier: a callable of that name on the test wins;
/// otherwise the identifier names a script under the fixture root. Pure apart
/// from the callable-existence check and path normalization.
#[derive(Debug, Clone)]
pub struct FixtureResolver {
    /// Canonicalized fixture root; validated at construction.
    root: PathBuf,
}

impl FixtureResolver {
    /// Create a resolver for the given fixture root.
    ///
    /// # Errors
    ///
    /// Fails fast if the root cannot be canonicalized or is not a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let supplied = root.as_ref();
        let root = supplied
            .canonicalize()
            .map_err(|source| FixtureError::RootUnresolvable {
                path: supplied.to_path_buf(),
                source,
            })?;
        if !root.is_dir() {
            return Err(FixtureError::RootNotADirectory(root));
        }

        log::debug!("fixture root resolved to {}", root.display());
        Ok(Self { root })
    }

    /// The canonical fixture root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the fixtures a test declares in the given scope, in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns the configuration-class error for an identifier containing a
    /// path separator; such an error is fatal to the test.
    pub fn resolve(
        &self,
        test: &dyn TestInstance,
        scope: FixtureScope,
    ) -> Result<Vec<FixtureReference>, FixtureError> {
        test.annotations()
            .fixtures(scope)
            .into_iter()
            .map(|identifier| self.resolve_one(test, &identifier))
            .collect()
    }

    fn resolve_one(
        &self,
        test: &dyn TestInstance,
        identifier: &str,
    ) -> Result<FixtureReference, FixtureError> {
        // Identifiers are flat names; an embedded separator would make the
        // root join ambiguous across platforms.
        if identifier.contains(['/', '\\']) {
            return Err(FixtureError::ReservedSeparator(identifier.to_string()));
        }

        if test.has_callable(identifier) {
            return Ok(FixtureReference::Callable {
                owner: test.type_name().to_string(),
                name: identifier.to_string(),
            });
        }

        let joined = self.root.join(identifier);
        // Resolve symlinks when the script already exists; a missing script
        // keeps the joined path and surfaces at execution time instead.
        let path = joined.canonicalize().unwrap_or(joined);
        Ok(FixtureReference::Script { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Annotations;
    use anyhow::Result;
    use std::fs;

    struct StubTest {
        annotations: Annotations,
        callables: Vec<String>,
    }

    impl StubTest {
        fn with_fixtures(fixtures: &[&str], callables: &[&str]) -> Self {
            let mut annotations = Annotations::new();
            annotations.method.insert(
                crate::metadata::FIXTURE_KEY.to_string(),
                fixtures.iter().map(|s| s.to_string()).collect(),
            );
            Self {
                annotations,
                callables: callables.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl TestInstance for StubTest {
        fn type_name(&self) -> &str {
            "StubTest"
        }
        fn annotations(&self) -> &Annotations {
            &self.annotations
        }
        fn has_callable(&self, name: &str) -> bool {
            self.callables.iter().any(|c| c == name)
        }
        fn invoke_callable(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        fn run_script(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_callable_wins_over_script() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("seed_users"), b"-- would shadow").unwrap();

        let resolver = FixtureResolver::new(root.path()).unwrap();
        let test = StubTest::with_fixtures(&["seed_users"], &["seed_users"]);

        let refs = resolver.resolve(&test, FixtureScope::Merged).unwrap();
        assert_eq!(refs.len(), 1);
        assert!(refs[0].is_callable());
    }

    #[test]
    fn test_unknown_identifier_becomes_script_under_root() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("base.sql"), b"CREATE TABLE t(x);").unwrap();

        let resolver = FixtureResolver::new(root.path()).unwrap();
        let test = StubTest::with_fixtures(&["base.sql"], &[]);

        let refs = resolver.resolve(&test, FixtureScope::Merged).unwrap();
        match &refs[0] {
            FixtureReference::Script { path } => {
                assert_eq!(path.file_name().unwrap(), "base.sql");
                assert!(path.is_absolute());
            }
            other => panic!("expected script reference, got {other}"),
        }
    }

    #[test]
    fn test_separator_in_identifier_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let resolver = FixtureResolver::new(root.path()).unwrap();

        for bad in ["sub/dir.sql", "sub\\dir.sql", "/absolute.sql"] {
            let test = StubTest::with_fixtures(&[bad], &[]);
            let err = resolver.resolve(&test, FixtureScope::Merged).unwrap_err();
            assert!(matches!(err, FixtureError::ReservedSeparator(_)), "{bad}");
            assert!(err.is_fatal());
        }
    }

    #[test]
    fn test_missing_root_fails_fast() {
        let err = FixtureResolver::new("/definitely/not/here").unwrap_err();
        assert!(matches!(err, FixtureError::RootUnresolvable { .. }));
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let root = tempfile::tempdir().unwrap();
        let resolver = FixtureResolver::new(root.path()).unwrap();
        let test = StubTest::with_fixtures(&["b.sql", "a.sql", "c.sql"], &[]);

        let refs = resolver.resolve(&test, FixtureScope::Merged).unwrap();
        let names: Vec<_> = refs
            .iter()
            .map(|r| match r {
                FixtureReference::Script { path } => {
                    path.file_name().unwrap().to_string_lossy().into_owned()
                }
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(names, vec!["b.sql", "a.sql", "c.sql"]);
    }
}
