//! Reversal-counterpart discovery.

use super::reference::FixtureReference;
use crate::metadata::TestInstance;

/// Suffix marking a rollback counterpart: `seed_users` reverts via
/// `seed_users_rollback`, `base.sql` via `base_rollback.sql`.
pub const ROLLBACK_SUFFIX: &str = "_rollback";

/// Derives the reversal counterpart of an applied fixture reference.
///
/// A counterpart is only ever returned if its target exists — a callable the
/// test actually exposes, or a file actually on disk. Fixtures without one
/// are skipped silently during revert; when isolation is on, the transaction
/// rollback already undid their effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollbackResolver;

impl RollbackResolver {
    /// Create a rollback resolver.
    pub fn new() -> Self {
        Self
    }

    /// The rollback counterpart of `reference`, if its target exists.
    pub fn rollback_of(
        &self,
        reference: &FixtureReference,
        test: &dyn TestInstance,
    ) -> Option<FixtureReference> {
        match reference {
            FixtureReference::Callable { owner, name } => {
                let candidate = format!("{name}{ROLLBACK_SUFFIX}");
                if !test.has_callable(&candidate) {
                    return None;
                }
                Some(FixtureReference::Callable {
                    owner: owner.clone(),
                    name: candidate,
                })
            }
            FixtureReference::Script { path } => {
                let stem = path.file_stem()?.to_str()?;
                let file_name = match path.extension().and_then(|e| e.to_str()) {
                    Some(ext) => format!("{stem}{ROLLBACK_SUFFIX}.{ext}"),
                    None => format!("{stem}{ROLLBACK_SUFFIX}"),
                };
                let candidate = path.with_file_name(file_name);
                if !candidate.is_file() {
                    return None;
                }
                Some(FixtureReference::Script { path: candidate })
            }
        }
    }
}
