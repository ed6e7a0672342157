//! Applied-fixture ledger.

use super::reference::FixtureReference;
use super::rollback::RollbackResolver;
use crate::error::PersistenceError;
use crate::metadata::TestInstance;

/// Ordered record of the fixtures applied in the open isolation scope.
///
/// Insertion order is significant: revert walks the ledger in the same order
/// fixtures were applied. Membership follows [`FixtureReference`] equality,
/// and applying an already-recorded reference is a no-op, so a fixture
/// declared at both class and method level executes exactly once.
///
/// Failure containment: one failing unit never stops the batch or blocks
/// teardown. The only exception is a storage-layer failure
/// ([`PersistenceError`]) during apply, which stops the remainder of that
/// batch — the storage the fixtures write to is gone, so running more of
/// them only produces noise.
#[derive(Debug, Default)]
pub struct FixtureLedger {
    applied: Vec<FixtureReference>,
}

impl FixtureLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no fixtures are currently recorded.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Number of recorded fixtures.
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Whether an equal reference is already recorded.
    pub fn contains(&self, reference: &FixtureReference) -> bool {
        self.applied.contains(reference)
    }

    /// The recorded references, in application order.
    pub fn applied(&self) -> &[FixtureReference] {
        &self.applied
    }

    /// Execute and record a single fixture unless an equal reference is
    /// already recorded.
    ///
    /// Returns `true` if the fixture was executed (or attempted) and
    /// recorded, `false` if it was deduplicated. Execution failures are
    /// reported and the reference is still recorded, since its partial
    /// effects may need the rollback pass at teardown.
    pub fn apply(&mut self, reference: FixtureReference, test: &dyn TestInstance) -> bool {
        if self.contains(&reference) {
            log::debug!("fixture {reference} already applied, skipping");
            return false;
        }

        if let Err(err) = execute(&reference, test) {
            log::warn!("fixture {reference} failed: {err:#}");
        }
        self.applied.push(reference);
        true
    }

    /// Apply a batch of fixtures in order.
    ///
    /// A [`PersistenceError`] from the test's runtime stops the remainder of
    /// the batch; any other failure only skips the failing unit.
    pub fn apply_all(&mut self, references: Vec<FixtureReference>, test: &dyn TestInstance) {
        for reference in references {
            if self.contains(&reference) {
                log::debug!("fixture {reference} already applied, skipping");
                continue;
            }

            let result = execute(&reference, test);
            self.applied.push(reference.clone());

            match result {
                Ok(()) => {}
                Err(err) if err.downcast_ref::<PersistenceError>().is_some() => {
                    log::error!(
                        "storage failure while applying fixture {reference}: {err:#}; \
                         abandoning remainder of batch"
                    );
                    break;
                }
                Err(err) => {
                    log::warn!("fixture {reference} failed: {err:#}");
                }
            }
        }
    }

    /// Revert every recorded fixture, in application order, then clear.
    ///
    /// Each reference's rollback counterpart (when one exists) is executed in
    /// the test's runtime context; failures are reported and do not stop the
    /// walk. The ledger is cleared unconditionally — teardown must never be
    /// blocked by a broken rollback unit.
    pub fn revert_all(&mut self, test: &dyn TestInstance, rollback: &RollbackResolver) {
        for reference in &self.applied {
            match rollback.rollback_of(reference, test) {
                Some(counterpart) => {
                    if let Err(err) = execute(&counterpart, test) {
                        log::warn!("rollback of fixture {reference} failed: {err:#}");
                    }
                }
                None => {
                    log::debug!("no rollback counterpart for fixture {reference}");
                }
            }
        }
        self.applied.clear();
    }
}

/// Execute a single fixture unit in the test's runtime context.
fn execute(reference: &FixtureReference, test: &dyn TestInstance) -> anyhow::Result<()> {
    match reference {
        FixtureReference::Callable { name, .. } => test.invoke_callable(name),
        FixtureReference::Script { path } => test.run_script(path),
    }
}
