//! The orchestrating state machine.

use super::builder::FixtureLifecycleBuilder;
use super::{LifecycleEvent, LifecycleState};
use crate::coordinator::TransactionCoordinator;
use crate::error::FixtureError;
use crate::fixtures::{FixtureLedger, FixtureResolver, RollbackResolver};
use crate::metadata::{FixtureScope, TestInstance};

/// Orchestrates the fixture lifecycle around each test.
///
/// Owns the resolver, the rollback resolver, the ledger, and the handle to
/// the external [`TransactionCoordinator`]. All storage mutation is timed
/// against the coordinator's boundary: when isolation is enabled the manager
/// only *requests* transitions and applies/reverts once the coordinator
/// confirms them, so fixtures always execute inside a guaranteed-open (or
/// guaranteed-closed) transaction.
///
/// Single-threaded by contract: one test drives its lifecycle at a time, and
/// each event handler runs to completion before the next event arrives.
pub struct FixtureLifecycleManager {
    resolver: FixtureResolver,
    rollback: RollbackResolver,
    ledger: FixtureLedger,
    coordinator: Box<dyn TransactionCoordinator>,
    state: LifecycleState,
}

impl std::fmt::Debug for FixtureLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureLifecycleManager")
            .field("resolver", &self.resolver)
            .field("rollback", &self.rollback)
            .field("ledger", &self.ledger)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl FixtureLifecycleManager {
    /// Create a manager from its parts. Prefer [`Self::builder`].
    pub fn new(resolver: FixtureResolver, coordinator: Box<dyn TransactionCoordinator>) -> Self {
        Self {
            resolver,
            rollback: RollbackResolver::new(),
            ledger: FixtureLedger::new(),
            coordinator,
            state: LifecycleState::Idle,
        }
    }

    /// Start building a manager with the fluent API.
    pub fn builder() -> FixtureLifecycleBuilder {
        FixtureLifecycleBuilder::new()
    }

    /// Current boundary state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The applied-fixture ledger (for inspection).
    pub fn ledger(&self) -> &FixtureLedger {
        &self.ledger
    }

    /// Deliver a lifecycle event.
    ///
    /// `test` is the test the event belongs to; for
    /// [`LifecycleEvent::RollbackTransaction`] it supplies the runtime
    /// context rollback units execute in.
    ///
    /// # Errors
    ///
    /// Only configuration-class errors (bad identifiers) escape; fixture
    /// execution failures are contained and reported.
    pub fn dispatch(
        &mut self,
        event: LifecycleEvent,
        test: &dyn TestInstance,
    ) -> Result<(), FixtureError> {
        log::debug!("lifecycle event {event:?} in state {:?}", self.state);
        match event {
            LifecycleEvent::StartTestTransactionRequest => {
                self.start_test_transaction_request(test)
            }
            LifecycleEvent::StartTransaction => self.start_transaction(test),
            LifecycleEvent::EndTestTransactionRequest => self.end_test_transaction_request(test),
            LifecycleEvent::RollbackTransaction => {
                self.rollback_transaction(test);
                Ok(())
            }
        }
    }

    /// A test is about to run.
    ///
    /// With no declared fixtures this is a no-op. Otherwise, when isolation
    /// is enabled: a non-empty ledger combined with method-level fixtures
    /// means the test gets a fresh boundary — the coordinator is asked to
    /// roll back the leftover transaction before a new start is requested.
    /// The rule deliberately triggers on *any* non-empty ledger, not only on
    /// overlapping fixtures; re-applying the same data is the price of
    /// guaranteed consistency. With isolation explicitly disabled the
    /// coordinator is never involved and fixtures are applied immediately.
    pub fn start_test_transaction_request(
        &mut self,
        test: &dyn TestInstance,
    ) -> Result<(), FixtureError> {
        let fixtures = self.resolver.resolve(test, FixtureScope::Merged)?;
        if fixtures.is_empty() {
            return Ok(());
        }

        if test.annotations().isolation_mode().is_disabled() {
            self.ledger.apply_all(fixtures, test);
            return Ok(());
        }

        let method_fixtures = self.resolver.resolve(test, FixtureScope::MethodOnly)?;
        if !self.ledger.is_empty() && !method_fixtures.is_empty() {
            log::debug!(
                "ledger has {} leftover fixture(s) and test declares its own; \
                 requesting fresh transaction",
                self.ledger.len()
            );
            self.coordinator.request_transaction_rollback();
        }

        self.coordinator.request_transaction_start();
        self.state = LifecycleState::TransactionRequested;
        Ok(())
    }

    /// The coordinator confirmed a transaction is open; apply the test's
    /// fixtures into the ledger under it.
    pub fn start_transaction(&mut self, test: &dyn TestInstance) -> Result<(), FixtureError> {
        let fixtures = self.resolver.resolve(test, FixtureScope::Merged)?;
        self.ledger.apply_all(fixtures, test);
        self.state = LifecycleState::TransactionOpen;
        Ok(())
    }

    /// The test finished.
    ///
    /// Nothing happens unless the ledger is non-empty and this test declared
    /// fixtures. A declared dependency on another test suppresses reversion
    /// so the data carries forward. Otherwise: isolation enabled → request a
    /// coordinator rollback (reversion happens on confirmation); disabled →
    /// revert directly.
    pub fn end_test_transaction_request(
        &mut self,
        test: &dyn TestInstance,
    ) -> Result<(), FixtureError> {
        let fixtures = self.resolver.resolve(test, FixtureScope::Merged)?;
        if self.ledger.is_empty() || fixtures.is_empty() {
            return Ok(());
        }

        let annotations = test.annotations();
        if annotations.depends_on_other_test() {
            log::debug!("test depends on another test, leaving fixtures applied");
            return Ok(());
        }

        if annotations.isolation_mode().is_disabled() {
            self.ledger.revert_all(test, &self.rollback);
            self.state = LifecycleState::Idle;
        } else {
            self.coordinator.request_transaction_rollback();
        }
        Ok(())
    }

    /// The coordinator confirmed the rollback completed.
    ///
    /// The transaction already undid the storage writes; reverting the
    /// ledger here runs rollback units for any non-transactional resources
    /// and clears the record.
    pub fn rollback_transaction(&mut self, test: &dyn TestInstance) {
        self.ledger.revert_all(test, &self.rollback);
        self.state = LifecycleState::Idle;
    }
}
