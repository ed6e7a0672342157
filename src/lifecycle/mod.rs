//! Lifecycle state machine and event dispatch.
//!
//! Per test, events arrive in the fixed sequence
//! `StartTestTransactionRequest → [StartTransaction] → test body →
//! EndTestTransactionRequest → [RollbackTransaction]`, delivered
//! synchronously by a test-runner adapter. The bracketed events are the
//! coordinator's confirmations; they only fire when isolation is enabled.

/// Fluent construction of the lifecycle manager
pub mod builder;
/// The orchestrating state machine
pub mod manager;

pub use builder::FixtureLifecycleBuilder;
pub use manager::FixtureLifecycleManager;

/// Lifecycle events a test-runner adapter delivers to the engine.
///
/// A typed enum rather than named-method reflection: adapters map their
/// framework's hooks onto these variants and call
/// [`FixtureLifecycleManager::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A test is about to run; decide whether to request a transaction
    /// boundary or apply fixtures immediately.
    StartTestTransactionRequest,
    /// The coordinator confirmed a transaction is open; apply fixtures now.
    StartTransaction,
    /// The test finished; decide whether to request rollback, revert
    /// directly, or carry state forward.
    EndTestTransactionRequest,
    /// The coordinator confirmed the rollback completed; revert the ledger.
    RollbackTransaction,
}

/// Engine state with respect to the coordinator's transaction boundary.
///
/// The disabled-isolation path never requests a boundary and therefore
/// stays `Idle` even while fixtures are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// No transaction boundary open or requested.
    #[default]
    Idle,
    /// The coordinator has been asked to open a boundary.
    TransactionRequested,
    /// Fixtures are applied under a confirmed-open transaction.
    TransactionOpen,
}
