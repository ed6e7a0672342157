//! # Fixture Harness
//!
//! Fixture lifecycle and transactional-isolation engine for integration test
//! suites.
//!
//! ## Architecture Overview
//!
//! The engine resolves fixture identifiers declared on a test into executable
//! references, applies them in declaration order with deduplication, records
//! them in a ledger, and reverts them symmetrically at teardown. When
//! transactional isolation is enabled, application and reversion are deferred
//! to transaction boundaries owned by an external coordinator, so teardown is
//! a cheap transaction rollback instead of a pile of teardown scripts.
//!
//! Components, leaves first:
//! - [`fixtures::FixtureResolver`] — identifier → [`fixtures::FixtureReference`]
//! - [`fixtures::RollbackResolver`] — reference → reversal counterpart
//! - [`fixtures::FixtureLedger`] — ordered applied set, apply/revert
//! - [`lifecycle::FixtureLifecycleManager`] — the state machine driving them
//! - [`coordinator::TransactionCoordinator`] — external transaction boundary
//! - [`metadata::TestInstance`] — the test as seen by the engine
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fixture_harness::prelude::*;
//!
//! let manager = FixtureLifecycleManager::builder()
//!     .with_fixture_root("tests/fixtures")
//!     .with_coordinator(Box::new(my_coordinator))
//!     .build()?;
//!
//! // Driven by the test-runner adapter, per test:
//! manager.dispatch(LifecycleEvent::StartTestTransactionRequest, &test)?;
//! manager.dispatch(LifecycleEvent::StartTransaction, &test)?;
//! // ... test body runs ...
//! manager.dispatch(LifecycleEvent::EndTestTransactionRequest, &test)?;
//! manager.dispatch(LifecycleEvent::RollbackTransaction, &test)?;
//! ```
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every test starts from a clean, known state
//! 2. **Idempotent apply**: an already-applied fixture is never re-executed
//! 3. **Contained failures**: one broken fixture never cascades into
//!    unrelated test failures
//! 4. **Boundary discipline**: the engine requests transaction transitions,
//!    it never performs them itself

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Transaction coordinator seam (external transaction boundary owner)
pub mod coordinator;
/// Error taxonomy for the engine
pub mod error;
/// Fixture resolution, rollback discovery and the applied-fixture ledger
pub mod fixtures;
/// Lifecycle state machine and event dispatch
pub mod lifecycle;
/// Test metadata: annotations, isolation configuration, the test contract
pub mod metadata;

// Convenient re-exports for common usage
pub mod prelude;

// Re-export commonly used types at crate root
pub use coordinator::TransactionCoordinator;
pub use error::FixtureError;
pub use fixtures::{FixtureLedger, FixtureReference, FixtureResolver, RollbackResolver};
pub use lifecycle::{FixtureLifecycleManager, LifecycleEvent, LifecycleState};
pub use metadata::{Annotations, FixtureScope, IsolationMode, TestInstance};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine version descriptor
pub const ENGINE_VERSION: &str = "Fixture Harness V1";
