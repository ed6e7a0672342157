//! Fixture resolution, rollback discovery, and the applied-fixture ledger.
//!
//! A declared identifier resolves to a [`FixtureReference`] — a callable on
//! the test or a script under the fixture root. Applied references accumulate
//! in a [`FixtureLedger`] for the open isolation scope; at teardown the
//! [`RollbackResolver`] derives each reference's reversal counterpart.

/// Applied-fixture ledger (ordered, deduplicated, atomically cleared)
pub mod ledger;
/// Resolved, executable fixture references
pub mod reference;
/// Identifier → reference resolution against the fixture root
pub mod resolver;
/// Reversal-counterpart discovery
pub mod rollback;

pub use ledger::FixtureLedger;
pub use reference::FixtureReference;
pub use resolver::FixtureResolver;
pub use rollback::{RollbackResolver, ROLLBACK_SUFFIX};
