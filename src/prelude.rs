//! Convenient re-exports for common usage.
//!
//! ```rust,ignore
//! use fixture_harness::prelude::*;
//! ```

pub use crate::coordinator::{NullCoordinator, RecordingCoordinator, TransactionCoordinator};
pub use crate::error::{FixtureError, PersistenceError};
pub use crate::fixtures::{FixtureLedger, FixtureReference, FixtureResolver, RollbackResolver};
pub use crate::lifecycle::{
    FixtureLifecycleBuilder, FixtureLifecycleManager, LifecycleEvent, LifecycleState,
};
pub use crate::metadata::{Annotations, FixtureScope, IsolationMode, TestInstance};
