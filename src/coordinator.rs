//! Transaction coordinator seam.
//!
//! The engine never begins or rolls back a transaction itself: it *requests*
//! boundary transitions and mutates state only once the coordinator confirms
//! them (via the [`StartTransaction`](crate::lifecycle::LifecycleEvent) and
//! [`RollbackTransaction`](crate::lifecycle::LifecycleEvent) events). Request
//! failures are the coordinator's own responsibility, so the outbound calls
//! are infallible at this boundary.

use std::sync::{Arc, Mutex};

/// External owner of the isolation transaction surrounding a test.
pub trait TransactionCoordinator {
    /// Ask the coordinator to open a transaction boundary.
    ///
    /// The engine defers fixture application until the coordinator confirms
    /// the boundary is open.
    fn request_transaction_start(&mut self);

    /// Ask the coordinator to roll back the currently open transaction.
    fn request_transaction_rollback(&mut self);
}

/// Coordinator that ignores all requests.
///
/// Suitable for suites that run every test with isolation disabled; the
/// builder falls back to this when no coordinator is supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCoordinator;

impl TransactionCoordinator for NullCoordinator {
    fn request_transaction_start(&mut self) {
        log::debug!("null coordinator: ignoring transaction start request");
    }

    fn request_transaction_rollback(&mut self) {
        log::debug!("null coordinator: ignoring transaction rollback request");
    }
}

/// One outbound request observed by a [`RecordingCoordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorRequest {
    /// `request_transaction_start` was called.
    Start,
    /// `request_transaction_rollback` was called.
    Rollback,
}

/// Coordinator that records requests for later inspection.
///
/// Clones share the same request log, so a test can keep a handle while the
/// lifecycle manager owns the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingCoordinator {
    requests: Arc<Mutex<Vec<CoordinatorRequest>>>,
}

impl RecordingCoordinator {
    /// Create a coordinator with an empty request log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the requests observed so far, in order.
    pub fn requests(&self) -> Vec<CoordinatorRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Drop all recorded requests.
    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl TransactionCoordinator for RecordingCoordinator {
    fn request_transaction_start(&mut self) {
        self.requests.lock().unwrap().push(CoordinatorRequest::Start);
    }

    fn request_transaction_rollback(&mut self) {
        self.requests
            .lock()
            .unwrap()
            .push(CoordinatorRequest::Rollback);
    }
}
