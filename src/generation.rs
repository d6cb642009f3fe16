//! Request generation counters
//!
//! Every resource that can have overlapping requests in flight (the session,
//! the history list, the form's location field) owns a [`Generation`].
//! Starting a request takes a [`Ticket`]; when the response arrives it is
//! applied only if no newer ticket has been issued since. A superseded
//! response is dropped instead of overwriting fresher state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic counter shared between a resource and its in-flight requests.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: Arc<AtomicU64>,
}

/// Proof that a request was started at a particular generation.
#[derive(Debug, Clone)]
pub struct Ticket {
    issued: u64,
    current: Arc<AtomicU64>,
}

impl Generation {
    /// Creates a counter at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every ticket issued before it.
    pub fn begin(&self) -> Ticket {
        let issued = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            issued,
            current: Arc::clone(&self.current),
        }
    }

    /// Supersedes all outstanding tickets without starting a request.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    /// The latest generation handed out.
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

impl Ticket {
    /// Returns `true` while no newer ticket or invalidation has happened.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.issued
    }

    /// The generation this ticket was issued at.
    pub fn generation(&self) -> u64 {
        self.issued
    }
}
