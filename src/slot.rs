//! Per-slot request sequencing
//!
//! A [`RequestSlot`] names one logical "latest wins" slot, such as the header
//! banner image. Every request issued through it is numbered; a result is only
//! delivered if no newer request was issued while it was in flight. Nothing is
//! cancelled, so a superseded request still runs to completion and its result
//! is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestSlot {
    latest: Arc<AtomicU64>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, superseding every earlier one.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Await `request` under a fresh ticket.
    ///
    /// Returns `None` when a newer request was issued before this one resolved.
    pub async fn run<F, T>(&self, request: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        let value = request.await;

        if self.is_current(&ticket) {
            Some(value)
        } else {
            tracing::debug!(
                "Discarding stale result for request #{} (latest is #{})",
                ticket.sequence(),
                self.latest.load(Ordering::Acquire)
            );
            None
        }
    }
}
