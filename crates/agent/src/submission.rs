//! Shared submission gate
//!
//! Each orchestrator runs one submission cycle at a time. The gate holds
//! the in-flight flag (re-submission while pending is rejected, not
//! queued) and the generation counter that keeps late asynchronous
//! results - a slow translation join or a fire-and-forget narration -
//! from overwriting fresher state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use pharma_assist_core::{Error, Result};

/// In-flight guard plus stale-write generation counter
#[derive(Default)]
pub struct SubmitGate {
    in_flight: AtomicBool,
    generation: AtomicU64,
}

impl SubmitGate {
    /// Create an idle gate
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Enter `Submitting`; returns the new generation token
    ///
    /// Fails while a previous cycle is still pending.
    pub fn begin(&self) -> Result<u64> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::validation(
                "A request is already in progress. Please wait for it to finish.",
            ));
        }
        Ok(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Return to `Idle`
    pub fn finish(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }

    /// True while a cycle is pending
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// True when `generation` is still the newest submission
    ///
    /// A deferred write holding a stale token must be discarded.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
