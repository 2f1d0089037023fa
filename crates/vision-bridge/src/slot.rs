//! Single-slot mailbox for the latest vision result

use crate::VisionResult;
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Newest-wins mailbox between the vision source task and the control loop.
///
/// The landmarker may lag camera delivery by one or more loop iterations;
/// the consumer always reads the most recently published result and reuses
/// a stale one silently when nothing new has arrived. Deliberately not a
/// queue: stale frames are discarded, never replayed.
#[derive(Clone, Default)]
pub struct ResultSlot {
    inner: Arc<Mutex<Option<VisionResult>>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new result, overwriting whatever was there.
    pub fn publish(&self, result: VisionResult) {
        trace!(timestamp_ms = result.timestamp_ms, "vision result published");
        // Lock is held only for the swap; readers never wait for a fresh value.
        *self.inner.lock().expect("result slot poisoned") = Some(result);
    }

    /// Clone out the latest result, if one has ever been published.
    pub fn latest(&self) -> Option<VisionResult> {
        self.inner.lock().expect("result slot poisoned").clone()
    }
}
