//! Pending-mode slot for deferred transitions

use crate::mode::Mode;
use tracing::debug;

/// Holds at most one requested, not yet applied, mode.
///
/// The orchestrator drains it once per iteration after rendering.
#[derive(Default)]
pub struct Transition {
    pending: Option<Box<dyn Mode>>,
}

impl Transition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a switch to `mode`. A previous unapplied request is dropped.
    pub fn request(&mut self, mode: Box<dyn Mode>) {
        if let Some(superseded) = self.pending.replace(mode) {
            debug!("pending mode superseded before it was applied");
            drop(superseded);
        }
    }

    pub fn is_requested(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending mode, clearing the request
    pub fn take(&mut self) -> Option<Box<dyn Mode>> {
        self.pending.take()
    }

    /// Drop any pending mode without applying it. Returns whether one existed.
    pub fn discard(&mut self) -> bool {
        match self.pending.take() {
            Some(abandoned) => {
                drop(abandoned);
                true
            }
            None => false,
        }
    }
}
