//! Navigator that counts terminations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::traits::SessionNavigator;

/// Records every `terminate()` call instead of routing anywhere.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    terminations: Arc<AtomicUsize>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the session was terminated.
    pub fn terminate_count(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }

    pub fn was_terminated(&self) -> bool {
        self.terminate_count() > 0
    }
}

impl SessionNavigator for RecordingNavigator {
    fn terminate(&self) {
        self.terminations.fetch_add(1, Ordering::SeqCst);
    }
}
