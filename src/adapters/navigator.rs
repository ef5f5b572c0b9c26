//! Navigator for headless use.
//!
//! There is no sign-in screen to route to from a CLI, so termination is
//! logged and remembered; the caller checks [`LoggingNavigator::is_signed_out`]
//! and tells the user to run `erpsync login`.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::traits::SessionNavigator;

/// Logs session termination and records that it happened.
#[derive(Debug, Default)]
pub struct LoggingNavigator {
    signed_out: AtomicBool,
}

impl LoggingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the session has been terminated since creation.
    pub fn is_signed_out(&self) -> bool {
        self.signed_out.load(Ordering::SeqCst)
    }
}

impl SessionNavigator for LoggingNavigator {
    fn terminate(&self) {
        self.signed_out.store(true, Ordering::SeqCst);
        tracing::warn!("Session ended, sign in again with `erpsync login`");
    }
}
