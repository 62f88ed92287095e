//! Cooperative cancellation for long-running analytics.
//!
//! A host that runs analytics on a background thread keeps one clone of the
//! token and hands another to the computation. When the input goes stale
//! (a different case was selected) the host calls [`CancelToken::cancel`];
//! the computation notices at its next poll and returns
//! [`AnalyticsError::Cancelled`]. There is no shared mutable state besides
//! the flag itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use casenet_core::AnalyticsError;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Poll point for algorithm loops.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Cancelled`] once [`CancelToken::cancel`]
    /// has been called on any clone.
    pub fn check(&self) -> Result<(), AnalyticsError> {
        if self.is_cancelled() {
            Err(AnalyticsError::Cancelled)
        } else {
            Ok(())
        }
    }
}
