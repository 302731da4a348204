//! Cooperative cancellation

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::TraverseError;

/// Shared flag the engine polls between items and folders
///
/// Clones share the same flag, so the binary can hand one clone to the
/// Ctrl+C handler and another to the engine.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// # Errors
    ///
    /// Returns `TraverseError::Cancelled` once [`cancel`](Self::cancel) has
    /// been called on any clone.
    pub fn check(&self) -> Result<(), TraverseError> {
        if self.is_cancelled() {
            Err(TraverseError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Trip `token` when the user presses Ctrl+C
///
/// # Errors
///
/// Returns `ctrlc::Error` if a handler is already installed.
pub fn install_ctrlc_handler(token: &CancelToken) -> Result<(), ctrlc::Error> {
    let token = token.clone();
    ctrlc::set_handler(move || {
        token.cancel();
        eprintln!("\nReceived Ctrl+C, stopping after the current item...");
    })
}
