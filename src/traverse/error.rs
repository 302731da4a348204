//! Traversal error types

use thiserror::Error;

use crate::resolve::ResolveError;
use crate::store::StoreError;

/// Errors that stop a traversal
///
/// Work done before the error is kept; nothing is rolled back.
#[derive(Debug, Error)]
pub enum TraverseError {
    /// An identifier could not be mapped to an item
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A listing or an action failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The user interrupted the traversal
    #[error("Interrupted")]
    Cancelled,
}

impl TraverseError {
    /// Whether the traversal stopped because of [`CancelToken`](super::CancelToken)
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
