//! Operations the traversal engine applies
//!
//! Folder actions run once per visited folder; item actions run once per
//! selected identifier, on the location the identifier resolved to. Both
//! report `ActionOutcome::NotSupported` for things they cannot do to a
//! particular item or folder and reserve `Err` for real failures.

use crate::store::{ActionOutcome, FolderPath, Location, StoreError, StoreView};

mod delete;
mod describe;
pub mod filename;
mod list;
mod save;

pub use delete::{DeleteItem, RetryPolicy};
pub use describe::{DescribeItem, Description};
pub use filename::{FilenameError, FilenamePattern};
pub use list::{CountItems, DeleteAllItems, ListFiles, ListFolders, ListedItem};
pub use save::SaveItem;

/// An operation on a whole folder
pub trait FolderAction {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Apply the action to `folder`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store fails; the walk stops there.
    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        folder: &FolderPath,
    ) -> Result<ActionOutcome, StoreError>;
}

/// An operation on a single item
pub trait ItemAction {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Whether a successful application removes the item from the store
    ///
    /// Forward traversals use this to shift later identifiers down.
    fn is_destructive(&self) -> bool {
        false
    }

    /// Apply the action to the item at `location`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store fails; the traversal stops there.
    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        location: &Location,
    ) -> Result<ActionOutcome, StoreError>;
}
