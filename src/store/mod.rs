//! Store abstraction for camera-like folder trees
//!
//! A store exposes an ordered, hierarchical view of folders and items. The
//! order each listing returns is the only ordering camsh relies on: item
//! identifiers are assigned by replaying those listings depth-first.
//!
//! Two implementations ship with the crate:
//!
//! - [`FsStore`]: a store backed by a local directory (a mounted card or a
//!   copy of a camera's file system)
//! - [`MemoryStore`]: an in-memory tree with fault injection, used for tests
//!   and as a reference collaborator

use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub mod error;
mod fs;
mod memory;
pub mod path;

pub use error::StoreError;
pub use fs::FsStore;
pub use memory::{LISTING_FAILURE_CODE, MemoryStore};
pub use path::{FolderPath, Location};

/// Operation applied to a single item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemActionKind {
    /// Copy the item's contents to a local file
    Save { dest: PathBuf },
    /// Remove the item from the store
    Delete,
}

/// Operation applied to a whole folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderActionKind {
    /// Remove every item directly inside the folder
    DeleteAll,
}

/// Result of an action that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action completed for this item or folder
    Success,
    /// The action does not apply here (e.g. deleting a protected item)
    NotSupported,
}

/// Metadata about a single item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    pub name: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub read_only: bool,
    pub mime_type: &'static str,
}

/// Ordered view of a hierarchical, mutable item store
///
/// Listing order must be stable between calls as long as the store is not
/// modified; identifiers depend on it.
pub trait StoreView {
    /// Names of the items directly inside `folder`, in store order
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the folder does not exist or cannot be read.
    fn list_items(&self, folder: &FolderPath) -> Result<Vec<String>, StoreError>;

    /// Names of the subfolders directly inside `folder`, in store order
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the folder does not exist or cannot be read.
    fn list_subfolders(&self, folder: &FolderPath) -> Result<Vec<String>, StoreError>;

    /// Apply an operation to one item
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on device or I/O failure. Inapplicable operations
    /// are reported as `ActionOutcome::NotSupported`, not as errors.
    fn apply_item_action(
        &mut self,
        folder: &FolderPath,
        name: &str,
        action: &ItemActionKind,
    ) -> Result<ActionOutcome, StoreError>;

    /// Apply an operation to a folder (non-recursive)
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on device or I/O failure.
    fn apply_folder_action(
        &mut self,
        folder: &FolderPath,
        action: FolderActionKind,
    ) -> Result<ActionOutcome, StoreError>;

    /// Metadata for one item
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the item does not exist or cannot be read.
    fn item_info(&self, folder: &FolderPath, name: &str) -> Result<ItemInfo, StoreError>;
}

/// Guess a MIME type from an item's extension
#[must_use]
pub fn mime_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "tif" | "tiff" => "image/tiff",
        "cr2" => "image/x-canon-cr2",
        "cr3" => "image/x-canon-cr3",
        "nef" => "image/x-nikon-nef",
        "arw" => "image/x-sony-arw",
        "dng" => "image/x-adobe-dng",
        "raf" => "image/x-fuji-raf",
        "mov" => "video/quicktime",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}
