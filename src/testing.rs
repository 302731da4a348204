//! Testing utilities for camsh
//!
//! Ready-made stores and recording actions for exercising the traversal
//! engine, plus a `TestCard` wrapper for tests that need a real directory.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::actions::{FolderAction, ItemAction};
use crate::store::{
    ActionOutcome, FolderPath, FsStore, ItemActionKind, Location, MemoryStore, StoreError,
    StoreView,
};

/// Flat store with items `a` through `e` in the root folder
#[must_use]
pub fn flat_store() -> MemoryStore {
    MemoryStore::new().with_items("/", &["a", "b", "c", "d", "e"])
}

/// Root with two items and a subfolder `X` holding three
///
/// ```text
/// /    r1 r2        ids 0 1
/// /X   x1 x2 x3     ids 2 3 4
/// ```
#[must_use]
pub fn nested_store() -> MemoryStore {
    MemoryStore::new()
        .with_items("/", &["r1", "r2"])
        .with_items("/X", &["x1", "x2", "x3"])
}

/// Parse a folder path, panicking on invalid input
///
/// # Panics
/// Panics if `path` contains relative components.
#[must_use]
pub fn folder(path: &str) -> FolderPath {
    FolderPath::parse(path).expect("valid folder path")
}

/// Item action that records every location it is applied to
///
/// In deleting mode it forwards `ItemActionKind::Delete` to the store and
/// reports itself as destructive; otherwise it leaves the store alone.
#[derive(Debug, Default)]
pub struct RecordingAction {
    deleting: bool,
    pub seen: Vec<Location>,
}

impl RecordingAction {
    #[must_use]
    pub fn observing() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn deleting() -> Self {
        Self {
            deleting: true,
            seen: Vec::new(),
        }
    }

    /// Names of the items seen, in application order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.seen.iter().map(|location| location.name.as_str()).collect()
    }
}

impl ItemAction for RecordingAction {
    fn name(&self) -> &'static str {
        "record"
    }

    fn is_destructive(&self) -> bool {
        self.deleting
    }

    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        location: &Location,
    ) -> Result<ActionOutcome, StoreError> {
        self.seen.push(location.clone());
        if self.deleting {
            store.apply_item_action(&location.folder, &location.name, &ItemActionKind::Delete)
        } else {
            Ok(ActionOutcome::Success)
        }
    }
}

/// Folder action that records the folders it visits
#[derive(Debug, Default)]
pub struct RecordingFolderAction {
    pub visited: Vec<FolderPath>,
}

impl RecordingFolderAction {
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.visited.iter().map(FolderPath::as_str).collect()
    }
}

impl FolderAction for RecordingFolderAction {
    fn name(&self) -> &'static str {
        "record-folders"
    }

    fn apply(
        &mut self,
        _store: &mut dyn StoreView,
        folder: &FolderPath,
    ) -> Result<ActionOutcome, StoreError> {
        self.visited.push(folder.clone());
        Ok(ActionOutcome::Success)
    }
}

/// Temporary directory laid out like a memory card
///
/// The directory is removed when the wrapper is dropped.
pub struct TestCard {
    dir: TempDir,
}

impl TestCard {
    /// Create an empty card
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write `contents` to `relative`, creating parent directories
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create card folder");
        }
        fs::write(&path, contents).expect("Failed to write card file");
        path
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open the card as a store
    ///
    /// # Panics
    /// Panics if the directory has disappeared.
    #[must_use]
    pub fn store(&self) -> FsStore {
        FsStore::open(self.dir.path()).expect("Failed to open card")
    }
}

impl Default for TestCard {
    fn default() -> Self {
        Self::new()
    }
}
