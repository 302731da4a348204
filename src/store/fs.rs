//! Directory-backed store
//!
//! Maps store folders onto a local directory tree: `/DCIM/100CANON` is
//! `<root>/DCIM/100CANON`. Regular files are items, directories are
//! subfolders. Listings are sorted by name so identifiers are reproducible
//! across runs; read-only files are treated as protected items.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{
    ActionOutcome, FolderActionKind, FolderPath, ItemActionKind, ItemInfo, StoreError, StoreView,
    mime_type_for,
};

/// Store rooted at a local directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
}

impl FsStore {
    /// Open a store rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if `root` does not exist and
    /// `StoreError::InvalidPath` if it is not a directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(root.display().to_string()),
            _ => StoreError::Io(e),
        })?;
        if !metadata.is_dir() {
            return Err(StoreError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        debug!(root = %root.display(), "opened directory store");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Local directory backing the store root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn folder_dir(&self, folder: &FolderPath) -> PathBuf {
        folder
            .components()
            .fold(self.root.clone(), |dir, component| dir.join(component))
    }

    fn item_path(&self, folder: &FolderPath, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(StoreError::InvalidPath(format!("invalid item name '{name}'")));
        }
        Ok(self.folder_dir(folder).join(name))
    }

    fn entries(&self, folder: &FolderPath, kind: EntryKind) -> Result<Vec<String>, StoreError> {
        let dir = self.folder_dir(folder);
        let read_dir = fs::read_dir(&dir).map_err(|e| not_found_or_io(e, folder.as_str()))?;

        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            // Follow symlinks so a linked card folder behaves like a real one
            let Ok(metadata) = fs::metadata(entry.path()) else {
                continue;
            };
            let matches = match kind {
                EntryKind::File => metadata.is_file(),
                EntryKind::Directory => metadata.is_dir(),
            };
            if !matches {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(folder = %folder, name = ?raw, "skipping non UTF-8 entry"),
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_file(path: &Path, shown: &str) -> Result<ActionOutcome, StoreError> {
        let metadata = fs::metadata(path).map_err(|e| not_found_or_io(e, shown))?;
        if !metadata.is_file() {
            return Err(StoreError::NotFound(shown.to_string()));
        }
        if metadata.permissions().readonly() {
            debug!(item = %shown, "item is protected, not deleting");
            return Ok(ActionOutcome::NotSupported);
        }
        fs::remove_file(path).map_err(|e| not_found_or_io(e, shown))?;
        Ok(ActionOutcome::Success)
    }
}

fn not_found_or_io(error: std::io::Error, what: &str) -> StoreError {
    match error.kind() {
        ErrorKind::NotFound => StoreError::NotFound(what.to_string()),
        _ => StoreError::Io(error),
    }
}

impl StoreView for FsStore {
    fn list_items(&self, folder: &FolderPath) -> Result<Vec<String>, StoreError> {
        self.entries(folder, EntryKind::File)
    }

    fn list_subfolders(&self, folder: &FolderPath) -> Result<Vec<String>, StoreError> {
        self.entries(folder, EntryKind::Directory)
    }

    fn apply_item_action(
        &mut self,
        folder: &FolderPath,
        name: &str,
        action: &ItemActionKind,
    ) -> Result<ActionOutcome, StoreError> {
        let path = self.item_path(folder, name)?;
        let shown = folder.join(name).to_string();
        match action {
            ItemActionKind::Save { dest } => {
                if !path.is_file() {
                    return Err(StoreError::NotFound(shown));
                }
                fs::copy(&path, dest)?;
                Ok(ActionOutcome::Success)
            }
            ItemActionKind::Delete => Self::delete_file(&path, &shown),
        }
    }

    fn apply_folder_action(
        &mut self,
        folder: &FolderPath,
        action: FolderActionKind,
    ) -> Result<ActionOutcome, StoreError> {
        match action {
            FolderActionKind::DeleteAll => {
                let mut protected = 0;
                for name in self.list_items(folder)? {
                    let path = self.item_path(folder, &name)?;
                    let shown = folder.join(&name).to_string();
                    if Self::delete_file(&path, &shown)? == ActionOutcome::NotSupported {
                        warn!(item = %shown, "protected item left in place");
                        protected += 1;
                    }
                }
                if protected > 0 {
                    Ok(ActionOutcome::NotSupported)
                } else {
                    Ok(ActionOutcome::Success)
                }
            }
        }
    }

    fn item_info(&self, folder: &FolderPath, name: &str) -> Result<ItemInfo, StoreError> {
        let path = self.item_path(folder, name)?;
        let shown = folder.join(name).to_string();
        let metadata = fs::metadata(&path).map_err(|e| not_found_or_io(e, &shown))?;
        if !metadata.is_file() {
            return Err(StoreError::NotFound(shown));
        }
        Ok(ItemInfo {
            name: name.to_string(),
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            read_only: metadata.permissions().readonly(),
            mime_type: mime_type_for(name),
        })
    }
}
