//! In-memory store
//!
//! Insertion order is store order. Besides plain contents the store can be
//! told to misbehave: report an item as busy a number of times, or fail
//! every listing of a folder with a device error.

use std::collections::HashMap;
use std::fs;

use tracing::trace;

use super::{
    ActionOutcome, FolderActionKind, FolderPath, ItemActionKind, ItemInfo, Location, StoreError,
    StoreView, mime_type_for,
};

/// Device code reported by folders configured with [`MemoryStore::fail_listing`]
pub const LISTING_FAILURE_CODE: i32 = -7;

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoryItem {
    name: String,
    data: Vec<u8>,
    read_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MemoryFolder {
    items: Vec<MemoryItem>,
    subfolders: Vec<String>,
}

impl MemoryFolder {
    fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }
}

/// Store kept entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryStore {
    folders: HashMap<FolderPath, MemoryFolder>,
    busy: HashMap<Location, usize>,
    failing: Vec<FolderPath>,
    deleted: Vec<Location>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store containing only the root folder
    #[must_use]
    pub fn new() -> Self {
        let mut folders = HashMap::new();
        folders.insert(FolderPath::root(), MemoryFolder::default());
        Self {
            folders,
            busy: HashMap::new(),
            failing: Vec::new(),
            deleted: Vec::new(),
        }
    }

    /// Builder: add `names` to `folder`, creating the folder chain as needed
    ///
    /// Each item's contents are its own name. `.` and `..` components in
    /// `folder` are ignored.
    #[must_use]
    pub fn with_items(mut self, folder: &str, names: &[&str]) -> Self {
        let path = folder
            .split('/')
            .filter(|c| !c.is_empty() && *c != "." && *c != "..")
            .fold(FolderPath::root(), |path, component| path.join(component));
        self.add_folder(&path);
        for name in names {
            self.insert_item(&path, name, name.as_bytes().to_vec());
        }
        self
    }

    /// Create `path` and any missing ancestors, appending each new folder
    /// after its existing siblings
    pub fn add_folder(&mut self, path: &FolderPath) {
        let mut current = FolderPath::root();
        for component in path.components() {
            let child = current.join(component);
            if !self.folders.contains_key(&child) {
                if let Some(parent) = self.folders.get_mut(&current) {
                    parent.subfolders.push(component.to_string());
                }
                self.folders.insert(child.clone(), MemoryFolder::default());
            }
            current = child;
        }
    }

    /// Add an item at the end of `folder`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the folder does not exist and
    /// `StoreError::InvalidPath` if an item with that name already exists.
    pub fn add_item(
        &mut self,
        folder: &FolderPath,
        name: &str,
        data: impl Into<Vec<u8>>,
    ) -> Result<(), StoreError> {
        let entry = self.folder(folder)?;
        if entry.position(name).is_some() {
            return Err(StoreError::InvalidPath(format!(
                "{} already exists",
                folder.join(name)
            )));
        }
        self.insert_item(folder, name, data.into());
        Ok(())
    }

    fn insert_item(&mut self, folder: &FolderPath, name: &str, data: Vec<u8>) {
        if let Some(entry) = self.folders.get_mut(folder) {
            entry.items.push(MemoryItem {
                name: name.to_string(),
                data,
                read_only: false,
            });
        }
    }

    /// Mark an item protected (deletes report `NotSupported`) or writable
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the item does not exist.
    pub fn set_read_only(
        &mut self,
        folder: &FolderPath,
        name: &str,
        read_only: bool,
    ) -> Result<(), StoreError> {
        self.item_mut(folder, name)?.read_only = read_only;
        Ok(())
    }

    /// Answer the next `times` actions on an item with `StoreError::Busy`
    pub fn inject_busy(&mut self, folder: &FolderPath, name: &str, times: usize) {
        self.busy.insert(Location::new(folder.clone(), name), times);
    }

    /// Make every listing of `folder` fail with a device error
    pub fn fail_listing(&mut self, folder: &FolderPath) {
        self.failing.push(folder.clone());
    }

    /// Item names of `folder` in store order, empty if the folder is missing
    #[must_use]
    pub fn item_names(&self, folder: &FolderPath) -> Vec<String> {
        self.folders
            .get(folder)
            .map(|entry| entry.item_names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Contents of an item
    #[must_use]
    pub fn contents(&self, folder: &FolderPath, name: &str) -> Option<&[u8]> {
        let entry = self.folders.get(folder)?;
        entry
            .position(name)
            .map(|index| entry.items[index].data.as_slice())
    }

    /// Every item removed so far, in deletion order
    #[must_use]
    pub fn deleted(&self) -> &[Location] {
        &self.deleted
    }

    /// Total number of items in the store
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.folders.values().map(|folder| folder.items.len()).sum()
    }

    fn folder(&self, folder: &FolderPath) -> Result<&MemoryFolder, StoreError> {
        if self.failing.contains(folder) {
            return Err(StoreError::Device {
                code: LISTING_FAILURE_CODE,
                message: format!("cannot list {folder}"),
            });
        }
        self.folders
            .get(folder)
            .ok_or_else(|| StoreError::NotFound(folder.to_string()))
    }

    fn item_mut(&mut self, folder: &FolderPath, name: &str) -> Result<&mut MemoryItem, StoreError> {
        let missing = || StoreError::NotFound(folder.join(name).to_string());
        let entry = self.folders.get_mut(folder).ok_or_else(missing)?;
        let index = entry.position(name).ok_or_else(missing)?;
        Ok(&mut entry.items[index])
    }

    fn take_busy(&mut self, location: &Location) -> bool {
        match self.busy.get_mut(location) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    fn remove_item(&mut self, folder: &FolderPath, name: &str) -> Result<ActionOutcome, StoreError> {
        if self.item_mut(folder, name)?.read_only {
            return Ok(ActionOutcome::NotSupported);
        }
        if let Some(entry) = self.folders.get_mut(folder) {
            entry.items.retain(|item| item.name != name);
        }
        self.deleted.push(Location::new(folder.clone(), name));
        Ok(ActionOutcome::Success)
    }
}

impl StoreView for MemoryStore {
    fn list_items(&self, folder: &FolderPath) -> Result<Vec<String>, StoreError> {
        Ok(self.folder(folder)?.item_names().map(str::to_string).collect())
    }

    fn list_subfolders(&self, folder: &FolderPath) -> Result<Vec<String>, StoreError> {
        Ok(self.folder(folder)?.subfolders.clone())
    }

    fn apply_item_action(
        &mut self,
        folder: &FolderPath,
        name: &str,
        action: &ItemActionKind,
    ) -> Result<ActionOutcome, StoreError> {
        let location = Location::new(folder.clone(), name);
        if self.take_busy(&location) {
            trace!(item = %location, "injected busy response");
            return Err(StoreError::Busy(location.to_string()));
        }
        match action {
            ItemActionKind::Save { dest } => {
                let data = self.item_mut(folder, name)?.data.clone();
                fs::write(dest, data)?;
                Ok(ActionOutcome::Success)
            }
            ItemActionKind::Delete => self.remove_item(folder, name),
        }
    }

    fn apply_folder_action(
        &mut self,
        folder: &FolderPath,
        action: FolderActionKind,
    ) -> Result<ActionOutcome, StoreError> {
        match action {
            FolderActionKind::DeleteAll => {
                let mut outcome = ActionOutcome::Success;
                for name in self.list_items(folder)? {
                    if self.remove_item(folder, &name)? == ActionOutcome::NotSupported {
                        outcome = ActionOutcome::NotSupported;
                    }
                }
                Ok(outcome)
            }
        }
    }

    fn item_info(&self, folder: &FolderPath, name: &str) -> Result<ItemInfo, StoreError> {
        let entry = self.folder(folder)?;
        let item = entry
            .position(name)
            .map(|index| &entry.items[index])
            .ok_or_else(|| StoreError::NotFound(folder.join(name).to_string()))?;
        Ok(ItemInfo {
            name: item.name.clone(),
            size: item.data.len() as u64,
            modified: None,
            read_only: item.read_only,
            mime_type: mime_type_for(&item.name),
        })
    }
}
