//! Folder actions: listing, counting and clearing folders

use tracing::debug;

use super::FolderAction;
use crate::store::{ActionOutcome, FolderActionKind, FolderPath, Location, StoreError, StoreView};

/// One line of a file listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    /// Identifier, 0-based
    pub id: usize,
    pub location: Location,
}

/// Collect every item of each visited folder with its identifier
///
/// Identifiers are handed out in visiting order, so they match the
/// identifiers range expressions use only for forward walks.
#[derive(Debug, Default)]
pub struct ListFiles {
    next_id: usize,
    pub items: Vec<ListedItem>,
    /// Item count per visited folder, in visiting order
    pub folders: Vec<(FolderPath, usize)>,
}

impl ListFiles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FolderAction for ListFiles {
    fn name(&self) -> &'static str {
        "list-files"
    }

    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        folder: &FolderPath,
    ) -> Result<ActionOutcome, StoreError> {
        let names = store.list_items(folder)?;
        self.folders.push((folder.clone(), names.len()));
        for name in names {
            self.items.push(ListedItem {
                id: self.next_id,
                location: Location::new(folder.clone(), name),
            });
            self.next_id += 1;
        }
        Ok(ActionOutcome::Success)
    }
}

/// Collect the subfolders of each visited folder
#[derive(Debug, Default)]
pub struct ListFolders {
    pub folders: Vec<(FolderPath, Vec<String>)>,
}

impl ListFolders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FolderAction for ListFolders {
    fn name(&self) -> &'static str {
        "list-folders"
    }

    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        folder: &FolderPath,
    ) -> Result<ActionOutcome, StoreError> {
        let subfolders = store.list_subfolders(folder)?;
        self.folders.push((folder.clone(), subfolders));
        Ok(ActionOutcome::Success)
    }
}

/// Count the items of each visited folder
#[derive(Debug, Default)]
pub struct CountItems {
    pub total: usize,
}

impl CountItems {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FolderAction for CountItems {
    fn name(&self) -> &'static str {
        "count"
    }

    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        folder: &FolderPath,
    ) -> Result<ActionOutcome, StoreError> {
        self.total += store.list_items(folder)?.len();
        Ok(ActionOutcome::Success)
    }
}

/// Delete every item of each visited folder
///
/// Protected items are left in place by the store.
#[derive(Debug, Default)]
pub struct DeleteAllItems {
    /// Folders the store reported as cleared
    pub cleared: Vec<FolderPath>,
    /// Folders where protected items were left in place
    pub partial: Vec<FolderPath>,
}

impl DeleteAllItems {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FolderAction for DeleteAllItems {
    fn name(&self) -> &'static str {
        "delete-all"
    }

    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        folder: &FolderPath,
    ) -> Result<ActionOutcome, StoreError> {
        let outcome = store.apply_folder_action(folder, FolderActionKind::DeleteAll)?;
        match outcome {
            ActionOutcome::Success => {
                debug!(%folder, "folder cleared");
                self.cleared.push(folder.clone());
            }
            ActionOutcome::NotSupported => self.partial.push(folder.clone()),
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{folder, nested_store};
    use crate::traverse::{Order, TraversalEngine, TraversalOptions};

    const RECURSIVE: TraversalOptions = TraversalOptions {
        recurse: true,
        order: Order::Forward,
    };

    #[test]
    fn test_list_files_numbers_match_identifiers() {
        let mut store = nested_store();
        let mut action = ListFiles::new();
        TraversalEngine::new(&mut store, RECURSIVE)
            .walk(&FolderPath::root(), &mut action)
            .unwrap();

        let listed: Vec<(usize, String)> = action
            .items
            .iter()
            .map(|item| (item.id, item.location.to_string()))
            .collect();
        assert_eq!(
            listed,
            vec![
                (0, "/r1".to_string()),
                (1, "/r2".to_string()),
                (2, "/X/x1".to_string()),
                (3, "/X/x2".to_string()),
                (4, "/X/x3".to_string()),
            ]
        );
        assert_eq!(action.folders, vec![(FolderPath::root(), 2), (folder("/X"), 3)]);
    }

    #[test]
    fn test_list_folders() {
        let mut store = nested_store();
        let mut action = ListFolders::new();
        TraversalEngine::new(&mut store, RECURSIVE)
            .walk(&FolderPath::root(), &mut action)
            .unwrap();
        assert_eq!(
            action.folders,
            vec![(FolderPath::root(), vec!["X".to_string()]), (folder("/X"), vec![])]
        );
    }

    #[test]
    fn test_count_items() {
        let mut store = nested_store();
        let mut action = CountItems::new();
        TraversalEngine::new(&mut store, RECURSIVE)
            .walk(&FolderPath::root(), &mut action)
            .unwrap();
        assert_eq!(action.total, 5);
    }

    #[test]
    fn test_delete_all_recursive() {
        let mut store = nested_store();
        let mut action = DeleteAllItems::new();
        let summary = TraversalEngine::new(&mut store, RECURSIVE)
            .walk(&FolderPath::root(), &mut action)
            .unwrap();
        assert_eq!(store.total_items(), 0);
        assert_eq!(action.cleared.len(), 2);
        assert_eq!(summary.applied, 2);
    }
}
