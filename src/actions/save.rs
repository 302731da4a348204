//! Download items to the local file system

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::{FilenamePattern, ItemAction};
use crate::store::{ActionOutcome, ItemActionKind, Location, StoreError, StoreView};

/// Save each item into `dest_dir` under a name built from a pattern
///
/// Existing local files are never replaced unless `overwrite` is set; such
/// items are reported as not supported and skipped.
#[derive(Debug)]
pub struct SaveItem {
    dest_dir: PathBuf,
    pattern: FilenamePattern,
    overwrite: bool,
    sequence: usize,
    pub saved: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl SaveItem {
    #[must_use]
    pub fn new(dest_dir: impl Into<PathBuf>, pattern: FilenamePattern, overwrite: bool) -> Self {
        Self {
            dest_dir: dest_dir.into(),
            pattern,
            overwrite,
            sequence: 0,
            saved: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl ItemAction for SaveItem {
    fn name(&self) -> &'static str {
        "save"
    }

    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        location: &Location,
    ) -> Result<ActionOutcome, StoreError> {
        let mut file_name = self.pattern.render(location, self.sequence + 1);
        if file_name.is_empty() || file_name.ends_with('/') {
            warn!(item = %location, pattern = %self.pattern, "pattern gives no filename, using item name");
            file_name = location.name.clone();
        }
        let dest = self.dest_dir.join(file_name);

        if dest.is_dir() {
            warn!(item = %location, dest = %dest.display(), "destination is a directory, skipping");
            self.skipped.push(dest);
            return Ok(ActionOutcome::NotSupported);
        }
        if dest.exists() && !self.overwrite {
            warn!(item = %location, dest = %dest.display(), "local file exists, skipping");
            self.skipped.push(dest);
            return Ok(ActionOutcome::NotSupported);
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        self.sequence += 1;

        let outcome = store.apply_item_action(
            &location.folder,
            &location.name,
            &ItemActionKind::Save { dest: dest.clone() },
        )?;
        match outcome {
            ActionOutcome::Success => {
                debug!(item = %location, dest = %dest.display(), "saved");
                self.saved.push(dest);
            }
            ActionOutcome::NotSupported => self.skipped.push(dest),
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range;
    use crate::store::{FolderPath, MemoryStore};
    use crate::testing::nested_store;
    use crate::traverse::{TraversalEngine, TraversalOptions};
    use tempfile::TempDir;

    #[test]
    fn test_save_selection_with_pattern() {
        let dir = TempDir::new().unwrap();
        let mut store = nested_store();
        let pattern = FilenamePattern::parse("%n-%F%f").unwrap();
        let mut action = SaveItem::new(dir.path(), pattern, false);

        let mask = range::parse("2-3", range::DEFAULT_CAPACITY).unwrap();
        TraversalEngine::new(&mut store, TraversalOptions::default())
            .apply_to_selection(&FolderPath::root(), &mut action, &mask)
            .unwrap();

        assert_eq!(
            action.saved,
            vec![dir.path().join("1-r2"), dir.path().join("2-Xx1")]
        );
        assert_eq!(fs::read_to_string(dir.path().join("2-Xx1")).unwrap(), "x1");
        assert_eq!(store.total_items(), 5);
    }

    #[test]
    fn test_existing_file_is_skipped_without_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("r1"), "local").unwrap();
        let mut store = nested_store();
        let location = Location::new(FolderPath::root(), "r1");

        let mut action = SaveItem::new(dir.path(), FilenamePattern::default(), false);
        let outcome = action.apply(&mut store, &location).unwrap();
        assert_eq!(outcome, ActionOutcome::NotSupported);
        assert_eq!(fs::read_to_string(dir.path().join("r1")).unwrap(), "local");

        let mut action = SaveItem::new(dir.path(), FilenamePattern::default(), true);
        let outcome = action.apply(&mut store, &location).unwrap();
        assert_eq!(outcome, ActionOutcome::Success);
        assert_eq!(fs::read_to_string(dir.path().join("r1")).unwrap(), "r1");
    }

    #[test]
    fn test_empty_rendering_falls_back_to_item_name() {
        let dir = TempDir::new().unwrap();
        let mut store = MemoryStore::new().with_items("/", &["README", "b.jpg"]);
        let mut action = SaveItem::new(dir.path(), FilenamePattern::parse("%C").unwrap(), true);

        let mask = range::parse("1-", range::DEFAULT_CAPACITY).unwrap();
        let summary = TraversalEngine::new(&mut store, TraversalOptions::default())
            .apply_to_selection(&FolderPath::root(), &mut action, &mask)
            .unwrap();

        assert_eq!(summary.applied, 2);
        assert_eq!(
            action.saved,
            vec![dir.path().join("README"), dir.path().join("jpg")]
        );
        assert_eq!(fs::read_to_string(dir.path().join("README")).unwrap(), "README");
    }

    #[test]
    fn test_skipped_items_do_not_use_sequence_numbers() {
        let dir = TempDir::new().unwrap();
        let mut store = nested_store();
        let numbered = FilenamePattern::parse("%n-%f").unwrap();
        let mut action = SaveItem::new(dir.path(), numbered, false);
        fs::write(dir.path().join("1-r1"), "local").unwrap();
        let r1 = Location::new(FolderPath::root(), "r1");
        let r2 = Location::new(FolderPath::root(), "r2");
        assert_eq!(action.apply(&mut store, &r1).unwrap(), ActionOutcome::NotSupported);
        assert_eq!(action.apply(&mut store, &r2).unwrap(), ActionOutcome::Success);
        assert_eq!(action.saved, vec![dir.path().join("1-r2")]);
    }

    #[test]
    fn test_directory_in_the_way_is_skipped_even_with_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("r1")).unwrap();
        let mut store = nested_store();
        let mut action = SaveItem::new(dir.path(), FilenamePattern::default(), true);
        let outcome = action
            .apply(&mut store, &Location::new(FolderPath::root(), "r1"))
            .unwrap();
        assert_eq!(outcome, ActionOutcome::NotSupported);
        assert_eq!(action.skipped, vec![dir.path().join("r1")]);
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let mut store = nested_store();
        let mut action =
            SaveItem::new(dir.path().join("out"), FilenamePattern::parse("%F/%f").unwrap(), false);
        let location = Location::new(FolderPath::parse("/X").unwrap(), "x2");
        action.apply(&mut store, &location).unwrap();
        assert!(dir.path().join("out").join("X").join("x2").is_file());
    }
}
