//! Describe items without touching them

use std::fmt;

use byte_unit::{Byte, UnitType};
use chrono::Local;

use super::ItemAction;
use crate::store::{ActionOutcome, ItemInfo, Location, StoreError, StoreView};

/// Metadata of one described item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub location: Location,
    pub info: ItemInfo,
}

impl Description {
    /// Size in binary units, e.g. `2 KiB`
    #[must_use]
    pub fn human_size(&self) -> String {
        Byte::from_u64(self.info.size)
            .get_appropriate_unit(UnitType::Binary)
            .to_string()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Item: {}", self.location)?;
        writeln!(f, "  Folder: {}", self.location.folder)?;
        writeln!(f, "  Size: {} ({} bytes)", self.human_size(), self.info.size)?;
        if let Some(modified) = self.info.modified {
            let local = modified.with_timezone(&Local);
            writeln!(f, "  Modified: {}", local.format("%Y-%m-%d %H:%M:%S"))?;
        }
        writeln!(f, "  Type: {}", self.info.mime_type)?;
        let permissions = if self.info.read_only {
            "read-only"
        } else {
            "read/write"
        };
        write!(f, "  Permissions: {permissions}")
    }
}

/// Collect metadata for each item
#[derive(Debug, Default)]
pub struct DescribeItem {
    pub descriptions: Vec<Description>,
}

impl DescribeItem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemAction for DescribeItem {
    fn name(&self) -> &'static str {
        "describe"
    }

    fn apply(
        &mut self,
        store: &mut dyn StoreView,
        location: &Location,
    ) -> Result<ActionOutcome, StoreError> {
        let info = store.item_info(&location.folder, &location.name)?;
        self.descriptions.push(Description {
            location: location.clone(),
            info,
        });
        Ok(ActionOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FolderPath, MemoryStore};

    #[test]
    fn test_describe_collects_info() {
        let mut store = MemoryStore::new();
        let folder = FolderPath::parse("/DCIM").unwrap();
        store.add_folder(&folder);
        store.add_item(&folder, "IMG_0001.JPG", vec![0u8; 2048]).unwrap();
        store.set_read_only(&folder, "IMG_0001.JPG", true).unwrap();

        let mut action = DescribeItem::new();
        let location = Location::new(folder, "IMG_0001.JPG");
        action.apply(&mut store, &location).unwrap();

        let description = &action.descriptions[0];
        assert_eq!(description.info.size, 2048);
        assert!(description.human_size().contains("KiB"));

        let text = description.to_string();
        assert!(text.starts_with("Item: /DCIM/IMG_0001.JPG"));
        assert!(text.contains("(2048 bytes)"));
        assert!(text.contains("Type: image/jpeg"));
        assert!(text.contains("Permissions: read-only"));
        assert!(!text.contains("Modified"));
    }

    #[test]
    fn test_missing_item_fails() {
        let mut store = MemoryStore::new();
        let mut action = DescribeItem::new();
        let location = Location::new(FolderPath::root(), "ghost.jpg");
        assert!(action.apply(&mut store, &location).is_err());
        assert!(action.descriptions.is_empty());
    }
}
