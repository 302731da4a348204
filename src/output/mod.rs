//! Output formatting for CLI display
//!
//! Formatting functions return plain strings; callers decide whether to
//! print them. Numbers shown to the user are 1-based.

use colored::Colorize;

use crate::actions::ListedItem;
use crate::store::FolderPath;

/// Header line introducing the files of a folder
#[must_use]
pub fn folder_header(folder: &FolderPath, count: usize) -> String {
    match count {
        0 => format!("There are no files in folder '{folder}'."),
        1 => format!("There is 1 file in folder '{folder}':"),
        n => format!("There are {n} files in folder '{folder}':"),
    }
}

/// Header line introducing the subfolders of a folder
#[must_use]
pub fn subfolder_header(folder: &FolderPath, count: usize) -> String {
    match count {
        0 => format!("There are no folders in folder '{folder}'."),
        1 => format!("There is 1 folder in folder '{folder}':"),
        n => format!("There are {n} folders in folder '{folder}':"),
    }
}

/// Format a listed file with its number
///
/// Quiet output is `<number> <path>`, suitable for scripts.
#[must_use]
pub fn item_line(item: &ListedItem, quiet: bool) -> String {
    if quiet {
        format!("{} {}", item.id + 1, item.location)
    } else {
        format!("#{:<5} {}", item.id + 1, item.location.name)
    }
}

/// Format a subfolder entry
#[must_use]
pub fn subfolder_line(folder: &FolderPath, name: &str, quiet: bool) -> String {
    if quiet {
        folder.join(name).to_string()
    } else {
        format!("  {name}")
    }
}

/// Color a count green when nonzero
#[must_use]
pub fn colorize_count(count: usize) -> String {
    if count == 0 {
        count.to_string().dimmed().to_string()
    } else {
        count.to_string().green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Location;

    fn folder(path: &str) -> FolderPath {
        FolderPath::parse(path).unwrap()
    }

    #[test]
    fn test_folder_header_plurals() {
        let dcim = folder("/DCIM");
        assert_eq!(folder_header(&dcim, 0), "There are no files in folder '/DCIM'.");
        assert_eq!(folder_header(&dcim, 1), "There is 1 file in folder '/DCIM':");
        assert_eq!(folder_header(&dcim, 12), "There are 12 files in folder '/DCIM':");
    }

    #[test]
    fn test_subfolder_header_plurals() {
        let root = FolderPath::root();
        assert_eq!(subfolder_header(&root, 0), "There are no folders in folder '/'.");
        assert_eq!(subfolder_header(&root, 2), "There are 2 folders in folder '/':");
    }

    #[test]
    fn test_item_line_is_one_based() {
        let item = ListedItem {
            id: 0,
            location: Location::new(folder("/DCIM"), "IMG_0001.JPG".to_string()),
        };
        assert_eq!(item_line(&item, false), "#1     IMG_0001.JPG");
        assert_eq!(item_line(&item, true), "1 /DCIM/IMG_0001.JPG");
    }

    #[test]
    fn test_subfolder_line() {
        let root = FolderPath::root();
        assert_eq!(subfolder_line(&root, "DCIM", false), "  DCIM");
        assert_eq!(subfolder_line(&root, "DCIM", true), "/DCIM");
    }
}
