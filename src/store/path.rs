//! Folder paths inside a store
//!
//! Store paths are plain `/`-separated strings rooted at `/`, independent of
//! the host platform's path rules. They are immutable values: descending into
//! a subfolder produces a new path and leaves the parent untouched.

use std::fmt;

use super::error::StoreError;

/// Separator between folder components
pub const SEPARATOR: char = '/';

/// An absolute folder path inside a store (`/`, `/DCIM`, `/DCIM/100CANON`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderPath(String);

impl FolderPath {
    /// The store root, `/`
    #[must_use]
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Normalize user input into a folder path
    ///
    /// A missing leading separator is added, repeated and trailing separators
    /// are collapsed. `.` and `..` components are rejected because stores have
    /// no notion of relative navigation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidPath` for `.`/`..` components.
    pub fn parse(input: &str) -> Result<Self, StoreError> {
        let mut path = Self::root();
        for component in input.trim().split(SEPARATOR).filter(|c| !c.is_empty()) {
            if component == "." || component == ".." {
                return Err(StoreError::InvalidPath(format!(
                    "'{input}' contains a relative component"
                )));
            }
            path = path.join(component);
        }
        Ok(path)
    }

    /// Append a child name, inserting exactly one separator
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        let mut joined = String::with_capacity(self.0.len() + name.len() + 1);
        joined.push_str(&self.0);
        if !joined.ends_with(SEPARATOR) {
            joined.push(SEPARATOR);
        }
        joined.push_str(name);
        Self(joined)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Non-empty components from the root down
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|c| !c.is_empty())
    }

    /// Last component, `None` for the root
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.components().last()
    }
}

impl Default for FolderPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A concrete item: the folder it lives in plus its name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub folder: FolderPath,
    pub name: String,
}

impl Location {
    #[must_use]
    pub fn new(folder: FolderPath, name: impl Into<String>) -> Self {
        Self {
            folder,
            name: name.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder.join(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let root = FolderPath::root();
        assert_eq!(root.as_str(), "/");
        assert!(root.is_root());
        assert_eq!(root.name(), None);
    }

    #[test]
    fn test_join_from_root_adds_no_double_separator() {
        assert_eq!(FolderPath::root().join("DCIM").as_str(), "/DCIM");
    }

    #[test]
    fn test_join_nested() {
        let path = FolderPath::root().join("DCIM").join("100CANON");
        assert_eq!(path.as_str(), "/DCIM/100CANON");
        assert_eq!(path.name(), Some("100CANON"));
        assert_eq!(path.components().collect::<Vec<_>>(), vec!["DCIM", "100CANON"]);
    }

    #[test]
    fn test_join_leaves_parent_untouched() {
        let parent = FolderPath::parse("/DCIM").unwrap();
        let _child = parent.join("101CANON");
        assert_eq!(parent.as_str(), "/DCIM");
    }

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(FolderPath::parse("DCIM//100CANON/").unwrap().as_str(), "/DCIM/100CANON");
        assert_eq!(FolderPath::parse("").unwrap(), FolderPath::root());
        assert_eq!(FolderPath::parse("///").unwrap(), FolderPath::root());
    }

    #[test]
    fn test_parse_rejects_relative_components() {
        assert!(matches!(FolderPath::parse("/DCIM/../etc"), Err(StoreError::InvalidPath(_))));
        assert!(matches!(FolderPath::parse("./DCIM"), Err(StoreError::InvalidPath(_))));
    }

    #[test]
    fn test_location_display() {
        let root_item = Location::new(FolderPath::root(), "a.jpg");
        assert_eq!(root_item.to_string(), "/a.jpg");
        let nested = Location::new(FolderPath::parse("/X").unwrap(), "b.jpg");
        assert_eq!(nested.to_string(), "/X/b.jpg");
    }
}
