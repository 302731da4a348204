//! Resolution error types

use thiserror::Error;

use crate::store::{FolderPath, StoreError};

/// Errors produced while mapping an identifier to a location
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The identifier is past the last item reachable from `folder`
    #[error("{}", bounds_message(*id, *total, folder))]
    Bounds {
        id: usize,
        total: usize,
        folder: FolderPath,
    },

    /// A listing failed while searching
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// Number of items found when the identifier was out of bounds
    #[must_use]
    pub const fn total(&self) -> Option<usize> {
        match self {
            Self::Bounds { total, .. } => Some(*total),
            Self::Store(_) => None,
        }
    }
}

fn bounds_message(id: usize, total: usize, folder: &FolderPath) -> String {
    let number = id.saturating_add(1);
    match total {
        0 => format!("There are no files in folder '{folder}'"),
        1 => format!("Bad file number {number}: there is only one file in folder '{folder}'"),
        n => format!("Bad file number {number}: there are only {n} files in folder '{folder}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(id: usize, total: usize) -> ResolveError {
        ResolveError::Bounds {
            id,
            total,
            folder: FolderPath::parse("/DCIM").unwrap(),
        }
    }

    #[test]
    fn test_bounds_message_no_files() {
        assert_eq!(bounds(0, 0).to_string(), "There are no files in folder '/DCIM'");
    }

    #[test]
    fn test_bounds_message_one_file() {
        assert_eq!(
            bounds(3, 1).to_string(),
            "Bad file number 4: there is only one file in folder '/DCIM'"
        );
    }

    #[test]
    fn test_bounds_message_many_files() {
        assert_eq!(
            bounds(5, 5).to_string(),
            "Bad file number 6: there are only 5 files in folder '/DCIM'"
        );
        assert_eq!(bounds(5, 5).total(), Some(5));
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error = ResolveError::from(StoreError::NotFound("/X".to_string()));
        assert_eq!(error.to_string(), "Not found: /X");
        assert_eq!(error.total(), None);
    }
}
