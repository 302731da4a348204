//! Identifier resolution
//!
//! An identifier is the position of an item in the canonical enumeration of
//! a store: depth-first pre-order where each folder contributes its own items
//! (in store order) before any of its subfolders (also in store order).
//!
//! ```text
//! /            a.jpg -> 0   b.jpg -> 1
//! /X           c.jpg -> 2   d.jpg -> 3
//! /X/Y         e.jpg -> 4
//! /Z           f.jpg -> 5
//! ```
//!
//! Nothing is cached. Every resolution replays the listings, so an identifier
//! always refers to the current contents of the store.

pub mod error;

pub use error::ResolveError;

use tracing::trace;

use crate::store::{FolderPath, Location, StoreError, StoreView};

/// Outcome of searching one subtree
enum Lookup {
    Found(Location),
    NotInSubtree,
}

/// Map `id` to the item it names below `root`
///
/// Without `recurse` only the items directly inside `root` are numbered.
///
/// # Errors
///
/// * `ResolveError::Bounds` if fewer than `id + 1` items are reachable,
///   carrying the number that were
/// * `ResolveError::Store` if a listing fails
pub fn resolve<S: StoreView + ?Sized>(
    store: &S,
    root: &FolderPath,
    id: usize,
    recurse: bool,
) -> Result<Location, ResolveError> {
    if !recurse {
        let mut items = store.list_items(root)?;
        if id < items.len() {
            return Ok(Location::new(root.clone(), items.swap_remove(id)));
        }
        return Err(ResolveError::Bounds {
            id,
            total: items.len(),
            folder: root.clone(),
        });
    }

    let mut base = 0;
    match search(store, root, id, &mut base)? {
        Lookup::Found(location) => {
            trace!(id, %location, "resolved");
            Ok(location)
        }
        Lookup::NotInSubtree => Err(ResolveError::Bounds {
            id,
            total: base,
            folder: root.clone(),
        }),
    }
}

/// Search `folder` and its subtree, advancing `base` past every item skipped
fn search<S: StoreView + ?Sized>(
    store: &S,
    folder: &FolderPath,
    id: usize,
    base: &mut usize,
) -> Result<Lookup, StoreError> {
    let mut items = store.list_items(folder)?;
    let offset = id - *base;
    if offset < items.len() {
        let name = items.swap_remove(offset);
        return Ok(Lookup::Found(Location::new(folder.clone(), name)));
    }
    *base += items.len();

    for subfolder in store.list_subfolders(folder)? {
        if let Lookup::Found(location) = search(store, &folder.join(&subfolder), id, base)? {
            return Ok(Lookup::Found(location));
        }
    }
    Ok(Lookup::NotInSubtree)
}

/// Number of items reachable from `root` in canonical enumeration
///
/// # Errors
///
/// Returns `StoreError` if a listing fails.
pub fn count_items<S: StoreView + ?Sized>(
    store: &S,
    root: &FolderPath,
    recurse: bool,
) -> Result<usize, StoreError> {
    let mut total = store.list_items(root)?.len();
    if recurse {
        for subfolder in store.list_subfolders(root)? {
            total += count_items(store, &root.join(&subfolder), true)?;
        }
    }
    Ok(total)
}
