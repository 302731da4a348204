//! Traversal engine
//!
//! Two modes share one engine:
//!
//! - [`TraversalEngine::walk`] applies a [`FolderAction`] to a folder and,
//!   when recursing, to every folder below it
//! - [`TraversalEngine::apply_to_selection`] applies an [`ItemAction`] to the
//!   items named by a [`SelectionMask`]
//!
//! # Destructive actions
//!
//! Identifiers are positions, so deleting an item renumbers everything after
//! it. Going forward, the engine counts successful destructive applications
//! and resolves identifier `i` as `i - consumed`. Going in reverse, the
//! highest identifier is handled first and lower identifiers never move, so
//! no adjustment is needed.
//!
//! ```text
//! items [a b c d e], selection {0, 2, 4}, delete
//!
//! forward:  0 -> a   (consumed 1)   2-1 -> c   (consumed 2)   4-2 -> e
//! reverse:  4 -> e   2 -> c   0 -> a
//! ```

mod cancel;
pub mod error;

pub use cancel::{CancelToken, install_ctrlc_handler};
pub use error::TraverseError;

use tracing::{debug, info, warn};

use crate::actions::{FolderAction, ItemAction};
use crate::range::SelectionMask;
use crate::resolve::{self, ResolveError};
use crate::store::{ActionOutcome, FolderPath, StoreView};

type Result<T> = std::result::Result<T, TraverseError>;

/// Processing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Store order, lowest identifier first
    #[default]
    Forward,
    /// Reverse store order, highest identifier first
    Reverse,
}

impl Order {
    #[must_use]
    pub const fn from_reverse(reverse: bool) -> Self {
        if reverse { Self::Reverse } else { Self::Forward }
    }
}

/// How a traversal visits the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    pub recurse: bool,
    pub order: Order,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            recurse: true,
            order: Order::Forward,
        }
    }
}

/// What a traversal did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Actions that completed
    pub applied: usize,
    /// Actions that did not apply to their item or folder
    pub not_supported: usize,
    /// Folders visited by a walk
    pub visited_folders: usize,
}

impl TraversalSummary {
    fn record(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Success => self.applied += 1,
            ActionOutcome::NotSupported => self.not_supported += 1,
        }
    }
}

/// Applies actions to a store
pub struct TraversalEngine<'s> {
    store: &'s mut dyn StoreView,
    options: TraversalOptions,
    cancel: CancelToken,
}

impl<'s> TraversalEngine<'s> {
    pub fn new(store: &'s mut dyn StoreView, options: TraversalOptions) -> Self {
        Self {
            store,
            options,
            cancel: CancelToken::new(),
        }
    }

    /// Poll `cancel` between items and folders
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub const fn options(&self) -> TraversalOptions {
        self.options
    }

    /// Apply `action` to `root` and, when recursing, to each folder below it
    ///
    /// Each folder is handled before its subfolders. Subfolders are visited in
    /// store order, or in reverse store order when the order is reversed.
    ///
    /// # Errors
    ///
    /// Stops at the first failing listing or action, or when cancelled.
    pub fn walk(
        &mut self,
        root: &FolderPath,
        action: &mut dyn FolderAction,
    ) -> Result<TraversalSummary> {
        let mut summary = TraversalSummary::default();
        self.walk_folder(root, action, &mut summary)?;
        info!(
            action = action.name(),
            folders = summary.visited_folders,
            applied = summary.applied,
            "walk finished"
        );
        Ok(summary)
    }

    fn walk_folder(
        &mut self,
        folder: &FolderPath,
        action: &mut dyn FolderAction,
        summary: &mut TraversalSummary,
    ) -> Result<()> {
        self.cancel.check()?;
        debug!(action = action.name(), %folder, "visiting folder");

        let outcome = action.apply(&mut *self.store, folder)?;
        if outcome == ActionOutcome::NotSupported {
            warn!(action = action.name(), %folder, "not supported for folder");
        }
        summary.record(outcome);
        summary.visited_folders += 1;

        if !self.options.recurse {
            return Ok(());
        }

        let mut subfolders = self.store.list_subfolders(folder)?;
        if self.options.order == Order::Reverse {
            subfolders.reverse();
        }
        for name in subfolders {
            self.walk_folder(&folder.join(&name), action, summary)?;
        }
        Ok(())
    }

    /// Apply `action` to every item selected by `mask`
    ///
    /// Before anything runs, the items below `root` are counted. An explicit
    /// identifier past the last item fails the whole command with
    /// `ResolveError::Bounds`; an open-ended selection (`A-`) is clamped to
    /// the last item instead.
    ///
    /// # Errors
    ///
    /// * `TraverseError::Resolve` for out-of-range identifiers
    /// * `TraverseError::Store` at the first failing listing or action
    /// * `TraverseError::Cancelled` when cancelled between items
    pub fn apply_to_selection(
        &mut self,
        root: &FolderPath,
        action: &mut dyn ItemAction,
        mask: &SelectionMask,
    ) -> Result<TraversalSummary> {
        let mut summary = TraversalSummary::default();
        if mask.is_empty() {
            debug!(action = action.name(), "empty selection");
            return Ok(summary);
        }

        let ids = self.selected_ids(root, mask)?;
        info!(
            action = action.name(),
            selection = %mask,
            items = ids.len(),
            order = ?self.options.order,
            "applying to selection"
        );

        let destructive = action.is_destructive();
        let mut consumed = 0;
        for id in ids {
            self.cancel.check()?;

            let target = match self.options.order {
                Order::Forward => id - consumed,
                Order::Reverse => id,
            };
            let location = resolve::resolve(&*self.store, root, target, self.options.recurse)?;
            debug!(action = action.name(), id, target, %location, "applying");

            let outcome = action.apply(&mut *self.store, &location)?;
            match outcome {
                ActionOutcome::Success if destructive && self.options.order == Order::Forward => {
                    consumed += 1;
                }
                ActionOutcome::Success => {}
                ActionOutcome::NotSupported => {
                    warn!(action = action.name(), %location, "not supported for item");
                }
            }
            summary.record(outcome);
        }

        info!(
            action = action.name(),
            applied = summary.applied,
            not_supported = summary.not_supported,
            "selection finished"
        );
        Ok(summary)
    }

    /// Identifiers to process, in processing order
    fn selected_ids(&self, root: &FolderPath, mask: &SelectionMask) -> Result<Vec<usize>> {
        let total = resolve::count_items(&*self.store, root, self.options.recurse)?;
        let out_of_bounds = |id: usize| ResolveError::Bounds {
            id,
            total,
            folder: root.clone(),
        };

        if let Some(max) = mask.explicit_max()
            && max >= total
        {
            return Err(out_of_bounds(max).into());
        }
        if let Some(start) = mask.open_start()
            && start >= total
        {
            return Err(out_of_bounds(start).into());
        }

        // total > 0 here: a non-empty mask on an empty store fails above
        let ceiling = total.saturating_sub(1);
        let ids = mask.iter_to(ceiling);
        Ok(match self.options.order {
            Order::Forward => ids.collect(),
            Order::Reverse => ids.rev().collect(),
        })
    }
}
