//! Command implementations
//!
//! Each command takes a store and a [`CommandContext`] holding the settings
//! merged from the config file and the command line.

pub mod delete;
pub mod get;
pub mod info;
pub mod list;
mod summary;

pub use summary::{OperationSummary, confirm};

use crate::{
    CamshError,
    actions::RetryPolicy,
    cli::Cli,
    config::CamshConfig,
    range::{self, SelectionMask},
    store::{FolderPath, StoreView},
    traverse::{CancelToken, Order, TraversalEngine, TraversalOptions},
};

type Result<T> = std::result::Result<T, CamshError>;

/// Effective settings for one command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Start folder
    pub folder: FolderPath,
    pub options: TraversalOptions,
    /// Largest identifier count a range may address
    pub capacity: usize,
    pub quiet: bool,
    pub cancel: CancelToken,
    pub retry: RetryPolicy,
    /// Default save pattern
    pub filename: String,
    pub overwrite: bool,
}

impl CommandContext {
    /// Merge command-line flags over the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns `CamshError::StoreError` if `--folder` is not a valid path.
    pub fn resolve(cli: &Cli, config: &CamshConfig, cancel: CancelToken) -> Result<Self> {
        let folder = FolderPath::parse(cli.folder.as_deref().unwrap_or(&config.folder))?;
        let recurse = cli.recurse_override().unwrap_or(config.recurse);
        Ok(Self {
            folder,
            options: TraversalOptions {
                recurse,
                order: Order::from_reverse(cli.reverse_override().unwrap_or(config.reverse)),
            },
            capacity: config.capacity,
            quiet: cli.quiet || config.quiet,
            cancel,
            retry: config.retry_policy(),
            filename: config.filename.clone(),
            overwrite: config.overwrite,
        })
    }

    /// Engine over `store` with this context's options and cancel token
    pub fn engine<'s>(&self, store: &'s mut dyn StoreView) -> TraversalEngine<'s> {
        TraversalEngine::new(store, self.options).with_cancel(self.cancel.clone())
    }

    /// Parse a range expression against the configured capacity
    ///
    /// # Errors
    ///
    /// Returns `CamshError::RangeError` for malformed or out-of-range terms.
    pub fn selection(&self, expression: &str) -> Result<SelectionMask> {
        Ok(range::parse(expression, self.capacity)?)
    }

    /// Every identifier below the start folder
    #[must_use]
    pub fn everything(&self) -> SelectionMask {
        SelectionMask::open_from(0, self.capacity)
    }

    /// Human description of the traversal scope
    #[must_use]
    pub fn scope(&self) -> String {
        if self.options.recurse {
            format!("'{}' and its subfolders", self.folder)
        } else {
            format!("'{}'", self.folder)
        }
    }
}

#[cfg(test)]
impl CommandContext {
    /// Quiet context over `/` with default settings
    pub fn quiet_default() -> Self {
        Self {
            folder: FolderPath::root(),
            options: TraversalOptions::default(),
            capacity: range::DEFAULT_CAPACITY,
            quiet: true,
            cancel: CancelToken::new(),
            retry: RetryPolicy::none(),
            filename: crate::actions::filename::DEFAULT_PATTERN.to_string(),
            overwrite: false,
        }
    }
}
