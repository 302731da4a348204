//! camsh - select and act on camera files by number
//!
//! Items on a camera (or a copy of its card) are addressed by their position
//! in a depth-first listing of the folder tree rather than by path. A range
//! expression such as `3-7,10,15-` picks items, and the traversal engine
//! applies an action (save, delete, describe) to each of them, keeping the
//! numbering consistent while a forward delete removes items underneath it.

use thiserror::Error;

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod range;
pub mod resolve;
pub mod store;
pub mod traverse;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum CamshError {
    /// Malformed or out-of-range range expression
    #[error("Range error: {0}")]
    RangeError(#[from] range::RangeError),
    /// Store failure outside a traversal
    #[error("Store error: {0}")]
    StoreError(#[from] store::StoreError),
    /// Identifier could not be resolved
    #[error("{0}")]
    ResolveError(#[from] resolve::ResolveError),
    /// Traversal stopped
    #[error("{0}")]
    TraverseError(#[from] traverse::TraverseError),
    /// Invalid local filename pattern
    #[error("Filename pattern error: {0}")]
    FilenameError(#[from] actions::FilenameError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Logging could not be set up
    #[error("Logging error: {0}")]
    LoggingError(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
