//! Range expression error types
//!
//! Every variant carries the offending term so the user can see which part of
//! a long expression such as `1-5,9,x-12` was rejected.

use thiserror::Error;

/// Errors produced while parsing a range expression
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The expression was empty or contained only whitespace
    #[error("Empty range expression")]
    Empty,

    /// A term is not of the form `N`, `A-B`, `A-` or `-B`
    #[error("Malformed range term '{term}'")]
    Malformed { term: String },

    /// A number lies outside `1..=capacity`
    #[error("Range term '{term}' is out of bounds (numbers must be between 1 and {capacity})")]
    OutOfRange { term: String, capacity: usize },

    /// The upper bound of `A-B` is below the lower bound
    #[error("Decreasing range '{term}' is not allowed")]
    Decreasing { term: String },
}

impl RangeError {
    /// The term that caused the error, if any
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Malformed { term } | Self::OutOfRange { term, .. } | Self::Decreasing { term } => {
                Some(term)
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
