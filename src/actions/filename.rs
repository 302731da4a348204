//! Local filename patterns for saved items
//!
//! | Specifier | Expands to                                   |
//! |-----------|----------------------------------------------|
//! | `%f`      | item name without extension                  |
//! | `%C`      | item extension                               |
//! | `%n`      | 1-based number of the save within the command|
//! | `%F`      | store folder, `/` replaced by `_`            |
//! | `%%`      | a literal `%`                                |
//!
//! A trailing `.` left by an empty `%C` is dropped, so `%f.%C` renders
//! `README` as `README` rather than `README.`.

use std::fmt;

use thiserror::Error;

use crate::store::Location;

/// Default pattern: keep the item's own name
pub const DEFAULT_PATTERN: &str = "%f.%C";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilenameError {
    #[error("Filename pattern is empty")]
    Empty,

    #[error("Unknown filename specifier '%{0}'")]
    UnknownSpecifier(char),

    #[error("Filename pattern ends with a lone '%'")]
    Dangling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Stem,
    Extension,
    Sequence,
    Folder,
}

/// Parsed filename pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePattern {
    source: String,
    segments: Vec<Segment>,
}

impl FilenamePattern {
    /// # Errors
    ///
    /// Returns `FilenameError` for empty patterns, unknown specifiers and a
    /// trailing `%`.
    pub fn parse(pattern: &str) -> Result<Self, FilenameError> {
        if pattern.is_empty() {
            return Err(FilenameError::Empty);
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let segment = match chars.next().ok_or(FilenameError::Dangling)? {
                '%' => {
                    literal.push('%');
                    continue;
                }
                'f' => Segment::Stem,
                'C' => Segment::Extension,
                'n' => Segment::Sequence,
                'F' => Segment::Folder,
                other => return Err(FilenameError::UnknownSpecifier(other)),
            };
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// Local filename for `location`, the `sequence`-th item saved
    ///
    /// Trailing dots and leading separators are dropped, so the result is
    /// relative and may be empty.
    #[must_use]
    pub fn render(&self, location: &Location, sequence: usize) -> String {
        let (stem, extension) = split_name(&location.name);
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Stem => rendered.push_str(stem),
                Segment::Extension => rendered.push_str(extension),
                Segment::Sequence => rendered.push_str(&sequence.to_string()),
                Segment::Folder => {
                    let folder: Vec<&str> = location.folder.components().collect();
                    rendered.push_str(&folder.join("_"));
                }
            }
        }
        while rendered.ends_with('.') {
            rendered.pop();
        }
        rendered.trim_start_matches('/').to_string()
    }
}

impl Default for FilenamePattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_PATTERN.to_string(),
            segments: vec![
                Segment::Stem,
                Segment::Literal(".".to_string()),
                Segment::Extension,
            ],
        }
    }
}

impl fmt::Display for FilenamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split at the last dot; dotfiles keep their leading dot in the stem
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => (&name[..index], &name[index + 1..]),
        _ => (name, ""),
    }
}
