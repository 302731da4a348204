//! Fixed-capacity selection mask over item identifiers

use std::fmt;

/// Set of selected identifiers in `0..capacity`
///
/// Built once per command from a range expression and not modified afterwards.
/// The highest set bit is the iteration ceiling. A mask built from an
/// open-ended term (`A-`) remembers where the open run starts so the ceiling
/// can later be clamped against the real number of items in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMask {
    bits: Vec<bool>,
    max_id: Option<usize>,
    open_from: Option<usize>,
}

impl SelectionMask {
    /// An empty, valid selection
    #[must_use]
    pub fn empty(capacity: usize) -> Self {
        Self {
            bits: vec![false; capacity],
            max_id: None,
            open_from: None,
        }
    }

    /// Every identifier from `start` up to the capacity, i.e. the term `start+1-`
    #[must_use]
    pub fn open_from(start: usize, capacity: usize) -> Self {
        let mut mask = Self::empty(capacity);
        mask.insert_open(start);
        mask
    }

    /// Select a single identifier; returns false if it exceeds the capacity
    pub fn insert(&mut self, id: usize) -> bool {
        let Some(bit) = self.bits.get_mut(id) else {
            return false;
        };
        *bit = true;
        self.max_id = Some(self.max_id.map_or(id, |max| max.max(id)));
        true
    }

    /// Select the inclusive span `start..=end`
    pub(crate) fn insert_span(&mut self, start: usize, end: usize) {
        for id in start..=end {
            self.insert(id);
        }
    }

    /// Select everything from `start` to the end of the mask
    pub(crate) fn insert_open(&mut self, start: usize) {
        if start >= self.bits.len() {
            return;
        }
        self.insert_span(start, self.bits.len() - 1);
        self.open_from = Some(self.open_from.map_or(start, |from| from.min(start)));
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn contains(&self, id: usize) -> bool {
        self.bits.get(id).copied().unwrap_or(false)
    }

    /// Highest selected identifier, `None` for an empty mask
    #[must_use]
    pub const fn max_id(&self) -> Option<usize> {
        self.max_id
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.max_id.is_none()
    }

    /// Whether the selection runs to the capacity because of an `A-` term
    #[must_use]
    pub const fn is_open_ended(&self) -> bool {
        self.open_from.is_some()
    }

    /// First identifier of the open-ended run, if any
    #[must_use]
    pub const fn open_start(&self) -> Option<usize> {
        self.open_from
    }

    /// Highest identifier selected by a closed term
    ///
    /// Identifiers covered by the open-ended run are excluded, since they are
    /// only an upper bound and not something the user named explicitly.
    #[must_use]
    pub fn explicit_max(&self) -> Option<usize> {
        match self.open_from {
            None => self.max_id,
            Some(from) => (0..from).rev().find(|id| self.bits[*id]),
        }
    }

    /// Number of selected identifiers
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    /// Selected identifiers in ascending order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        let end = self.max_id.map_or(0, |max| max + 1);
        (0..end).filter(move |id| self.bits[*id])
    }

    /// Selected identifiers up to and including `ceiling`, ascending
    pub fn iter_to(&self, ceiling: usize) -> impl DoubleEndedIterator<Item = usize> + '_ {
        let end = self.max_id.map_or(0, |max| max.min(ceiling) + 1);
        (0..end).filter(move |id| self.bits[*id])
    }
}

impl fmt::Display for SelectionMask {
    /// Renders the mask as a canonical 1-based range expression (`1-3,7,10-`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = Vec::new();
        let mut ids = self.iter().peekable();
        while let Some(start) = ids.next() {
            let mut end = start;
            while ids.peek() == Some(&(end + 1)) {
                end += 1;
                ids.next();
            }
            let term = if self.open_from.is_some_and(|from| from <= start)
                && end + 1 == self.capacity()
            {
                format!("{}-", start + 1)
            } else if start == end {
                format!("{}", start + 1)
            } else {
                format!("{}-{}", start + 1, end + 1)
            };
            terms.push(term);
        }
        write!(f, "{}", terms.join(","))
    }
}
