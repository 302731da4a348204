//! Range expressions for selecting items by number
//!
//! Users address items with 1-based numbers rather than paths:
//!
//! - `5` selects the fifth item
//! - `3-7` selects items 3 through 7 inclusive
//! - `10-` selects item 10 and everything after it
//! - `-4` selects items 1 through 4
//!
//! Terms are separated by commas and combined as a set union, so neither
//! their order nor repetition matters. Parsing yields a [`SelectionMask`] of
//! 0-based identifiers.
//!
//! # Examples
//!
//! ```
//! use camsh::range;
//!
//! let mask = range::parse("3,1-2", 100).unwrap();
//! assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
//! ```

pub mod error;
mod mask;

pub use error::RangeError;
pub use mask::SelectionMask;

/// Default number of addressable identifiers
pub const DEFAULT_CAPACITY: usize = 65536;

/// Largest capacity a configuration may ask for
pub const MAX_CAPACITY: usize = 1 << 20;

/// Parse a range expression into a selection mask
///
/// # Errors
///
/// * `RangeError::Empty` if the expression is blank
/// * `RangeError::Malformed` for terms that are not `N`, `A-B`, `A-` or `-B`
/// * `RangeError::OutOfRange` for numbers outside `1..=capacity`
/// * `RangeError::Decreasing` for `A-B` with `B < A`
pub fn parse(expression: &str, capacity: usize) -> Result<SelectionMask, RangeError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(RangeError::Empty);
    }

    let mut mask = SelectionMask::empty(capacity);
    for raw in expression.split(',') {
        match parse_term(raw.trim(), capacity)? {
            Term::Closed(start, end) => mask.insert_span(start, end),
            Term::Open(start) => mask.insert_open(start),
        }
    }
    Ok(mask)
}

/// A single parsed term, already translated to 0-based identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    Closed(usize, usize),
    Open(usize),
}

fn parse_term(term: &str, capacity: usize) -> Result<Term, RangeError> {
    if term.is_empty() {
        return Err(RangeError::Malformed {
            term: term.to_string(),
        });
    }

    let Some((low, high)) = term.split_once('-') else {
        let id = parse_number(term, term, capacity)?;
        return Ok(Term::Closed(id, id));
    };

    match (low.trim(), high.trim()) {
        ("", "") => Err(RangeError::Malformed {
            term: term.to_string(),
        }),
        ("", high) => Ok(Term::Closed(0, parse_number(high, term, capacity)?)),
        (low, "") => Ok(Term::Open(parse_number(low, term, capacity)?)),
        (low, high) => {
            let start = parse_number(low, term, capacity)?;
            let end = parse_number(high, term, capacity)?;
            if end < start {
                return Err(RangeError::Decreasing {
                    term: term.to_string(),
                });
            }
            Ok(Term::Closed(start, end))
        }
    }
}

/// Parse a 1-based user number into a 0-based identifier
fn parse_number(number: &str, term: &str, capacity: usize) -> Result<usize, RangeError> {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::Malformed {
            term: term.to_string(),
        });
    }

    let out_of_range = || RangeError::OutOfRange {
        term: term.to_string(),
        capacity,
    };
    let value: usize = number.parse().map_err(|_| out_of_range())?;
    if value == 0 || value > capacity {
        return Err(out_of_range());
    }
    Ok(value - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(mask: &SelectionMask) -> Vec<usize> {
        mask.iter().collect()
    }

    #[test]
    fn test_single_number() {
        let mask = parse("5", 10).unwrap();
        assert_eq!(ids(&mask), vec![4]);
        assert!(!mask.is_open_ended());
    }

    #[test]
    fn test_closed_range_is_inclusive() {
        let mask = parse("3-7", 10).unwrap();
        assert_eq!(ids(&mask), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_open_upper_bound_runs_to_capacity() {
        let mask = parse("8-", 10).unwrap();
        assert_eq!(ids(&mask), vec![7, 8, 9]);
        assert!(mask.is_open_ended());
        assert_eq!(mask.open_start(), Some(7));
    }

    #[test]
    fn test_open_lower_bound_starts_at_one() {
        let mask = parse("-3", 10).unwrap();
        assert_eq!(ids(&mask), vec![0, 1, 2]);
    }

    #[test]
    fn test_mixed_terms() {
        let mask = parse("3-7,10,15-", 16).unwrap();
        assert_eq!(ids(&mask), vec![2, 3, 4, 5, 6, 9, 14, 15]);
        assert_eq!(mask.explicit_max(), Some(9));
    }

    #[test]
    fn test_whitespace_tolerated() {
        let a = parse("  1 - 3 , 5 ", 10).unwrap();
        let b = parse("1-3,5", 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_overlap_is_idempotent() {
        let a = parse("1-5,3-4,2", 10).unwrap();
        let b = parse("1-5", 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reorder_and_duplicate_terms() {
        assert_eq!(parse("3,1-2", 10).unwrap(), parse("1-2,3,3", 10).unwrap());
    }

    #[test]
    fn test_empty_expression_is_error() {
        assert_eq!(parse("", 10), Err(RangeError::Empty));
        assert_eq!(parse("   ", 10), Err(RangeError::Empty));
    }

    #[test]
    fn test_zero_is_out_of_range() {
        let err = parse("0", 10).unwrap_err();
        assert!(matches!(err, RangeError::OutOfRange { ref term, capacity: 10 } if term == "0"));
    }

    #[test]
    fn test_above_capacity_is_out_of_range() {
        let err = parse("1,11", 10).unwrap_err();
        assert_eq!(err.term(), Some("11"));
        assert!(matches!(err, RangeError::OutOfRange { .. }));
    }

    #[test]
    fn test_overflowing_number_is_out_of_range() {
        let err = parse("99999999999999999999999999", 10).unwrap_err();
        assert!(matches!(err, RangeError::OutOfRange { .. }));
    }

    #[test]
    fn test_malformed_terms() {
        for expression in ["a", "1,,2", "-", "1-2-3", "+3", "3x", "1,"] {
            let err = parse(expression, 10).unwrap_err();
            assert!(
                matches!(err, RangeError::Malformed { .. }),
                "expected malformed for {expression:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_names_offending_term() {
        let err = parse("1-3, 4-x ,7", 10).unwrap_err();
        assert_eq!(err.term(), Some("4-x"));
    }

    #[test]
    fn test_decreasing_range_rejected() {
        let err = parse("7-3", 10).unwrap_err();
        assert_eq!(err, RangeError::Decreasing { term: "7-3".to_string() });
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let mask = parse("10-,1-3,6", 12).unwrap();
        assert_eq!(mask.to_string(), "1-3,6,10-");
        assert_eq!(parse(&mask.to_string(), 12).unwrap(), mask);
    }

    fn term_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (1usize..=50).prop_map(|n| n.to_string()),
            (1usize..=50, 0usize..10).prop_map(|(a, len)| format!("{}-{}", a, (a + len).min(50))),
            (1usize..=50).prop_map(|a| format!("{a}-")),
            (1usize..=50).prop_map(|b| format!("-{b}")),
        ]
    }

    proptest! {
        #[test]
        fn prop_term_order_does_not_matter(terms in prop::collection::vec(term_strategy(), 1..8)) {
            let forward = parse(&terms.join(","), 50).unwrap();
            let mut reversed = terms.clone();
            reversed.reverse();
            let backward = parse(&reversed.join(","), 50).unwrap();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_duplicated_terms_do_not_matter(terms in prop::collection::vec(term_strategy(), 1..8)) {
            let once = parse(&terms.join(","), 50).unwrap();
            let doubled: Vec<String> = terms.iter().chain(terms.iter()).cloned().collect();
            let twice = parse(&doubled.join(","), 50).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_max_id_is_highest_selected(terms in prop::collection::vec(term_strategy(), 1..8)) {
            let mask = parse(&terms.join(","), 50).unwrap();
            prop_assert_eq!(mask.max_id(), mask.iter().last());
        }
    }
}
