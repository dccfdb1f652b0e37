//! Exact and fuzzy record lookup.
//!
//! # Responsibility
//! - Exact lookup: case-sensitive equality, used as the uniqueness gate
//!   before insertions.
//! - Fuzzy lookup: the user's text compiled as a case-insensitive regex,
//!   matched by containment against every record name.
//!
//! # Invariants
//! - Fuzzy lookup succeeds only on exactly one match; the ambiguity error
//!   enumerates every matched name in collection order.
//! - Exact lookup treats zero matches as a benign "absent" signal.

use regex::RegexBuilder;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Failure while resolving free text to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No record name contained a match.
    NotFound { query: String },
    /// More than one record name contained a match.
    Ambiguous { query: String, names: Vec<String> },
    /// The query is not a valid regular expression.
    InvalidPattern { query: String, message: String },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { query } => write!(f, "no match found for \"{query}\""),
            Self::Ambiguous { query, names } => {
                write!(f, "\"{query}\" is ambiguous: {}", names.join(", "))
            }
            Self::InvalidPattern { query, message } => {
                write!(f, "invalid search pattern \"{query}\": {message}")
            }
        }
    }
}

impl Error for ResolveError {}

/// A record addressable by canonical name.
pub trait NamedRecord {
    fn record_name(&self) -> &str;
}

impl NamedRecord for crate::model::friend::Friend {
    fn record_name(&self) -> &str {
        &self.name
    }
}

impl NamedRecord for crate::model::location::Location {
    fn record_name(&self) -> &str {
        &self.name
    }
}

/// Case-sensitive full-string lookup.
///
/// Zero matches is `Ok(None)` so callers can use this as an existence
/// check; duplicates in pre-existing data still surface as ambiguity.
pub fn find_exact<'a, T: NamedRecord>(records: &'a [T], name: &str) -> ResolveResult<Option<&'a T>> {
    let hits: Vec<&T> = records.iter().filter(|r| r.record_name() == name).collect();
    match hits.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some(*single)),
        many => Err(ResolveError::Ambiguous {
            query: name.to_string(),
            names: many.iter().map(|r| r.record_name().to_string()).collect(),
        }),
    }
}

/// Fuzzy lookup returning the index of the single matching record.
///
/// Indexes let mutating callers address the match without holding a
/// borrow across the mutation.
pub fn find_one_index<T: NamedRecord>(records: &[T], query: &str) -> ResolveResult<usize> {
    let pattern = RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .map_err(|err| ResolveError::InvalidPattern {
            query: query.to_string(),
            message: err.to_string(),
        })?;

    let hits: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| pattern.is_match(record.record_name()))
        .map(|(index, _)| index)
        .collect();

    match hits.as_slice() {
        [] => Err(ResolveError::NotFound {
            query: query.to_string(),
        }),
        [single] => Ok(*single),
        many => Err(ResolveError::Ambiguous {
            query: query.to_string(),
            names: many
                .iter()
                .map(|&index| records[index].record_name().to_string())
                .collect(),
        }),
    }
}

/// Fuzzy lookup returning the single matching record.
pub fn find_one<'a, T: NamedRecord>(records: &'a [T], query: &str) -> ResolveResult<&'a T> {
    find_one_index(records, query).map(|index| &records[index])
}

#[cfg(test)]
mod tests {
    use super::{find_exact, find_one, ResolveError};
    use crate::model::friend::Friend;

    fn friends(names: &[&str]) -> Vec<Friend> {
        names
            .iter()
            .map(|name| Friend::new(name).expect("valid test name"))
            .collect()
    }

    #[test]
    fn exact_lookup_is_case_sensitive() {
        let records = friends(&["Grace Hopper"]);
        assert!(find_exact(&records, "Grace Hopper")
            .expect("lookup should not fail")
            .is_some());
        assert!(find_exact(&records, "grace hopper")
            .expect("lookup should not fail")
            .is_none());
    }

    #[test]
    fn fuzzy_lookup_matches_substring_case_insensitively() {
        let records = friends(&["Grace Hopper", "John Cage"]);
        let hit = find_one(&records, "hopper").expect("unique match expected");
        assert_eq!(hit.name, "Grace Hopper");
    }

    #[test]
    fn fuzzy_ambiguity_lists_names_in_collection_order() {
        let records = friends(&["John Cage", "Grace Hopper", "John Lennon"]);
        let err = find_one(&records, "john").expect_err("two matches expected");
        assert_eq!(
            err,
            ResolveError::Ambiguous {
                query: "john".to_string(),
                names: vec!["John Cage".to_string(), "John Lennon".to_string()],
            }
        );
    }

    #[test]
    fn invalid_regex_is_reported_as_such() {
        let records = friends(&["Grace Hopper"]);
        let err = find_one(&records, "gr(ace").expect_err("regex should not compile");
        assert!(matches!(err, ResolveError::InvalidPattern { .. }));
    }
}
