//! Domain records for the relationship journal.
//!
//! # Responsibility
//! - Define the three record kinds stored in the journal document.
//! - Own the per-record line grammar (serialize/deserialize).
//!
//! # Invariants
//! - Every record serializes to exactly one line; no serialized form may
//!   contain a newline.
//! - Record names stay valid for the grammar (checked on construction and
//!   on deserialization, not at write time).

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity;
pub mod friend;
pub mod location;

pub type RecordResult<T> = Result<T, RecordFormatError>;

/// Grammar-level failure for a single record line.
///
/// The document parser wraps this with the 1-based source line number; the
/// codec itself only knows about one line at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFormatError {
    /// Line does not match `- YYYY-MM-DD: description`.
    MalformedActivity { line: String },
    /// Date token matched the shape but is not a real calendar day.
    InvalidDate { value: String },
    /// Line does not match `- name` / `- name (a.k.a. nick, nick)`.
    MalformedFriend { line: String },
    /// Line does not match `- name`.
    MalformedLocation { line: String },
    /// Name or nickname contains characters that break the grammar.
    InvalidName { name: String, reason: &'static str },
}

impl Display for RecordFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedActivity { line } => write!(
                f,
                "not a valid activity line `{line}` (expected `- YYYY-MM-DD: description`)"
            ),
            Self::InvalidDate { value } => write!(f, "invalid activity date `{value}`"),
            Self::MalformedFriend { line } => write!(
                f,
                "not a valid friend line `{line}` (expected `- name` or `- name (a.k.a. nick, nick)`)"
            ),
            Self::MalformedLocation { line } => {
                write!(f, "not a valid location line `{line}` (expected `- name`)")
            }
            Self::InvalidName { name, reason } => write!(f, "invalid name `{name}`: {reason}"),
        }
    }
}

impl Error for RecordFormatError {}
