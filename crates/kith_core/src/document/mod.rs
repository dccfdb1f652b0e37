//! Journal document storage boundary.
//!
//! # Responsibility
//! - Define the fixed section layout of the plain-text document.
//! - Surface parse/write failures as typed, line-addressed errors.
//!
//! # Invariants
//! - Section order is always Activities, Friends, Locations.
//! - Exactly one blank line separates consecutive sections.
//! - A parse failure aborts loading; no partial model escapes.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::model::RecordFormatError;

pub mod parser;
pub mod writer;

pub const ACTIVITIES_HEADER: &str = "### Activities:";
pub const FRIENDS_HEADER: &str = "### Friends:";
pub const LOCATIONS_HEADER: &str = "### Locations:";

/// The three record sections, each bound to its codec and collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Activities,
    Friends,
    Locations,
}

const SECTION_TABLE: [(&str, SectionKind); 3] = [
    (ACTIVITIES_HEADER, SectionKind::Activities),
    (FRIENDS_HEADER, SectionKind::Friends),
    (LOCATIONS_HEADER, SectionKind::Locations),
];

impl SectionKind {
    /// Looks the section up by its literal header line.
    pub fn from_header(line: &str) -> Option<Self> {
        SECTION_TABLE
            .iter()
            .find(|(header, _)| *header == line)
            .map(|(_, kind)| *kind)
    }

    /// The literal header introducing this section.
    pub fn header(self) -> &'static str {
        match self {
            Self::Activities => ACTIVITIES_HEADER,
            Self::Friends => FRIENDS_HEADER,
            Self::Locations => LOCATIONS_HEADER,
        }
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Failure while reading or writing the journal document.
#[derive(Debug)]
pub enum DocumentError {
    /// Underlying filesystem failure.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A record line could not be parsed; 1-based line number.
    Format {
        line_number: usize,
        source: RecordFormatError,
    },
    /// Non-empty content outside any section; 1-based line number.
    UnexpectedContent { line_number: usize, line: String },
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access journal `{}`: {source}", path.display())
            }
            Self::Format {
                line_number,
                source,
            } => write!(f, "line {line_number}: {source}"),
            Self::UnexpectedContent { line_number, line } => write!(
                f,
                "line {line_number}: content outside of any section: `{line}`"
            ),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format { source, .. } => Some(source),
            Self::UnexpectedContent { .. } => None,
        }
    }
}
