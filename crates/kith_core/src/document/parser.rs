//! Line-oriented document parser.
//!
//! # Responsibility
//! - Drive the section state machine over the whole document.
//! - Rebuild the three record collections in file order.
//!
//! # Invariants
//! - An empty line always resets the state machine between sections.
//! - Any codec failure is fatal and carries its 1-based line number.
//! - A missing file is a brand-new empty journal, not an error.

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::document::{DocumentError, DocumentResult, SectionKind};
use crate::model::activity::Activity;
use crate::model::friend::Friend;
use crate::model::location::Location;

/// The three ordered collections reconstructed from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub activities: Vec<Activity>,
    pub friends: Vec<Friend>,
    pub locations: Vec<Location>,
}

/// Reads and parses the journal at `path`.
pub fn load_document(path: &Path) -> DocumentResult<ParsedDocument> {
    if !path.exists() {
        debug!(
            "event=document_missing path={} status=empty_journal",
            path.display()
        );
        return Ok(ParsedDocument::default());
    }

    let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_document(&text)?;
    info!(
        "event=document_loaded path={} activities={} friends={} locations={}",
        path.display(),
        document.activities.len(),
        document.friends.len(),
        document.locations.len()
    );
    Ok(document)
}

/// Parses full document text into the three collections.
pub fn parse_document(text: &str) -> DocumentResult<ParsedDocument> {
    let mut document = ParsedDocument::default();
    // `None` is the between-sections state; only headers may follow it.
    let mut state: Option<SectionKind> = None;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        if line.trim().is_empty() {
            state = None;
            continue;
        }

        match state {
            None => match SectionKind::from_header(line) {
                Some(kind) => state = Some(kind),
                None => {
                    return Err(DocumentError::UnexpectedContent {
                        line_number,
                        line: line.to_string(),
                    });
                }
            },
            Some(kind) => {
                append_record(&mut document, kind, line)
                    .map_err(|source| DocumentError::Format {
                        line_number,
                        source,
                    })?;
            }
        }
    }

    Ok(document)
}

fn append_record(
    document: &mut ParsedDocument,
    kind: SectionKind,
    line: &str,
) -> crate::model::RecordResult<()> {
    match kind {
        SectionKind::Activities => document.activities.push(Activity::deserialize(line)?),
        SectionKind::Friends => document.friends.push(Friend::deserialize(line)?),
        SectionKind::Locations => document.locations.push(Location::deserialize(line)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_document;
    use crate::document::DocumentError;

    #[test]
    fn empty_text_yields_empty_collections() {
        let document = parse_document("").expect("empty text should parse");
        assert!(document.activities.is_empty());
        assert!(document.friends.is_empty());
        assert!(document.locations.is_empty());
    }

    #[test]
    fn content_before_any_header_is_fatal() {
        let err = parse_document("- stray line\n").expect_err("stray content must fail");
        match err {
            DocumentError::UnexpectedContent { line_number, .. } => assert_eq!(line_number, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_record_reports_source_line_number() {
        let text = "### Activities:\n- 2015-01-04: Lunch.\n- not a date: nope\n";
        let err = parse_document(text).expect_err("malformed record must fail");
        match err {
            DocumentError::Format { line_number, .. } => assert_eq!(line_number, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
