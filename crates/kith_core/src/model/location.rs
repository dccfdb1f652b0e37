//! Location record: a named place.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::{RecordFormatError, RecordResult};

static LOCATION_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- (.+)$").expect("valid location line regex"));

// Marker characters would make the name unmatchable inside descriptions.
const FORBIDDEN_NAME_CHARS: [char; 3] = ['\n', '*', '_'];

/// A named place entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Canonical name, unique across the journal by exact match.
    pub name: String,
}

impl Location {
    /// Creates a location from a raw name, trimming and validating it.
    pub fn new(name: &str) -> RecordResult<Self> {
        Ok(Self {
            name: validate_name(name)?,
        })
    }

    /// Parses one `- name` line.
    pub fn deserialize(line: &str) -> RecordResult<Self> {
        let caps = LOCATION_LINE_RE
            .captures(line)
            .ok_or_else(|| RecordFormatError::MalformedLocation {
                line: line.to_string(),
            })?;
        Self::new(&caps[1])
    }

    /// Renders the single-line form used by the document.
    pub fn serialize(&self) -> String {
        format!("- {}", self.name)
    }

    /// Canonical ordering: alphabetical, case-insensitive with a
    /// case-sensitive tie-break for determinism.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.name.cmp(&other.name))
    }
}

fn validate_name(raw: &str) -> RecordResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(RecordFormatError::InvalidName {
            name: raw.to_string(),
            reason: "name cannot be empty",
        });
    }
    if name.contains(&FORBIDDEN_NAME_CHARS[..]) {
        return Err(RecordFormatError::InvalidName {
            name: name.to_string(),
            reason: "name cannot contain newlines or marker characters",
        });
    }
    Ok(name.to_string())
}
