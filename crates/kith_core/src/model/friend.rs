//! Friend record: a named person with optional nicknames.
//!
//! # Responsibility
//! - Parse and render the friend line grammar.
//! - Enforce name/nickname validity against that grammar.
//!
//! # Invariants
//! - Canonical name uniqueness is owned by the journal, not this type.
//! - Nicknames keep insertion order and never contain duplicates.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::{RecordFormatError, RecordResult};

static FRIEND_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^- ([^(\n]+?)(?: \(a\.k\.a\. ([^)\n]+)\))?$").expect("valid friend line regex")
});

// Characters that would collide with reference markers or the nickname list.
const FORBIDDEN_NAME_CHARS: [char; 6] = ['\n', ',', '*', '_', '(', ')'];

/// A named person entity with optional nicknames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    /// Canonical name, unique across the journal by exact match.
    pub name: String,
    /// Insertion-ordered set of nicknames.
    pub nicknames: Vec<String>,
}

impl Friend {
    /// Creates a friend from a raw name, trimming and validating it.
    pub fn new(name: &str) -> RecordResult<Self> {
        Ok(Self {
            name: validate_name(name)?,
            nicknames: Vec::new(),
        })
    }

    /// Parses one `- name` / `- name (a.k.a. nick, nick)` line.
    pub fn deserialize(line: &str) -> RecordResult<Self> {
        let caps = FRIEND_LINE_RE
            .captures(line)
            .ok_or_else(|| RecordFormatError::MalformedFriend {
                line: line.to_string(),
            })?;

        let name = validate_name(&caps[1])?;
        let mut nicknames = Vec::new();
        if let Some(list) = caps.get(2) {
            for raw in list.as_str().split(',') {
                let nickname = validate_name(raw)?;
                if !nicknames.contains(&nickname) {
                    nicknames.push(nickname);
                }
            }
        }

        Ok(Self { name, nicknames })
    }

    /// Renders the single-line form used by the document.
    pub fn serialize(&self) -> String {
        if self.nicknames.is_empty() {
            format!("- {}", self.name)
        } else {
            format!("- {} (a.k.a. {})", self.name, self.nicknames.join(", "))
        }
    }

    /// Adds a nickname; adding one already present is a no-op.
    pub fn add_nickname(&mut self, nickname: &str) -> RecordResult<()> {
        let nickname = validate_name(nickname)?;
        if !self.nicknames.contains(&nickname) {
            self.nicknames.push(nickname);
        }
        Ok(())
    }

    /// Removes a nickname, reporting whether it was present.
    pub fn remove_nickname(&mut self, nickname: &str) -> bool {
        let trimmed = nickname.trim();
        let before = self.nicknames.len();
        self.nicknames.retain(|n| n != trimmed);
        self.nicknames.len() != before
    }

    /// Whitespace-separated parts of the canonical name.
    pub fn name_tokens(&self) -> impl Iterator<Item = &str> {
        self.name.split_whitespace()
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

/// Trims and validates a name or nickname against the line grammar.
pub fn validate_name(raw: &str) -> RecordResult<String> {
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
            reason: "name cannot contain newlines, commas, parentheses or marker characters",
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{validate_name, Friend};

    #[test]
    fn nickname_add_is_idempotent() {
        let mut friend = Friend::new("Grace Hopper").expect("valid name");
        friend.add_nickname("The Admiral").expect("valid nickname");
        friend.add_nickname(" The Admiral ").expect("valid nickname");
        assert_eq!(friend.nicknames, ["The Admiral"]);
    }

    #[test]
    fn remove_nickname_reports_presence() {
        let mut friend = Friend::new("Grace Hopper").expect("valid name");
        friend.add_nickname("Gracie").expect("valid nickname");
        assert!(friend.remove_nickname("Gracie"));
        assert!(!friend.remove_nickname("Gracie"));
    }

    #[test]
    fn validate_name_rejects_grammar_breakers() {
        assert!(validate_name("  ").is_err());
        assert!(validate_name("A,B").is_err());
        assert!(validate_name("A*B").is_err());
        assert!(validate_name("A_B").is_err());
        assert!(validate_name("A (B)").is_err());
        assert_eq!(validate_name(" Ada Lovelace ").unwrap(), "Ada Lovelace");
    }
}
