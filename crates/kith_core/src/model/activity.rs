//! Activity record: one dated journal entry.
//!
//! # Responsibility
//! - Parse and render the activity line grammar.
//! - Derive referenced friend/location names from description markers.
//!
//! # Invariants
//! - `**Name**` marks a friend reference, `_Name_` marks a location
//!   reference; both are re-derived from the description on demand and
//!   never stored separately.
//! - Canonical ordering is date descending, then description ascending.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::{RecordFormatError, RecordResult};

/// Calendar-day format used by the line grammar.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static ACTIVITY_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^- (\d{4}-\d{2}-\d{2}): (.+)$").expect("valid activity line regex")
});
static FRIEND_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid friend reference regex"));
static LOCATION_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([^_\n]+)_").expect("valid location reference regex"));

/// A dated, described event optionally referencing friends and locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Calendar day, no time component.
    pub date: NaiveDate,
    /// Free text with optional embedded reference markers.
    pub description: String,
}

impl Activity {
    /// Parses one `- YYYY-MM-DD: description` line.
    pub fn deserialize(line: &str) -> RecordResult<Self> {
        let caps = ACTIVITY_LINE_RE
            .captures(line)
            .ok_or_else(|| RecordFormatError::MalformedActivity {
                line: line.to_string(),
            })?;
        let date_text = &caps[1];
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).map_err(|_| {
            RecordFormatError::InvalidDate {
                value: date_text.to_string(),
            }
        })?;

        Ok(Self {
            date,
            description: caps[2].to_string(),
        })
    }

    /// Renders the single-line form used by the document.
    pub fn serialize(&self) -> String {
        format!("- {}: {}", self.date.format(DATE_FORMAT), self.description)
    }

    /// Returns the user-facing form, without the list dash.
    pub fn display_text(&self) -> String {
        format!("{}: {}", self.date.format(DATE_FORMAT), self.description)
    }

    /// Friend names referenced by `**Name**` markers, in description order.
    pub fn friend_names(&self) -> Vec<String> {
        FRIEND_REF_RE
            .captures_iter(&self.description)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Location names referenced by `_Name_` markers, in description order.
    pub fn location_names(&self) -> Vec<String> {
        LOCATION_REF_RE
            .captures_iter(&self.description)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Whether this activity references the friend by canonical name.
    pub fn references_friend(&self, name: &str) -> bool {
        self.friend_names().iter().any(|n| n == name)
    }

    /// Whether this activity references the location by canonical name.
    pub fn references_location(&self, name: &str) -> bool {
        self.location_names().iter().any(|n| n == name)
    }

    /// Rewrites every `**old**` reference to `**new**`.
    ///
    /// Exact-match on the canonical name; partial or case-different text
    /// inside markers is left alone.
    pub fn rename_friend_reference(&mut self, old: &str, new: &str) {
        let from = format!("**{old}**");
        let to = format!("**{new}**");
        self.description = self.description.replace(&from, &to);
    }

    /// Byte spans of every reference marker in this description.
    ///
    /// Used by the highlighter to leave already-marked text untouched.
    pub fn marker_spans(&self) -> Vec<(usize, usize)> {
        marker_spans(&self.description)
    }

    /// Canonical ordering: most recent first, description text breaks ties.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| self.description.cmp(&other.description))
    }
}

/// Byte spans of `**...**` and `_..._` markers in arbitrary text.
pub fn marker_spans(text: &str) -> Vec<(usize, usize)> {
    FRIEND_REF_RE
        .find_iter(text)
        .chain(LOCATION_REF_RE.find_iter(text))
        .map(|m| (m.start(), m.end()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::Activity;
    use std::cmp::Ordering;

    fn activity(line: &str) -> Activity {
        Activity::deserialize(line).expect("test line should parse")
    }

    #[test]
    fn derives_references_in_description_order() {
        let activity =
            activity("- 2015-01-04: Got lunch with **Grace Hopper** and **John Cage** at _Marie's Diner_.");
        assert_eq!(activity.friend_names(), ["Grace Hopper", "John Cage"]);
        assert_eq!(activity.location_names(), ["Marie's Diner"]);
    }

    #[test]
    fn canonical_order_is_most_recent_first() {
        let older = activity("- 2015-01-04: Lunch.");
        let newer = activity("- 2015-11-01: Dinner.");
        assert_eq!(newer.canonical_cmp(&older), Ordering::Less);

        let same_day_a = activity("- 2015-01-04: Apple picking.");
        let same_day_b = activity("- 2015-01-04: Bowling.");
        assert_eq!(same_day_a.canonical_cmp(&same_day_b), Ordering::Less);
    }

    #[test]
    fn rename_reference_is_exact_match_only() {
        let mut activity = activity("- 2015-01-04: Saw **Grace Hopper** and **Grace**.");
        activity.rename_friend_reference("Grace", "Grace Kelly");
        assert_eq!(
            activity.description,
            "Saw **Grace Hopper** and **Grace Kelly**."
        );
    }
}
