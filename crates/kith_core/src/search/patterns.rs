//! Pattern maps for embedded-reference scanning.
//!
//! # Responsibility
//! - Enumerate every text pattern that could denote a friend (full name,
//!   each name token, each nickname) or a location (full name).
//! - Order entries by descending pattern length so a longer, more
//!   specific pattern wins when scanning free text.
//!
//! # Invariants
//! - Patterns are deduplicated case-insensitively; candidate lists keep
//!   collection order.
//! - Maps are rebuilt on demand from current collection state; nothing is
//!   cached across mutations.

use std::collections::HashMap;

use crate::model::friend::Friend;
use crate::model::location::Location;

/// One scannable pattern and the records it could denote, as indexes into
/// the source collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub pattern: String,
    pub candidates: Vec<usize>,
}

/// Builds the friend pattern map: full names, name tokens, nicknames.
pub fn friend_patterns(friends: &[Friend]) -> Vec<PatternEntry> {
    let mut map: HashMap<String, PatternEntry> = HashMap::new();
    for (index, friend) in friends.iter().enumerate() {
        insert(&mut map, &friend.name, index);
        for token in friend.name_tokens() {
            insert(&mut map, token, index);
        }
        for nickname in &friend.nicknames {
            insert(&mut map, nickname, index);
        }
    }
    into_ordered(map)
}

/// Builds the location pattern map: one full-name entry per location.
pub fn location_patterns(locations: &[Location]) -> Vec<PatternEntry> {
    let mut map: HashMap<String, PatternEntry> = HashMap::new();
    for (index, location) in locations.iter().enumerate() {
        insert(&mut map, &location.name, index);
    }
    into_ordered(map)
}

fn insert(map: &mut HashMap<String, PatternEntry>, pattern: &str, index: usize) {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return;
    }
    let entry = map
        .entry(trimmed.to_lowercase())
        .or_insert_with(|| PatternEntry {
            pattern: trimmed.to_string(),
            candidates: Vec::new(),
        });
    if !entry.candidates.contains(&index) {
        entry.candidates.push(index);
    }
}

fn into_ordered(map: HashMap<String, PatternEntry>) -> Vec<PatternEntry> {
    let mut entries: Vec<PatternEntry> = map.into_values().collect();
    entries.sort_by(|a, b| {
        b.pattern
            .chars()
            .count()
            .cmp(&a.pattern.chars().count())
            .then_with(|| a.pattern.cmp(&b.pattern))
    });
    entries
}
