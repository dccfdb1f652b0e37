//! The journal: in-memory model and query/aggregation engine.
//!
//! # Responsibility
//! - Own the three record collections between load and save.
//! - Provide every mutating and querying operation, resolving free-text
//!   friend/location references through the name resolver.
//!
//! # Invariants
//! - Friend and location names stay unique; violated attempts fail
//!   before any mutation.
//! - Derived scores (activity counts, likelihood) live in transient
//!   side-tables scoped to one call, never on the records.
//! - Nothing here persists; `save` is an explicit separate call.

use chrono::Datelike;
use log::info;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::document::{parser, writer, DocumentError};
use crate::model::activity::Activity;
use crate::model::friend::{self, Friend};
use crate::model::location::Location;
use crate::model::RecordFormatError;
use crate::search::patterns::{self, PatternEntry};
use crate::search::resolve::{self, ResolveError};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub type JournalResult<T> = Result<T, JournalError>;

/// Failure raised by journal operations.
#[derive(Debug)]
pub enum JournalError {
    /// An add was attempted with a name that already exists.
    DuplicateName { kind: &'static str, name: String },
    /// A caller-supplied option is out of range.
    InvalidArgument { message: String },
    /// A record line or name failed the grammar.
    Record(RecordFormatError),
    /// The document could not be read or written.
    Document(DocumentError),
    /// Free text did not resolve to exactly one record.
    Resolve(ResolveError),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName { kind, name } => {
                write!(f, "{kind} named \"{name}\" already exists")
            }
            Self::InvalidArgument { message } => write!(f, "{message}"),
            Self::Record(err) => write!(f, "{err}"),
            Self::Document(err) => write!(f, "{err}"),
            Self::Resolve(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(err) => Some(err),
            Self::Document(err) => Some(err),
            Self::Resolve(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordFormatError> for JournalError {
    fn from(value: RecordFormatError) -> Self {
        Self::Record(value)
    }
}

impl From<DocumentError> for JournalError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<ResolveError> for JournalError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

/// Suggestion buckets ordered from least to most frequently seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestTiers {
    pub distant: Vec<String>,
    pub moderate: Vec<String>,
    pub close: Vec<String>,
}

/// The in-memory journal: three record collections bound to one document.
///
/// Single-threaded by design; callers serialize access if shared.
pub struct Journal {
    path: PathBuf,
    activities: Vec<Activity>,
    friends: Vec<Friend>,
    locations: Vec<Location>,
}

impl Journal {
    /// Loads the journal at `path`; a missing file is an empty journal.
    pub fn load(path: impl Into<PathBuf>) -> JournalResult<Self> {
        let path = path.into();
        let document = parser::load_document(&path)?;
        Ok(Self {
            path,
            activities: document.activities,
            friends: document.friends,
            locations: document.locations,
        })
    }

    /// Creates an empty journal bound to `path` without touching disk.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            activities: Vec::new(),
            friends: Vec::new(),
            locations: Vec::new(),
        }
    }

    /// Writes the current collections back to the bound document.
    pub fn save(&self) -> JournalResult<()> {
        writer::save_document(&self.path, &self.activities, &self.friends, &self.locations)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Adds a friend with a fresh unique name.
    pub fn add_friend(&mut self, name: &str) -> JournalResult<&Friend> {
        let friend = Friend::new(name)?;
        if resolve::find_exact(&self.friends, &friend.name)?.is_some() {
            return Err(JournalError::DuplicateName {
                kind: "friend",
                name: friend.name,
            });
        }
        self.friends.push(friend);
        info!("event=friend_added total={}", self.friends.len());
        let index = self.friends.len() - 1;
        Ok(&self.friends[index])
    }

    /// Adds a location with a fresh unique name.
    pub fn add_location(&mut self, name: &str) -> JournalResult<&Location> {
        let location = Location::new(name)?;
        if resolve::find_exact(&self.locations, &location.name)?.is_some() {
            return Err(JournalError::DuplicateName {
                kind: "location",
                name: location.name,
            });
        }
        self.locations.push(location);
        info!("event=location_added total={}", self.locations.len());
        let index = self.locations.len() - 1;
        Ok(&self.locations[index])
    }

    /// Parses an activity line, highlights embedded friend/location
    /// references, and inserts it at the front (most recent first).
    ///
    /// The leading list dash is optional in `serialized`.
    pub fn add_activity(&mut self, serialized: &str) -> JournalResult<&Activity> {
        let trimmed = serialized.trim();
        let line = if trimmed.starts_with("- ") {
            trimmed.to_string()
        } else {
            format!("- {trimmed}")
        };
        let mut activity = Activity::deserialize(&line)?;
        activity.description = self.highlighted_description(&activity);
        self.activities.insert(0, activity);
        info!("event=activity_added total={}", self.activities.len());
        Ok(&self.activities[0])
    }

    /// Renames the friend fuzzily matched by `old_name` and rewrites every
    /// activity reference to the new name.
    pub fn rename_friend(&mut self, old_name: &str, new_name: &str) -> JournalResult<&Friend> {
        let index = resolve::find_one_index(&self.friends, old_name.trim())?;
        let new_name = friend::validate_name(new_name)?;
        let current = self.friends[index].name.clone();
        if new_name != current && resolve::find_exact(&self.friends, &new_name)?.is_some() {
            return Err(JournalError::DuplicateName {
                kind: "friend",
                name: new_name,
            });
        }

        for activity in &mut self.activities {
            activity.rename_friend_reference(&current, &new_name);
        }
        self.friends[index].name = new_name;
        info!("event=friend_renamed");
        Ok(&self.friends[index])
    }

    /// Adds a nickname to the friend fuzzily matched by `name`.
    pub fn add_nickname(&mut self, name: &str, nickname: &str) -> JournalResult<&Friend> {
        let index = resolve::find_one_index(&self.friends, name.trim())?;
        self.friends[index].add_nickname(nickname)?;
        Ok(&self.friends[index])
    }

    /// Removes a nickname from the friend fuzzily matched by `name`.
    pub fn remove_nickname(&mut self, name: &str, nickname: &str) -> JournalResult<&Friend> {
        let index = resolve::find_one_index(&self.friends, name.trim())?;
        if !self.friends[index].remove_nickname(nickname) {
            return Err(JournalError::Resolve(ResolveError::NotFound {
                query: nickname.trim().to_string(),
            }));
        }
        Ok(&self.friends[index])
    }

    /// Friend names in current collection order.
    pub fn list_friends(&self) -> Vec<String> {
        self.friends.iter().map(|f| f.name.clone()).collect()
    }

    /// Location names in current collection order.
    pub fn list_locations(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.name.clone()).collect()
    }

    /// Friends ranked by activity count, most active first.
    ///
    /// Each entry is the name padded to the widest listed name, then the
    /// count in parentheses; only the top entry spells out "activities".
    pub fn list_favorites(&self, limit: Option<usize>) -> JournalResult<Vec<String>> {
        if let Some(limit) = limit {
            if limit < 1 {
                return Err(JournalError::InvalidArgument {
                    message: format!("limit must be at least 1, got {limit}"),
                });
            }
        }

        let counts = self.friend_activity_counts();
        let mut ranked: Vec<(&str, usize)> = self
            .friends
            .iter()
            .map(|f| {
                let count = counts.get(f.name.as_str()).copied().unwrap_or(0);
                (f.name.as_str(), count)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }

        let width = ranked
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        Ok(ranked
            .iter()
            .enumerate()
            .map(|(rank, &(name, count))| {
                if rank == 0 {
                    format!("{name:>width$} ({count} activities)")
                } else {
                    format!("{name:>width$} ({count})")
                }
            })
            .collect())
    }

    /// Activity display texts in current order, optionally filtered by a
    /// fuzzily-resolved friend and/or location, optionally truncated.
    pub fn list_activities(
        &self,
        limit: Option<usize>,
        friend: Option<&str>,
        location: Option<&str>,
    ) -> JournalResult<Vec<String>> {
        let mut activities = self.filtered_activities(friend, location)?;
        if let Some(limit) = limit {
            activities.truncate(limit);
        }
        Ok(activities.iter().map(|a| a.display_text()).collect())
    }

    /// Month-by-month activity histogram, optionally restricted to a
    /// fuzzily-resolved friend.
    ///
    /// Every calendar month between the earliest and latest qualifying
    /// activity is present, zero-filled, in chronological order. With no
    /// qualifying activities the histogram is empty.
    pub fn graph(&self, friend: Option<&str>) -> JournalResult<Vec<(String, usize)>> {
        let activities = self.filtered_activities(friend, None)?;
        let Some(first) = activities.first() else {
            return Ok(Vec::new());
        };

        let mut earliest = first.date;
        let mut latest = first.date;
        for activity in &activities {
            earliest = earliest.min(activity.date);
            latest = latest.max(activity.date);
        }

        let mut histogram = Vec::new();
        let (mut year, mut month) = (earliest.year(), earliest.month());
        loop {
            let key = format!("{} {year}", MONTH_ABBREVIATIONS[(month - 1) as usize]);
            let count = activities
                .iter()
                .filter(|a| a.date.year() == year && a.date.month() == month)
                .count();
            histogram.push((key, count));
            if year == latest.year() && month == latest.month() {
                break;
            }
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        Ok(histogram)
    }

    /// Buckets friends into distant/moderate/close tiers by how often
    /// they appear in activities.
    ///
    /// Friends seen fewer than twice are distant. Of the rest, ranked
    /// ascending, the first three quarters (integer division) are
    /// moderate and the remainder close.
    pub fn suggest(&self) -> SuggestTiers {
        let counts = self.friend_activity_counts();
        let mut ranked: Vec<(&str, usize)> = self
            .friends
            .iter()
            .map(|f| {
                let count = counts.get(f.name.as_str()).copied().unwrap_or(0);
                (f.name.as_str(), count)
            })
            .collect();
        ranked.sort_by_key(|&(_, count)| count);

        let split = ranked
            .iter()
            .position(|&(_, count)| count >= 2)
            .unwrap_or(ranked.len());
        let remaining = &ranked[split..];
        let moderate_len = remaining.len() * 3 / 4;

        SuggestTiers {
            distant: ranked[..split]
                .iter()
                .map(|&(name, _)| name.to_string())
                .collect(),
            moderate: remaining[..moderate_len]
                .iter()
                .map(|&(name, _)| name.to_string())
                .collect(),
            close: remaining[moderate_len..]
                .iter()
                .map(|&(name, _)| name.to_string())
                .collect(),
        }
    }

    /// Scores disambiguation candidates by co-occurrence with confirmed
    /// context.
    ///
    /// Over all pairs drawn from `matches` plus the flattened candidate
    /// groups (excluding pairs that are both confirmed or both from one
    /// group), each side of a pair earns a point per activity whose friend
    /// references contain both names. Scores live only in the returned
    /// table.
    pub fn likelihood_scores(
        &self,
        matches: &[String],
        possible_matches: &[Vec<String>],
    ) -> HashMap<String, usize> {
        let mut participants: Vec<(&str, Option<usize>)> =
            matches.iter().map(|name| (name.as_str(), None)).collect();
        for (group_index, group) in possible_matches.iter().enumerate() {
            for name in group {
                participants.push((name.as_str(), Some(group_index)));
            }
        }

        let mut pairs: Vec<(&str, &str)> = Vec::new();
        for (i, &(a, group_a)) in participants.iter().enumerate() {
            for &(b, group_b) in &participants[i + 1..] {
                let both_confirmed = group_a.is_none() && group_b.is_none();
                let same_group = group_a.is_some() && group_a == group_b;
                if both_confirmed || same_group {
                    continue;
                }
                pairs.push((a, b));
            }
        }

        let mut scores: HashMap<String, usize> = HashMap::new();
        for activity in &self.activities {
            let names: HashSet<String> = activity.friend_names().into_iter().collect();
            for &(a, b) in &pairs {
                if names.contains(a) && names.contains(b) {
                    *scores.entry(a.to_string()).or_insert(0) += 1;
                    *scores.entry(b.to_string()).or_insert(0) += 1;
                }
            }
        }
        scores
    }

    pub fn total_friends(&self) -> usize {
        self.friends.len()
    }

    pub fn total_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn total_activities(&self) -> usize {
        self.activities.len()
    }

    /// Day span between the earliest and latest activity dates; 0 with
    /// fewer than two activities.
    pub fn elapsed_days(&self) -> i64 {
        if self.activities.len() < 2 {
            return 0;
        }
        let mut earliest = self.activities[0].date;
        let mut latest = self.activities[0].date;
        for activity in &self.activities {
            earliest = earliest.min(activity.date);
            latest = latest.max(activity.date);
        }
        (latest - earliest).num_days()
    }

    fn filtered_activities(
        &self,
        friend: Option<&str>,
        location: Option<&str>,
    ) -> JournalResult<Vec<&Activity>> {
        let friend_name = match friend {
            Some(query) => Some(resolve::find_one(&self.friends, query)?.name.clone()),
            None => None,
        };
        let location_name = match location {
            Some(query) => Some(resolve::find_one(&self.locations, query)?.name.clone()),
            None => None,
        };

        Ok(self
            .activities
            .iter()
            .filter(|a| {
                friend_name
                    .as_deref()
                    .map_or(true, |name| a.references_friend(name))
            })
            .filter(|a| {
                location_name
                    .as_deref()
                    .map_or(true, |name| a.references_location(name))
            })
            .collect())
    }

    /// Transient side-table: how many activities reference each friend.
    ///
    /// Dangling references (names not in the friends collection) are
    /// excluded; repeated references within one activity count once.
    fn friend_activity_counts(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = self
            .friends
            .iter()
            .map(|f| (f.name.clone(), 0))
            .collect();
        for activity in &self.activities {
            let mut seen: HashSet<String> = HashSet::new();
            for name in activity.friend_names() {
                if seen.insert(name.clone()) {
                    if let Some(count) = counts.get_mut(&name) {
                        *count += 1;
                    }
                }
            }
        }
        counts
    }

    /// Rewrites a description so every recognizable friend/location
    /// reference carries its canonical marker.
    ///
    /// Patterns are scanned longest-first with word boundaries, skipping
    /// spans already marked. A pattern matching several friends is
    /// resolved by likelihood score against the confirmed context, then
    /// by activity count, then by collection order.
    fn highlighted_description(&self, activity: &Activity) -> String {
        let description = activity.description.as_str();
        let mut claimed = activity.marker_spans();

        let known: HashSet<&str> = self.friends.iter().map(|f| f.name.as_str()).collect();
        let mut confirmed: Vec<String> = activity
            .friend_names()
            .into_iter()
            .filter(|name| known.contains(name.as_str()))
            .collect();

        struct Pending {
            start: usize,
            end: usize,
            candidates: Vec<usize>,
        }

        let mut pending: Vec<Pending> = Vec::new();
        for entry in patterns::friend_patterns(&self.friends) {
            for (start, end) in pattern_matches(&entry, description, &claimed) {
                claimed.push((start, end));
                pending.push(Pending {
                    start,
                    end,
                    candidates: entry.candidates.clone(),
                });
            }
        }

        for p in &pending {
            if let [single] = p.candidates.as_slice() {
                confirmed.push(self.friends[*single].name.clone());
            }
        }
        let groups: Vec<Vec<String>> = pending
            .iter()
            .filter(|p| p.candidates.len() > 1)
            .map(|p| {
                p.candidates
                    .iter()
                    .map(|&index| self.friends[index].name.clone())
                    .collect()
            })
            .collect();
        let scores = self.likelihood_scores(&confirmed, &groups);
        let counts = self.friend_activity_counts();

        let mut replacements: Vec<(usize, usize, String)> = pending
            .iter()
            .map(|p| {
                let chosen = self.pick_candidate(&p.candidates, &scores, &counts);
                (p.start, p.end, format!("**{}**", self.friends[chosen].name))
            })
            .collect();

        for entry in patterns::location_patterns(&self.locations) {
            for (start, end) in pattern_matches(&entry, description, &claimed) {
                claimed.push((start, end));
                let index = entry.candidates[0];
                replacements.push((start, end, format!("_{}_", self.locations[index].name)));
            }
        }

        let mut result = description.to_string();
        replacements.sort_by(|a, b| b.0.cmp(&a.0));
        for (start, end, text) in replacements {
            result.replace_range(start..end, &text);
        }
        result
    }

    /// Picks one candidate index: highest likelihood score, then highest
    /// activity count, first in collection order on a full tie.
    fn pick_candidate(
        &self,
        candidates: &[usize],
        scores: &HashMap<String, usize>,
        counts: &HashMap<String, usize>,
    ) -> usize {
        let rank = |index: usize| {
            let name = self.friends[index].name.as_str();
            (
                scores.get(name).copied().unwrap_or(0),
                counts.get(name).copied().unwrap_or(0),
            )
        };

        let mut best = candidates[0];
        for &candidate in &candidates[1..] {
            if rank(candidate) > rank(best) {
                best = candidate;
            }
        }
        best
    }
}

/// Word-bounded, case-insensitive matches of one pattern that do not
/// overlap an already-claimed span.
fn pattern_matches(
    entry: &PatternEntry,
    text: &str,
    claimed: &[(usize, usize)],
) -> Vec<(usize, usize)> {
    let Ok(pattern) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&entry.pattern))) else {
        return Vec::new();
    };
    pattern
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .filter(|&(start, end)| {
            !claimed
                .iter()
                .any(|&(c_start, c_end)| start < c_end && c_start < end)
        })
        .collect()
}
