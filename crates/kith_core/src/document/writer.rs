//! Canonical document writer.
//!
//! # Responsibility
//! - Render the three collections in canonical sorted order.
//! - Replace the on-disk document atomically.
//!
//! # Invariants
//! - Rendering never reorders the caller's collections in place.
//! - The prior file content survives any failed write.

use log::info;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::document::{
    DocumentError, DocumentResult, ACTIVITIES_HEADER, FRIENDS_HEADER, LOCATIONS_HEADER,
};
use crate::model::activity::Activity;
use crate::model::friend::Friend;
use crate::model::location::Location;

/// Renders the full document text in canonical order.
pub fn render_document(
    activities: &[Activity],
    friends: &[Friend],
    locations: &[Location],
) -> String {
    let mut activities: Vec<&Activity> = activities.iter().collect();
    activities.sort_by(|a, b| a.canonical_cmp(b));
    let mut friends: Vec<&Friend> = friends.iter().collect();
    friends.sort_by(|a, b| a.canonical_cmp(b));
    let mut locations: Vec<&Location> = locations.iter().collect();
    locations.sort_by(|a, b| a.canonical_cmp(b));

    let sections = [
        render_section(ACTIVITIES_HEADER, activities.iter().map(|a| a.serialize())),
        render_section(FRIENDS_HEADER, friends.iter().map(|f| f.serialize())),
        render_section(LOCATIONS_HEADER, locations.iter().map(|l| l.serialize())),
    ];

    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

fn io_error(path: &Path, source: std::io::Error) -> DocumentError {
    DocumentError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn render_section(header: &str, lines: impl Iterator<Item = String>) -> String {
    let mut section = header.to_string();
    for line in lines {
        section.push('\n');
        section.push_str(&line);
    }
    section
}

/// Writes the rendered document to `path`, atomically from the caller's
/// perspective: the text lands in a sibling temp file first and is renamed
/// over the target only once fully written.
pub fn save_document(
    path: &Path,
    activities: &[Activity],
    friends: &[Friend],
    locations: &[Location],
) -> DocumentResult<()> {
    let text = render_document(activities, friends, locations);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| io_error(path, e))?;
    temp.write_all(text.as_bytes())
        .map_err(|e| io_error(path, e))?;
    temp.flush().map_err(|e| io_error(path, e))?;
    temp.persist(path).map_err(|e| io_error(path, e.error))?;

    info!(
        "event=document_saved path={} activities={} friends={} locations={}",
        path.display(),
        activities.len(),
        friends.len(),
        locations.len()
    );
    Ok(())
}
