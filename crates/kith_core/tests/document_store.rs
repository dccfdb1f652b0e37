use std::fs;

use kith_core::{load_document, parse_document, render_document, save_document, DocumentError};
use tempfile::TempDir;

const SAMPLE: &str = "\
### Activities:
- 2015-11-01: **Grace Hopper** and I went to _Marie's Diner_ for breakfast.
- 2015-01-04: Got lunch with **Grace Hopper**.

### Friends:
- Grace Hopper (a.k.a. The Admiral)
- John Cage

### Locations:
- Marie's Diner
";

#[test]
fn parses_all_three_sections_in_file_order() {
    let document = parse_document(SAMPLE).expect("sample should parse");
    assert_eq!(document.activities.len(), 2);
    assert_eq!(document.friends.len(), 2);
    assert_eq!(document.locations.len(), 1);

    assert_eq!(
        document.activities[0].friend_names(),
        ["Grace Hopper"]
    );
    assert_eq!(document.friends[0].nicknames, ["The Admiral"]);
    assert_eq!(document.locations[0].name, "Marie's Diner");
}

#[test]
fn missing_file_is_an_empty_journal() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.md");
    let document = load_document(&path).expect("missing file should not fail");
    assert!(document.activities.is_empty());
    assert!(document.friends.is_empty());
    assert!(document.locations.is_empty());
}

#[test]
fn section_header_inside_a_section_is_a_format_error() {
    // Without a blank separator line the parser never leaves the
    // activities section, so the next header is parsed as a record.
    let text = "### Activities:\n### Friends:\n";
    let err = parse_document(text).expect_err("header in section must fail");
    match err {
        DocumentError::Format { line_number, .. } => assert_eq!(line_number, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rendering_then_reparsing_is_idempotent() {
    let document = parse_document(SAMPLE).expect("sample should parse");
    let rendered = render_document(&document.activities, &document.friends, &document.locations);
    let reparsed = parse_document(&rendered).expect("rendered text should parse");
    let rerendered = render_document(&reparsed.activities, &reparsed.friends, &reparsed.locations);
    assert_eq!(rendered, rerendered);
    assert_eq!(reparsed, document);
}

#[test]
fn save_overwrites_in_place_and_leaves_no_temp_files() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("kith.md");
    fs::write(&path, "stale content\n").expect("seed file");

    let document = parse_document(SAMPLE).expect("sample should parse");
    save_document(
        &path,
        &document.activities,
        &document.friends,
        &document.locations,
    )
    .expect("save should succeed");

    let written = fs::read_to_string(&path).expect("file should exist");
    assert_eq!(written, SAMPLE);

    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("dir should be readable")
        .collect();
    assert_eq!(entries.len(), 1, "temp file should not survive the rename");
}
