use std::fs;

use kith_core::{find_exact, find_one, Friend, Journal, JournalError, ResolveError};
use tempfile::TempDir;

#[test]
fn exact_lookup_is_an_existence_check_not_a_failure() {
    let friends = [Friend::new("Grace Hopper").expect("valid name")];
    assert!(find_exact(&friends, "Nobody")
        .expect("zero matches is benign")
        .is_none());
}

#[test]
fn preexisting_duplicates_surface_as_ambiguity_on_exact_lookup() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("kith.md");
    fs::write(
        &path,
        "### Friends:\n- Grace Hopper\n- Grace Hopper\n",
    )
    .expect("seed file");

    let mut journal = Journal::load(&path).expect("duplicates still parse");
    let err = journal
        .add_friend("Grace Hopper")
        .expect_err("exact lookup must refuse to pick among duplicates");
    match err {
        JournalError::Resolve(ResolveError::Ambiguous { names, .. }) => {
            assert_eq!(names, ["Grace Hopper", "Grace Hopper"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fuzzy_lookup_accepts_regular_expressions() {
    let friends = [
        Friend::new("Grace Hopper").expect("valid name"),
        Friend::new("John Cage").expect("valid name"),
    ];
    let hit = find_one(&friends, "^gr.ce").expect("regex should resolve");
    assert_eq!(hit.name, "Grace Hopper");
}

#[test]
fn ambiguity_message_enumerates_all_matches() {
    let friends = [
        Friend::new("John Cage").expect("valid name"),
        Friend::new("John Lennon").expect("valid name"),
    ];
    let err = find_one(&friends, "john").expect_err("two matches expected");
    assert_eq!(
        err.to_string(),
        "\"john\" is ambiguous: John Cage, John Lennon"
    );
}
