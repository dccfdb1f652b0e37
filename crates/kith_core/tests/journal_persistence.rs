use std::fs;

use kith_core::Journal;
use tempfile::TempDir;

#[test]
fn journal_survives_a_save_and_reload_cycle() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("kith.md");

    let mut journal = Journal::load(&path).expect("missing file is an empty journal");
    assert_eq!(journal.total_friends(), 0);

    journal.add_friend("Grace Hopper").expect("add friend");
    journal.add_friend("John Cage").expect("add friend");
    journal
        .add_nickname("hopper", "The Admiral")
        .expect("add nickname");
    journal.add_location("Marie's Diner").expect("add location");
    journal
        .add_activity("2015-01-04: Lunch with Grace at Marie's Diner.")
        .expect("add activity");
    journal.save().expect("save should succeed");

    let written = fs::read_to_string(&path).expect("file should exist");
    assert_eq!(
        written,
        "### Activities:\n\
         - 2015-01-04: Lunch with **Grace Hopper** at _Marie's Diner_.\n\
         \n\
         ### Friends:\n\
         - Grace Hopper (a.k.a. The Admiral)\n\
         - John Cage\n\
         \n\
         ### Locations:\n\
         - Marie's Diner\n"
    );

    let reloaded = Journal::load(&path).expect("reload should parse");
    assert_eq!(reloaded.list_friends(), journal.list_friends());
    assert_eq!(reloaded.list_locations(), journal.list_locations());
    assert_eq!(
        reloaded.activities()[0].description,
        "Lunch with **Grace Hopper** at _Marie's Diner_."
    );
    assert_eq!(reloaded.friends()[0].nicknames, ["The Admiral"]);
}
