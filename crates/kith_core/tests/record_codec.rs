use kith_core::{Activity, Friend, Location, RecordFormatError};

#[test]
fn activity_round_trips_through_its_line_form() {
    let line = "- 2015-01-04: Got lunch with **Grace Hopper** at _Marie's Diner_.";
    let activity = Activity::deserialize(line).expect("line should parse");
    assert_eq!(activity.serialize(), line);

    let reparsed = Activity::deserialize(&activity.serialize()).expect("round trip");
    assert_eq!(reparsed, activity);
}

#[test]
fn friend_round_trips_with_and_without_nicknames() {
    let plain = Friend::deserialize("- Grace Hopper").expect("plain line should parse");
    assert_eq!(plain.name, "Grace Hopper");
    assert!(plain.nicknames.is_empty());
    assert_eq!(plain.serialize(), "- Grace Hopper");

    let line = "- Grace Hopper (a.k.a. The Admiral, Amazing Grace)";
    let nicknamed = Friend::deserialize(line).expect("nicknamed line should parse");
    assert_eq!(nicknamed.name, "Grace Hopper");
    assert_eq!(nicknamed.nicknames, ["The Admiral", "Amazing Grace"]);
    assert_eq!(nicknamed.serialize(), line);

    let reparsed = Friend::deserialize(&nicknamed.serialize()).expect("round trip");
    assert_eq!(reparsed, nicknamed);
}

#[test]
fn location_round_trips_through_its_line_form() {
    let location = Location::deserialize("- Marie's Diner").expect("line should parse");
    assert_eq!(location.serialize(), "- Marie's Diner");
    assert_eq!(
        Location::deserialize(&location.serialize()).expect("round trip"),
        location
    );
}

#[test]
fn activity_grammar_failures_are_typed() {
    assert!(matches!(
        Activity::deserialize("- no date here"),
        Err(RecordFormatError::MalformedActivity { .. })
    ));
    assert!(matches!(
        Activity::deserialize("2015-01-04: missing dash"),
        Err(RecordFormatError::MalformedActivity { .. })
    ));
    assert!(matches!(
        Activity::deserialize("- 2015-02-30: impossible day"),
        Err(RecordFormatError::InvalidDate { .. })
    ));
}

#[test]
fn friend_grammar_failures_are_typed() {
    assert!(matches!(
        Friend::deserialize("no dash"),
        Err(RecordFormatError::MalformedFriend { .. })
    ));
    assert!(matches!(
        Friend::deserialize("- Bob (unexpected parens)"),
        Err(RecordFormatError::MalformedFriend { .. })
    ));
    assert!(matches!(
        Friend::deserialize("- Grace (a.k.a. )"),
        Err(RecordFormatError::MalformedFriend { .. })
    ));
}

#[test]
fn empty_names_are_rejected() {
    assert!(matches!(
        Friend::new("   "),
        Err(RecordFormatError::InvalidName { .. })
    ));
    assert!(matches!(
        Location::new(""),
        Err(RecordFormatError::InvalidName { .. })
    ));
}

#[test]
fn records_serialize_to_expected_wire_fields() {
    let activity = Activity::deserialize("- 2015-01-04: Lunch.").expect("line should parse");
    let json = serde_json::to_value(&activity).expect("activity should serialize");
    assert_eq!(json["date"], "2015-01-04");
    assert_eq!(json["description"], "Lunch.");

    let mut friend = Friend::new("Grace Hopper").expect("valid name");
    friend.add_nickname("The Admiral").expect("valid nickname");
    let json = serde_json::to_value(&friend).expect("friend should serialize");
    assert_eq!(json["name"], "Grace Hopper");
    assert_eq!(json["nicknames"][0], "The Admiral");

    let decoded: Friend = serde_json::from_value(json).expect("friend should deserialize");
    assert_eq!(decoded, friend);
}
