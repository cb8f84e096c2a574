// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn thread() -> PacketBatch {
    PacketBatch::new(vec![
        Packet::new()
            .with("Ingest Step", "published")
            .with("Ingest Title", "Older AU"),
        Packet::new()
            .with("Ingest Step", "staged")
            .with("Ingest Title", "WPA Folder 01"),
        Packet::new()
            .with("Ingest Step", "staged")
            .with("Ingest Title", "WPA Folder 02"),
    ])
}

#[test]
fn selects_matching_step_and_restamps() {
    let batch = PacketBatch::new(vec![
        Packet::new().with("Ingest Step", "staged").with("Staged By", "alice"),
        Packet::new().with("Ingest Step", "published"),
    ]);

    let packet = select(&batch, &Transition::new("staged", "accepted"), Pick::First).unwrap();
    assert_eq!(packet.step().as_deref(), Some("accepted"));
    assert_eq!(packet.text("Staged By").as_deref(), Some("alice"));
    // The batch itself is untouched
    assert_eq!(batch.packets()[0].step().as_deref(), Some("staged"));
}

#[test]
fn first_match_is_the_default() {
    let packet = select(&thread(), &"staged:accepted".parse().unwrap(), Pick::default()).unwrap();
    assert_eq!(packet.text("Ingest Title").as_deref(), Some("WPA Folder 01"));
}

#[test]
fn last_and_indexed_picks() {
    let t = Transition::new("staged", "accepted");
    let last = select(&thread(), &t, Pick::Last).unwrap();
    assert_eq!(last.text("Ingest Title").as_deref(), Some("WPA Folder 02"));

    let second = select(&thread(), &t, Pick::Index(1)).unwrap();
    assert_eq!(second.text("Ingest Title").as_deref(), Some("WPA Folder 02"));

    let err = select(&thread(), &t, Pick::Index(5)).unwrap_err();
    assert_eq!(err, SelectError::PickOutOfRange(Pick::Index(5)));
}

#[test]
fn step_match_ignores_case_and_padding() {
    let batch = PacketBatch::new(vec![Packet::new().with("Ingest Step", " Staged ")]);
    assert!(select(&batch, &Transition::new("staged", "accepted"), Pick::First).is_ok());
}

#[test]
fn empty_from_accepts_any_step() {
    let packet = select(&thread(), &":promoted".parse().unwrap(), Pick::First).unwrap();
    assert_eq!(packet.text("Ingest Title").as_deref(), Some("Older AU"));
    assert_eq!(packet.step().as_deref(), Some("promoted"));
}

#[test]
fn empty_to_keeps_step() {
    let packet = select(&thread(), &"published".parse().unwrap(), Pick::First).unwrap();
    assert_eq!(packet.step().as_deref(), Some("published"));
}

#[test]
fn no_match_reports_tags() {
    let err = select(&thread(), &Transition::new("promoted", "published"), Pick::First).unwrap_err();
    assert_eq!(
        err,
        SelectError::NoMatchingPacket {
            from: "promoted".to_string(),
            to: "published".to_string(),
            candidates: 3,
        }
    );
    let message = err.to_string();
    assert!(message.contains("`promoted`"));
    assert!(message.contains("`published`"));
}

#[test]
fn empty_batch_never_matches() {
    let err = select(&PacketBatch::default(), &Transition::default(), Pick::First).unwrap_err();
    assert!(matches!(err, SelectError::NoMatchingPacket { candidates: 0, .. }));
}

#[test]
fn parse_pick() {
    assert_eq!("first".parse::<Pick>().unwrap(), Pick::First);
    assert_eq!("LAST".parse::<Pick>().unwrap(), Pick::Last);
    assert_eq!("2".parse::<Pick>().unwrap(), Pick::Index(2));
    assert!(matches!("second".parse::<Pick>(), Err(SelectError::InvalidPick(_))));
}

#[test]
fn parse_transition() {
    let t: Transition = "accepted:promoted".parse().unwrap();
    assert_eq!(t, Transition::new("accepted", "promoted"));
    assert_eq!(t.to_string(), "accepted:promoted");
}
