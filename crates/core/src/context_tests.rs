// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::packet::PacketBatch;
use crate::settings::Settings;

fn computed() -> Computed {
    Computed {
        user_name: "operator".to_string(),
        timestamp: "2026-10-19 09:30:00 -0500".to_string(),
    }
}

fn staged_packet() -> Packet {
    Packet::new()
        .with("Ingest Step", "staged")
        .with("Ingest Title", "WPA Photos 01")
        .with("Staged To", "adpn-stage")
        .with("Staged By", "alice")
        .with("File Size", "1.2 GiB (1,288,490,188 bytes, 12 files)")
        .with_parameters([("subdirectory", "WPA-Folder-01")])
}

fn render(settings: &Settings, packet: &Packet) -> RenderContext {
    let batch = PacketBatch::new(vec![packet.clone()]);
    let resolver = Resolver::new(settings, &batch);
    build(&resolver, packet, "staged", &computed())
}

#[test]
fn every_well_known_name_is_present() {
    let ctx = render(&Settings::default(), &staged_packet());
    for name in WELL_KNOWN {
        assert!(ctx.get(name).is_some(), "missing {name}");
    }
}

#[test]
fn reads_packet_fields() {
    let ctx = render(&Settings::default(), &staged_packet());
    assert_eq!(ctx.get("au_title"), Some("WPA Photos 01"));
    assert_eq!(ctx.get("staged_to"), Some("adpn-stage"));
    assert_eq!(ctx.get("subdirectory"), Some("WPA-Folder-01"));
    assert_eq!(ctx.get("extent"), Some("1.2 GiB (1,288,490,188 bytes, 12 files)"));
    assert_eq!(ctx.get("cmd"), Some("staged"));
    assert_eq!(ctx.get("timestamp"), Some("2026-10-19 09:30:00 -0500"));
}

#[test]
fn people_cascade_through_earlier_steps() {
    let ctx = render(&Settings::default(), &staged_packet());
    assert_eq!(ctx.get("staged_by"), Some("alice"));
    assert_eq!(ctx.get("accepted_by"), Some("alice"));
    assert_eq!(ctx.get("promoted_by"), Some("alice"));

    let ctx = render(&Settings::default(), &Packet::new());
    assert_eq!(ctx.get("staged_by"), Some("operator"));
    assert_eq!(ctx.get("user_name"), Some("operator"));
}

#[test]
fn switches_beat_packet_fields() {
    let settings = Settings::builder()
        .switch("staged-to", "other-node")
        .switch("accepted-by", "carol")
        .build();
    let ctx = render(&settings, &staged_packet());
    assert_eq!(ctx.get("staged_to"), Some("other-node"));
    assert_eq!(ctx.get("accepted_by"), Some("carol"));
    assert_eq!(ctx.get("promoted_by"), Some("carol"));
}

#[test]
fn template_overrides_apply_last() {
    let settings = Settings::builder()
        .switch("template:au_title", "Overridden")
        .switch("template:extra", "bonus")
        .build();
    let ctx = render(&settings, &staged_packet());
    assert_eq!(ctx.get("au_title"), Some("Overridden"));
    assert_eq!(ctx.get("extra"), Some("bonus"));
}

#[test]
fn json_placeholders_hold_the_packet() {
    let packet = staged_packet();
    let ctx = render(&Settings::default(), &packet);
    assert_eq!(ctx.get("json"), Some(packet.to_compact().as_str()));
    assert_eq!(ctx.get("pretty_json"), Some(packet.to_pretty().as_str()));
}

#[test]
fn extent_is_measured_from_location() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"abc").unwrap();
    let settings = Settings::builder()
        .args([dir.path().display().to_string()])
        .build();

    let ctx = render(&settings, &Packet::new());
    assert_eq!(ctx.get("location"), Some(dir.path().display().to_string().as_str()));
    assert_eq!(ctx.get("extent"), Some("3.0 B (3 bytes, 1 file)"));
}

#[test]
fn missing_values_are_empty() {
    let ctx = render(&Settings::default(), &Packet::new());
    assert_eq!(ctx.get("au_start_url"), Some(""));
    assert_eq!(ctx.get("extent"), Some(""));
    assert_eq!(ctx.get("gitlab_issue"), Some(""));
}
