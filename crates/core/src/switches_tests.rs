// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::packet::PacketBatch;

#[test]
fn staged_packet_switches() {
    let batch = PacketBatch::parse(
        r#"JSON PACKET: {"Ingest Title":"WPA Folder 01","Plugin JAR":"http://configuration.adpn.org/plugins/Directory.jar","Plugin ID":"gov.alabama.archives.adpn.directory.DirectoryPlugin","File Size":"1.0 KiB (1,024 bytes, 1 file)","parameters":[["base_url","http://archives.example/"],["subdirectory","WPA-Folder-01"]]}"#,
    )
    .unwrap();

    assert_eq!(
        from_packet(&batch.cascade()),
        vec![
            "--au_title=WPA Folder 01",
            "--jar=http://configuration.adpn.org/plugins/Directory.jar",
            "--plugin-id=gov.alabama.archives.adpn.directory.DirectoryPlugin",
            "--remote=1",
            "--base_url=http://archives.example/",
            "--subdirectory=WPA-Folder-01",
        ]
    );
}

#[test]
fn plugin_name_when_no_id() {
    let packet = Packet::new()
        .with("Plugin Name", "ADAH Directory Plugin")
        .with("File Size ", "12 B");
    assert_eq!(
        from_packet(&packet),
        vec!["--plugin=ADAH Directory Plugin", "--remote=1"]
    );
}

#[test]
fn empty_packet_has_no_switches() {
    assert!(from_packet(&Packet::new()).is_empty());
}
