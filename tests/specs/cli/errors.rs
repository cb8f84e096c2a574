//! Error reporting and exit status specs

use crate::prelude::*;

#[test]
fn unknown_verb_exits_255() {
    Workspace::empty()
        .adpn()
        .args(&["reticulate"])
        .exits(255)
        .stderr_has("reticulate");
}

#[test]
fn malformed_strict_input_exits_1() {
    Workspace::empty()
        .adpn()
        .args(&["packet", "-"])
        .stdin("JSON PACKET: {\"Ingest Step\":")
        .exits(1)
        .stderr_has("Could not read piped packets");
}

#[test]
fn non_utf8_strict_input_exits_1() {
    Workspace::empty()
        .adpn()
        .args(&["packet", "-"])
        .stdin_bytes(b"JSON PACKET: {\"Ingest Title\":\"caf\xe9\"}")
        .exits(1)
        .stderr_has("not UTF-8");
}

#[test]
fn unreadable_explicit_config_fails() {
    let temp = Workspace::empty();
    temp.adpn()
        .args(&["packet", "--config=missing.toml", "-"])
        .stdin("{}")
        .fails()
        .stderr_has("missing.toml");
}
