//! Notify specs for steps that print rather than touch a ticket

use crate::prelude::*;

#[test]
fn output_step_without_ticket_prints_body() {
    Workspace::empty()
        .adpn()
        .args(&["notify", "-"])
        .stdin(r#"{"Ingest Step":"output","Staged By":"alice","Staged To":"NodeA"}"#)
        .passes()
        .stdout_has("Staged To: NodeA")
        .stdout_has("Staged By: alice")
        .stdout_has("Sent by operator");
}

#[test]
fn unconfigured_ticketing_prints_staged_notice() {
    Workspace::empty()
        .adpn()
        .args(&["notify", "-"])
        .stdin(STAGED)
        .passes()
        .stdout_has("WPA Folder 01")
        .stdout_lacks("Created issue");
}

#[test]
fn template_directory_and_overrides() {
    let temp = Workspace::empty();
    temp.file(
        "templates/notify.txt",
        "Subject line\n==========\n%(au_title)s for %(recipient)s\n",
    );

    temp.adpn()
        .args(&[
            "notify",
            "--templates=templates",
            "--dry-run",
            "--template:recipient=Node B",
            "-",
        ])
        .stdin(STAGED)
        .passes()
        .stdout_eq("WPA Folder 01 for Node B\n");
}

#[test]
fn non_utf8_input_is_tolerated() {
    let mut input = b"rsync: sent caf\xe9.tif\n".to_vec();
    input.extend_from_slice(
        br#"JSON PACKET: {"Ingest Step":"output","Staged By":"alice","Staged To":"NodeA"}"#,
    );
    Workspace::empty()
        .adpn()
        .args(&["notify", "-"])
        .stdin_bytes(&input)
        .passes()
        .stdout_has("Staged To: NodeA");
}

#[test]
fn single_dash_flag_is_not_a_location() {
    Workspace::empty()
        .adpn()
        .args(&["notify", "-v", "-"])
        .stdin(r#"{"Ingest Step":"output","Staged To":"NodeA"}"#)
        .passes()
        .stdout_has("Staged To: NodeA")
        .stdout_lacks("Location: -v")
        .stderr_has("ignoring unrecognized flag");
}

#[test]
fn plain_text_input_is_tolerated() {
    Workspace::empty()
        .adpn()
        .args(&["notify", "-"])
        .stdin("just some words\n")
        .passes();
}
