//! Packet extraction specs

use crate::prelude::*;

const BATCH: &str = "\
JSON PACKET: {\"Ingest Step\":\"staged\",\"Staged To\":\"NodeA\"}
JSON PACKET: {\"Ingest Step\":\"published\",\"Gitlab Issue\":\"https://gitlab.example/adpn/ingest/-/issues/17\"}
";

#[test]
fn key_prints_bare_value() {
    Workspace::empty()
        .adpn()
        .args(&["packet", "--key=Gitlab Issue", "-"])
        .stdin(BATCH)
        .passes()
        .stdout_eq("https://gitlab.example/adpn/ingest/-/issues/17");
}

#[test]
fn missing_key_exits_1() {
    Workspace::empty()
        .adpn()
        .args(&["packet", "--key=Promoted By", "-"])
        .stdin(BATCH)
        .exits(1)
        .stderr_has("Promoted By");
}

#[test]
fn pipeline_restamps_selected_packet() {
    Workspace::empty()
        .adpn()
        .args(&["packet", "--pipeline=staged:accepted", "--output=json", "-"])
        .stdin(BATCH)
        .passes()
        .stdout_eq("{\"Ingest Step\":\"accepted\",\"Staged To\":\"NodeA\"}\n");
}

#[test]
fn pretty_output_reparses() {
    let temp = Workspace::empty();
    let pretty = temp
        .adpn()
        .args(&["packet", "--index=0", "--output=pretty", "-"])
        .stdin(BATCH)
        .passes()
        .stdout()
        .to_string();

    temp.adpn()
        .args(&["packet", "--key=Staged To", "-"])
        .stdin(&pretty)
        .passes()
        .stdout_eq("NodeA");
}
