//! Notify specs for `--pipeline=from:to` stage transitions

use crate::prelude::*;

const BATCH: &str = "\
JSON PACKET: {\"Ingest Step\":\"published\",\"Staged To\":\"NodeB\"}
JSON PACKET: {\"Ingest Step\":\"staged\",\"Staged To\":\"NodeA\"}
";

#[test]
fn no_matching_packet_exits_4_naming_tags() {
    Workspace::empty()
        .adpn()
        .args(&["notify", "--pipeline=promoted:published", "-"])
        .stdin(BATCH)
        .exits(4)
        .stderr_has("'promoted'")
        .stderr_has("'published'");
}

#[test]
fn selected_packet_is_restamped_and_reemitted() {
    Workspace::empty()
        .adpn()
        .args(&["notify", "--pipeline=staged:accepted", "-"])
        .stdin(BATCH)
        .passes()
        .stdout_has("Staged To: NodeA")
        .stdout_has("JSON PACKET: {\"Ingest Step\":\"accepted\",\"Staged To\":\"NodeA\"}");
}

#[test]
fn json_output_ends_with_bare_packet() {
    let run = Workspace::empty()
        .adpn()
        .args(&["notify", "--pipeline=staged:accepted", "--output=json", "--dry-run", "-"])
        .stdin(BATCH)
        .passes();
    let last = run.stdout().lines().last().unwrap_or_default();
    assert_eq!(last, "{\"Ingest Step\":\"accepted\",\"Staged To\":\"NodeA\"}");
}
