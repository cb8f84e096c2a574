// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_ticket_records_calls() {
    let adapter = FakeTicketAdapter::new();
    adapter.respond_to_create(r#"{"iid":42,"web_url":"https://example/issues/42"}"#);

    let created = adapter
        .create_issue(&NewIssue {
            project: None,
            title: "ADPN staged: WPA".to_string(),
            description: "body".to_string(),
            labels: vec!["Staged".to_string()],
        })
        .unwrap();
    assert_eq!(created.iid, 42);
    assert_eq!(created.url, "https://example/issues/42");

    let calls = adapter.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], TicketCall::CreateIssue(issue) if issue.title == "ADPN staged: WPA"));
}

#[test]
fn fake_ticket_tracks_labels() {
    let adapter = FakeTicketAdapter::new();
    adapter.set_labels(7, ["Staged", "Accepted"]);

    let issue = IssueRef::new(7);
    adapter
        .add_note(&issue, "promoted", &LabelChange::from_lists("Promoted", "Accepted"))
        .unwrap();

    let labels = adapter.get_labels(&issue).unwrap();
    assert!(labels.contains("Promoted"));
    assert!(labels.contains("Staged"));
    assert!(!labels.contains("Accepted"));
}

#[test]
fn fake_ticket_note_uses_reference_url() {
    let adapter = FakeTicketAdapter::new();
    adapter.respond_to_note(r#"{"id":55,"noteable_id":9,"author":{"username":"bob"},"created_at":"now"}"#);

    let issue: IssueRef = "https://gitlab.example/adpn/ingest/-/issues/9".parse().unwrap();
    let note = adapter.add_note(&issue, "hi", &LabelChange::default()).unwrap();
    assert_eq!(
        note.deep_link().as_deref(),
        Some("https://gitlab.example/adpn/ingest/-/issues/9#note_55")
    );
}

#[test]
fn fake_ticket_fails_once() {
    let adapter = FakeTicketAdapter::new();
    adapter.fail_next(TicketError::Transport("down".to_string()));

    assert!(adapter.get_labels(&IssueRef::new(1)).is_err());
    assert!(adapter.get_labels(&IssueRef::new(1)).is_ok());
    assert_eq!(adapter.calls().len(), 2);
}
