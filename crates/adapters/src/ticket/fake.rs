// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake ticket adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    parse_created_issue, parse_posted_note, CreatedIssue, IssueRef, LabelChange, NewIssue,
    PostedNote, TicketAdapter, TicketError,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

const DEFAULT_ISSUE_RESPONSE: &str =
    r#"{"iid":1,"web_url":"https://gitlab.example/adpn/ingest/-/issues/1"}"#;

const DEFAULT_NOTE_RESPONSE: &str = r#"{"id":1,"noteable_id":1,"author":{"username":"fake"},"created_at":"2026-01-01T00:00:00Z"}"#;

/// Recorded ticket call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketCall {
    CreateIssue(NewIssue),
    AddNote {
        issue: IssueRef,
        body: String,
        labels: LabelChange,
    },
    GetLabels(IssueRef),
}

#[derive(Default)]
struct FakeState {
    calls: Vec<TicketCall>,
    issue_response: Option<String>,
    note_response: Option<String>,
    labels: BTreeMap<u64, BTreeSet<String>>,
    fail_next: Option<TicketError>,
}

/// Fake ticket adapter that answers with scripted raw API responses
#[derive(Clone, Default)]
pub struct FakeTicketAdapter {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTicketAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw body returned by the next issue creations
    pub fn respond_to_create(&self, raw: impl Into<String>) -> &Self {
        self.lock().issue_response = Some(raw.into());
        self
    }

    /// Raw body returned by the next notes
    pub fn respond_to_note(&self, raw: impl Into<String>) -> &Self {
        self.lock().note_response = Some(raw.into());
        self
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: TicketError) -> &Self {
        self.lock().fail_next = Some(error);
        self
    }

    pub fn set_labels<S: Into<String>>(&self, iid: u64, labels: impl IntoIterator<Item = S>) {
        self.lock()
            .labels
            .insert(iid, labels.into_iter().map(Into::into).collect());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TicketCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TicketAdapter for FakeTicketAdapter {
    fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TicketError> {
        let mut state = self.lock();
        state.calls.push(TicketCall::CreateIssue(issue.clone()));
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        let raw = state
            .issue_response
            .clone()
            .unwrap_or_else(|| DEFAULT_ISSUE_RESPONSE.to_string());
        let created = parse_created_issue(&raw)?;
        state
            .labels
            .insert(created.iid, issue.labels.iter().cloned().collect());
        Ok(created)
    }

    fn add_note(
        &self,
        issue: &IssueRef,
        body: &str,
        labels: &LabelChange,
    ) -> Result<PostedNote, TicketError> {
        let mut state = self.lock();
        state.calls.push(TicketCall::AddNote {
            issue: issue.clone(),
            body: body.to_string(),
            labels: labels.clone(),
        });
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        let raw = state
            .note_response
            .clone()
            .unwrap_or_else(|| DEFAULT_NOTE_RESPONSE.to_string());
        let mut note = parse_posted_note(&raw)?;
        note.issue_url = issue.url.clone();

        let current = state.labels.entry(issue.iid).or_default();
        current.extend(labels.add.iter().cloned());
        for label in &labels.remove {
            current.remove(label);
        }
        Ok(note)
    }

    fn get_labels(&self, issue: &IssueRef) -> Result<BTreeSet<String>, TicketError> {
        let mut state = self.lock();
        state.calls.push(TicketCall::GetLabels(issue.clone()));
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        Ok(state.labels.get(&issue.iid).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
