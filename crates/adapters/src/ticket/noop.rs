// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticket adapter for when no ticketing system is configured.

use super::{
    CreatedIssue, IssueRef, LabelChange, NewIssue, PostedNote, TicketAdapter, TicketError,
};
use std::collections::BTreeSet;

/// Ticket adapter that refuses every call with [`TicketError::NotConfigured`].
///
/// Callers treat that error as a cue to fall back to plain output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpTicketAdapter;

impl NoOpTicketAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl TicketAdapter for NoOpTicketAdapter {
    fn create_issue(&self, _issue: &NewIssue) -> Result<CreatedIssue, TicketError> {
        Err(TicketError::NotConfigured)
    }

    fn add_note(
        &self,
        _issue: &IssueRef,
        _body: &str,
        _labels: &LabelChange,
    ) -> Result<PostedNote, TicketError> {
        Err(TicketError::NotConfigured)
    }

    fn get_labels(&self, _issue: &IssueRef) -> Result<BTreeSet<String>, TicketError> {
        Err(TicketError::NotConfigured)
    }
}
