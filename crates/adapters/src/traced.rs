// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::ticket::{
    CreatedIssue, IssueRef, LabelChange, NewIssue, PostedNote, TicketAdapter, TicketError,
};
use crate::validate::{ValidateError, Validation, Validator};
use std::collections::BTreeSet;
use std::path::Path;

/// Wrapper that adds tracing to any TicketAdapter
#[derive(Clone)]
pub struct TracedTicketAdapter<T> {
    inner: T,
}

impl<T> TracedTicketAdapter<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: TicketAdapter> TicketAdapter for TracedTicketAdapter<T> {
    fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TicketError> {
        let span = tracing::info_span!(
            "ticket.create_issue",
            project = issue.project.as_deref().unwrap_or_default()
        );
        let _guard = span.enter();

        tracing::info!(title = %issue.title, labels = ?issue.labels, "creating issue");

        let start = std::time::Instant::now();
        let result = self.inner.create_issue(issue);
        let elapsed = start.elapsed();

        match &result {
            Ok(created) => tracing::info!(
                iid = created.iid,
                url = %created.url,
                elapsed_ms = elapsed.as_millis() as u64,
                "issue created"
            ),
            // Not configured is an expected fallback, not a failure
            Err(TicketError::NotConfigured) => tracing::debug!("ticketing not configured"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "create issue failed"
            ),
        }

        result
    }

    fn add_note(
        &self,
        issue: &IssueRef,
        body: &str,
        labels: &LabelChange,
    ) -> Result<PostedNote, TicketError> {
        let span = tracing::info_span!("ticket.add_note", issue = %issue);
        let _guard = span.enter();

        tracing::info!(
            body_len = body.len(),
            add = ?labels.add,
            remove = ?labels.remove,
            "posting note"
        );

        let start = std::time::Instant::now();
        let result = self.inner.add_note(issue, body, labels);
        let elapsed = start.elapsed();

        match &result {
            Ok(note) => tracing::info!(
                note_id = note.note_id,
                author = %note.author,
                elapsed_ms = elapsed.as_millis() as u64,
                "note posted"
            ),
            Err(TicketError::NotConfigured) => tracing::debug!("ticketing not configured"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "add note failed"
            ),
        }

        result
    }

    fn get_labels(&self, issue: &IssueRef) -> Result<BTreeSet<String>, TicketError> {
        let result = self.inner.get_labels(issue);
        tracing::trace!(
            issue = %issue,
            count = result.as_ref().map(|l| l.len()).ok(),
            "fetched labels"
        );
        result
    }
}

/// Wrapper that adds tracing to any Validator
#[derive(Clone)]
pub struct TracedValidator<V> {
    inner: V,
}

impl<V> TracedValidator<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<V: Validator> Validator for TracedValidator<V> {
    fn validate(&self, dir: &Path) -> Result<Validation, ValidateError> {
        let span = tracing::info_span!("bagit.validate", dir = %dir.display());
        let _guard = span.enter();

        tracing::info!("validating");

        let start = std::time::Instant::now();
        let result = self.inner.validate(dir);
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "bag is valid"),
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "validation failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
