// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitLab issues adapter over the REST API (v4)

use super::{
    parse_created_issue, parse_labels, parse_posted_note, CreatedIssue, IssueRef, LabelChange,
    NewIssue, PostedNote, TicketAdapter, TicketError,
};
use adpn_core::Settings;
use serde_json::json;
use std::collections::BTreeSet;
use std::time::Duration;

/// Default request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a GitLab instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLabConfig {
    /// API base, e.g. `https://gitlab.example/api/v4`
    pub api: String,
    pub token: String,
    /// Project path used when a reference does not name one
    pub project: Option<String>,
    pub timeout: Duration,
}

impl GitLabConfig {
    /// Read `gitlab/api`, `gitlab/token`, `gitlab/project` and
    /// `gitlab/timeout`. `None` unless both API base and token are set.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        let api = settings.value("gitlab/api")?.trim().trim_end_matches('/');
        let token = settings.value("gitlab/token")?.trim();
        let timeout = settings
            .value("gitlab/timeout")
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self {
            api: api.to_string(),
            token: token.to_string(),
            project: settings.value("gitlab/project").map(|p| p.trim().to_string()),
            timeout: Duration::from_secs(timeout),
        })
    }

    /// Web root of the instance, derived from the API base
    fn web_root(&self) -> &str {
        self.api
            .strip_suffix("/api/v4")
            .unwrap_or(&self.api)
    }
}

/// Blocking GitLab client
#[derive(Clone)]
pub struct GitLabAdapter {
    agent: ureq::Agent,
    config: GitLabConfig,
}

impl GitLabAdapter {
    pub fn new(config: GitLabConfig) -> Self {
        // Non-2xx statuses are read as responses so their bodies can be reported
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, config }
    }

    pub fn config(&self) -> &GitLabConfig {
        &self.config
    }

    fn project<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str, TicketError> {
        explicit
            .or(self.config.project.as_deref())
            .filter(|p| !p.is_empty())
            .ok_or(TicketError::MissingProject)
    }

    fn issues_url(&self, project: &str) -> String {
        format!(
            "{}/projects/{}/issues",
            self.config.api,
            urlencoding::encode(project)
        )
    }

    fn issue_web_url(&self, issue: &IssueRef, project: &str) -> String {
        match &issue.url {
            Some(url) => url.clone(),
            None => format!("{}/{}/-/issues/{}", self.config.web_root(), project, issue.iid),
        }
    }

    fn send(&self, method: &str, url: &str, payload: Option<serde_json::Value>) -> Result<String, TicketError> {
        tracing::debug!(method, url, "gitlab request");
        let token = self.config.token.as_str();
        let result = match (method, payload) {
            ("GET", _) => self.agent.get(url).header("PRIVATE-TOKEN", token).call(),
            (method, payload) => {
                let body = payload.map(|p| p.to_string()).unwrap_or_default();
                let request = if method == "PUT" {
                    self.agent.put(url)
                } else {
                    self.agent.post(url)
                };
                request
                    .header("PRIVATE-TOKEN", token)
                    .header("Content-Type", "application/json")
                    .send(body)
            }
        };

        let mut response = result.map_err(|e| TicketError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TicketError::Transport(format!("failed to read response: {e}")))?;

        if !(200..300).contains(&status) {
            return Err(TicketError::Http { status, body });
        }
        Ok(body)
    }
}

impl TicketAdapter for GitLabAdapter {
    fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TicketError> {
        let project = self.project(issue.project.as_deref())?;
        let payload = json!({
            "title": issue.title,
            "description": issue.description,
            "labels": issue.labels.join(","),
        });
        let raw = self.send("POST", &self.issues_url(project), Some(payload))?;
        parse_created_issue(&raw)
    }

    fn add_note(
        &self,
        issue: &IssueRef,
        body: &str,
        labels: &LabelChange,
    ) -> Result<PostedNote, TicketError> {
        let project = self.project(issue.project.as_deref())?;
        let issue_url = format!("{}/{}", self.issues_url(project), issue.iid);

        let raw = self.send(
            "POST",
            &format!("{issue_url}/notes"),
            Some(json!({ "body": body })),
        )?;
        let mut note = parse_posted_note(&raw)?;
        note.issue_url = Some(self.issue_web_url(issue, project));

        if !labels.is_empty() {
            let payload = json!({
                "add_labels": labels.add.join(","),
                "remove_labels": labels.remove.join(","),
            });
            // The note is already posted; a label failure must not hide it
            if let Err(e) = self.send("PUT", &issue_url, Some(payload)) {
                tracing::warn!(issue = %issue, error = %e, "note posted but label change failed");
            }
        }

        Ok(note)
    }

    fn get_labels(&self, issue: &IssueRef) -> Result<BTreeSet<String>, TicketError> {
        let project = self.project(issue.project.as_deref())?;
        let raw = self.send(
            "GET",
            &format!("{}/{}", self.issues_url(project), issue.iid),
            None,
        )?;
        parse_labels(&raw)
    }
}

#[cfg(test)]
#[path = "gitlab_tests.rs"]
mod tests;
