// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticketing adapters
//!
//! The ticketing system is the workflow's durable log: staging opens an
//! issue, later steps post notes to it.

mod gitlab;
mod noop;

pub use gitlab::{GitLabAdapter, GitLabConfig};
pub use noop::NoOpTicketAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTicketAdapter, TicketCall};

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

// `<host>/<project path>/[-/]issues/<iid>`
#[allow(clippy::expect_used)]
static ISSUE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/]+/(.+?)/(?:-/)?issues/(\d+)/?(?:[?#].*)?$")
        .expect("constant regex pattern is valid")
});

/// Errors from ticketing operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("ticketing is not configured")]
    NotConfigured,
    #[error("no project given for the issue")]
    MissingProject,
    #[error("ticketing API returned HTTP {status}")]
    Http { status: u16, body: String },
    #[error("ticketing request failed: {0}")]
    Transport(String),
    #[error("ticketing API error: {message}")]
    Api { message: String, raw: String },
}

impl TicketError {
    /// Process exit code mirroring the failed call
    pub fn exit_code(&self) -> i32 {
        match self {
            TicketError::NotConfigured | TicketError::MissingProject => 1,
            TicketError::Http { .. } => 1,
            TicketError::Transport(_) => 2,
            TicketError::Api { .. } => 3,
        }
    }

    /// Response body returned by the service, for diagnosis
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            TicketError::Http { body, .. } => Some(body),
            TicketError::Api { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Reference to an existing issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    /// Project path; `None` means the adapter's default project
    pub project: Option<String>,
    pub iid: u64,
    /// Web URL, when the reference was given as one
    pub url: Option<String>,
}

impl IssueRef {
    pub fn new(iid: u64) -> Self {
        Self {
            project: None,
            iid,
            url: None,
        }
    }

    pub fn in_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid issue reference `{0}`: expected an issue URL, <project>#<iid> or <iid>")]
pub struct IssueRefError(pub String);

impl FromStr for IssueRef {
    type Err = IssueRefError;

    /// Accepts `https://host/group/project/-/issues/12`, `group/project#12`,
    /// `#12` or `12`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || IssueRefError(s.to_string());

        if let Some(caps) = ISSUE_URL.captures(text) {
            let iid = caps[2].parse().map_err(|_| invalid())?;
            let url = text
                .split(['#', '?'])
                .next()
                .unwrap_or(text)
                .trim_end_matches('/');
            return Ok(IssueRef {
                project: Some(caps[1].to_string()),
                iid,
                url: Some(url.to_string()),
            });
        }

        let (project, iid) = match text.rsplit_once('#') {
            Some((project, iid)) => (Some(project.trim()).filter(|p| !p.is_empty()), iid),
            None => (None, text),
        };
        let iid = iid.trim().parse().map_err(|_| invalid())?;
        Ok(IssueRef {
            project: project.map(str::to_string),
            iid,
            url: None,
        })
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.url, &self.project) {
            (Some(url), _) => write!(f, "{url}"),
            (None, Some(project)) => write!(f, "{project}#{}", self.iid),
            (None, None) => write!(f, "#{}", self.iid),
        }
    }
}

/// Issue to open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIssue {
    /// Project path; `None` means the adapter's default project
    pub project: Option<String>,
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub iid: u64,
    pub url: String,
}

/// Label directives sent along with a note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelChange {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl LabelChange {
    /// Parse comma-separated lists, dropping blanks
    pub fn from_lists(add: &str, remove: &str) -> Self {
        Self {
            add: split_labels(add),
            remove: split_labels(remove),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Split a comma-separated label list
pub fn split_labels(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedNote {
    pub note_id: u64,
    pub author: String,
    pub created_at: String,
    pub noteable_id: u64,
    /// Web URL of the issue the note was posted to, when known
    pub issue_url: Option<String>,
}

impl PostedNote {
    /// `<issue url>#note_<id>`
    pub fn deep_link(&self) -> Option<String> {
        self.issue_url
            .as_ref()
            .map(|url| format!("{url}#note_{}", self.note_id))
    }
}

/// Adapter for the ticketing system
pub trait TicketAdapter: Clone + Send + Sync + 'static {
    /// Open a new issue
    fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TicketError>;

    /// Add a note to an existing issue, optionally changing its labels
    fn add_note(
        &self,
        issue: &IssueRef,
        body: &str,
        labels: &LabelChange,
    ) -> Result<PostedNote, TicketError>;

    /// Current labels of an issue
    fn get_labels(&self, issue: &IssueRef) -> Result<BTreeSet<String>, TicketError>;
}

fn parse_json(raw: &str) -> Result<Value, TicketError> {
    serde_json::from_str(raw).map_err(|e| TicketError::Api {
        message: format!("response is not JSON: {e}"),
        raw: raw.to_string(),
    })
}

/// The service's own error description, if the response carries one
fn error_description(value: &Value) -> Option<String> {
    ["message", "error", "error_description"]
        .iter()
        .find_map(|key| match value.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
}

fn api_error(value: &Value, raw: &str, missing: &str) -> TicketError {
    TicketError::Api {
        message: error_description(value)
            .unwrap_or_else(|| format!("response has no {missing}")),
        raw: raw.to_string(),
    }
}

/// Extract the issue number and web URL from a create-issue response
pub fn parse_created_issue(raw: &str) -> Result<CreatedIssue, TicketError> {
    let value = parse_json(raw)?;
    let iid = value
        .get("iid")
        .and_then(Value::as_u64)
        .ok_or_else(|| api_error(&value, raw, "iid"))?;
    let url = value
        .get("web_url")
        .and_then(Value::as_str)
        .ok_or_else(|| api_error(&value, raw, "web_url"))?;
    Ok(CreatedIssue {
        iid,
        url: url.to_string(),
    })
}

/// Extract note details from an add-note response.
///
/// A response without a `noteable_id` did not attach a note to anything and
/// is treated as an API error.
pub fn parse_posted_note(raw: &str) -> Result<PostedNote, TicketError> {
    let value = parse_json(raw)?;
    let noteable_id = value
        .get("noteable_id")
        .and_then(Value::as_u64)
        .ok_or_else(|| api_error(&value, raw, "noteable_id"))?;
    let note_id = value
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| api_error(&value, raw, "id"))?;
    let author = value
        .get("author")
        .and_then(|a| a.get("username").or_else(|| a.get("name")))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let created_at = value
        .get("created_at")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(PostedNote {
        note_id,
        author,
        created_at,
        noteable_id,
        issue_url: None,
    })
}

/// Label names from an issue response
pub fn parse_labels(raw: &str) -> Result<BTreeSet<String>, TicketError> {
    let value = parse_json(raw)?;
    let labels = value
        .get("labels")
        .and_then(Value::as_array)
        .ok_or_else(|| api_error(&value, raw, "labels"))?;
    Ok(labels
        .iter()
        .filter_map(|l| {
            l.as_str()
                .or_else(|| l.get("name").and_then(Value::as_str))
        })
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
