// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification templates
//!
//! Templates are plain text with `%(name)s` placeholders. An optional divider
//! line made only of `=` characters separates a subject line from the body.

use crate::context::RenderContext;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

// Regex pattern for %(name)s - this is a constant valid pattern
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%\(([A-Za-z_][A-Za-z0-9_]*)\)s").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static DIVIDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*=+\s*$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("constant regex pattern is valid"));

/// File extension of template resources
pub const TEMPLATE_EXTENSION: &str = "txt";

/// Used for any slug without a template resource
pub const DEFAULT_TEMPLATE: &str = "\
ADPN %(cmd)s: %(au_title)s
==========
%(au_title)s (%(extent)s)

Staged To: %(staged_to)s
Staged By: %(staged_by)s
Accepted By: %(accepted_by)s
Promoted By: %(promoted_by)s
Start URL: %(au_start_url)s
Subdirectory: %(subdirectory)s
Location: %(location)s
Ticket: %(gitlab_issue)s

Sent by %(user_name)s at %(timestamp)s. Questions go to %(admin_email)s.

JSON PACKET: %(json)s
";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid template name `{0}`")]
    InvalidSlug(String),
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Replace each `%(name)s` with its context value in a single pass.
///
/// Unknown placeholders are left as-is, and substituted values are never
/// scanned again.
pub fn interpolate(template: &str, context: &RenderContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| {
            context
                .get(&caps[1])
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Rendered text split into subject and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// First line before the divider; `None` without a divider
    pub subject: Option<String>,
    pub body: String,
}

impl Rendered {
    /// The subject, unless it is blank or a bare `Prefix:` left by an empty
    /// placeholder
    pub fn filled_subject(&self) -> Option<&str> {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.ends_with(':'))
    }
}

/// Split at the first divider line.
pub fn split(text: &str) -> Rendered {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let divider = lines
        .iter()
        .position(|line| DIVIDER.is_match(line.trim_end_matches(['\r', '\n'])));

    match divider {
        Some(index) => Rendered {
            subject: lines[..index]
                .first()
                .map(|line| line.trim().to_string())
                .filter(|s| !s.is_empty()),
            body: lines[index + 1..].concat(),
        },
        None => Rendered {
            subject: None,
            body: text.to_string(),
        },
    }
}

/// Where templates are loaded from
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    dir: Option<PathBuf>,
}

impl TemplateStore {
    /// Store that only knows the built-in default
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Store reading `<dir>/<slug>.txt`, falling back to the built-in default
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Template text for `slug`
    pub fn load(&self, slug: &str) -> Result<String, TemplateError> {
        if !SLUG.is_match(slug) {
            return Err(TemplateError::InvalidSlug(slug.to_string()));
        }
        let Some(dir) = &self.dir else {
            return Ok(DEFAULT_TEMPLATE.to_string());
        };

        let path = dir.join(format!("{slug}.{TEMPLATE_EXTENSION}"));
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loaded template");
                Ok(text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(slug, "no template resource, using built-in default");
                Ok(DEFAULT_TEMPLATE.to_string())
            }
            Err(source) => Err(TemplateError::Read { path, source }),
        }
    }

    /// Load, interpolate and split the template for `slug`
    pub fn render(&self, slug: &str, context: &RenderContext) -> Result<Rendered, TemplateError> {
        let template = self.load(slug)?;
        Ok(split(&interpolate(&template, context)))
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
