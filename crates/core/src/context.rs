// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render context: placeholder name to resolved value

use crate::extent::Extent;
use crate::packet::Packet;
use crate::resolve::{Resolver, Source};
use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder names every notification template can rely on
pub const WELL_KNOWN: [&str; 17] = [
    "cmd",
    "staged_to",
    "staged_by",
    "accepted_by",
    "promoted_by",
    "admin_email",
    "gitlab_issue",
    "timestamp",
    "user_name",
    "extent",
    "location",
    "subdirectory",
    "au_start_url",
    "au_title",
    "piped_text",
    "json",
    "pretty_json",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    vars: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Overlay user overrides; they beat computed values
    pub fn overridden_by<'o>(mut self, overrides: impl IntoIterator<Item = (&'o str, &'o str)>) -> Self {
        for (name, value) in overrides {
            self.vars.insert(name.to_string(), value.to_string());
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Values computed from the environment rather than read from input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computed {
    pub user_name: String,
    pub timestamp: String,
}

impl Computed {
    /// Current login name and local time
    pub fn detect() -> Self {
        Self {
            user_name: current_user(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string(),
        }
    }
}

fn current_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Resolve every well-known placeholder for `packet`, then apply the
/// `template:<name>` overrides from the switch table.
pub fn build(resolver: &Resolver<'_>, packet: &Packet, cmd: &str, computed: &Computed) -> RenderContext {
    let resolver = resolver.focused(packet);
    let settings = resolver.settings();
    let user = Source::literal(&computed.user_name);

    let staged_by = resolver.resolve(&[
        Source::switch("staged-by"),
        Source::field("Staged By"),
        user.clone(),
    ]);
    // Acceptance falls back to whoever staged the content
    let accepted_by = resolver.resolve(&[
        Source::switch("accepted-by"),
        Source::field("Accepted By"),
        Source::literal(&staged_by),
    ]);
    let promoted_by = resolver.resolve(&[
        Source::switch("promoted-by"),
        Source::field("Promoted By"),
        Source::literal(&accepted_by),
    ]);
    let location = resolver.resolve(&[
        Source::switch("location"),
        Source::switch("local"),
        Source::field("Location"),
        Source::field("Local Path"),
        Source::literal(settings.paths().next().unwrap_or_default()),
    ]);

    let mut extent = resolver.resolve(&[
        Source::switch("extent"),
        Source::switch("au_file_size"),
        Source::field("File Size"),
        Source::field("File Size "),
    ]);
    if extent.is_empty() {
        extent = measure(&location).unwrap_or_default();
    }

    let context = RenderContext::new()
        .with(
            "cmd",
            resolver.resolve(&[Source::switch("cmd"), Source::literal(cmd)]),
        )
        .with(
            "staged_to",
            resolver.resolve(&[
                Source::switch("staged-to"),
                Source::switch("to"),
                Source::field("Staged To"),
            ]),
        )
        .with("staged_by", staged_by)
        .with("accepted_by", accepted_by)
        .with("promoted_by", promoted_by)
        .with(
            "admin_email",
            resolver.resolve(&[
                Source::switch("admin-email"),
                Source::switch("user/email"),
                Source::field("Admin Email"),
            ]),
        )
        .with(
            "gitlab_issue",
            resolver.resolve(&[
                Source::switch("issue"),
                Source::switch("gitlab-issue"),
                Source::field("Gitlab Issue"),
            ]),
        )
        .with(
            "timestamp",
            resolver.resolve(&[
                Source::switch("timestamp"),
                Source::literal(&computed.timestamp),
            ]),
        )
        .with(
            "user_name",
            resolver.resolve(&[
                Source::switch("user"),
                Source::switch("user/realname"),
                user,
            ]),
        )
        .with("extent", extent)
        .with("location", location)
        .with(
            "subdirectory",
            resolver.resolve(&[
                Source::switch("subdirectory"),
                Source::switch("directory"),
                Source::field("@subdirectory"),
                Source::field("Subdirectory"),
            ]),
        )
        .with(
            "au_start_url",
            resolver.resolve(&[
                Source::switch("au_start_url"),
                Source::field("Start URL"),
                Source::field("au_start_url"),
            ]),
        )
        .with(
            "au_title",
            resolver.resolve(&[
                Source::switch("au_title"),
                Source::field("Ingest Title"),
                Source::field("au_title"),
            ]),
        )
        .with("piped_text", resolver.batch().raw_text())
        .with("json", packet.to_compact())
        .with("pretty_json", packet.to_pretty());

    context.overridden_by(settings.template_overrides())
}

fn measure(location: &str) -> Option<String> {
    let path = Path::new(location);
    if location.is_empty() || !path.is_dir() {
        return None;
    }
    match Extent::measure(path) {
        Ok(extent) => Some(extent.to_string()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not measure extent");
            None
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
