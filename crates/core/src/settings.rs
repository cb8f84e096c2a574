// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Switch table for one command invocation
//!
//! Built once at process start from hard-coded defaults, an optional TOML
//! config file and `--name=value` command-line switches (later layers win),
//! then only ever read.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ADPN_CONFIG";

/// Config file looked for under the user's config directory
pub const CONFIG_FILE: &str = "adpnet.toml";

/// Switch prefix for render-context overrides
pub const TEMPLATE_OVERRIDE_PREFIX: &str = "template:";

// `--name` or `--name=value`. Allow expect here as the regex is compile-time
// verified to be valid
#[allow(clippy::expect_used)]
static SWITCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^--([0-9A-Za-z_][^=]*)(?:=(.*))?$").expect("constant regex pattern is valid")
});

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Immutable switch table plus the invocation's positional arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    switches: BTreeMap<String, String>,
    args: Vec<String>,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Build settings for a command line, locating the config file from the
    /// `config` switch, then `ADPN_CONFIG`, then the user config directory.
    pub fn load(argv: &[String]) -> Result<Settings, SettingsError> {
        let (switches, args) = split_args(argv);

        let explicit = switches
            .get("config")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut builder = Settings::builder().defaults(default_switches());
        builder = match explicit {
            Some(path) => builder.config_file(&path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => builder.config_file(&path)?,
                None => builder,
            },
        };

        Ok(builder.switches(switches).args(args).build())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.switches.get(name).map(String::as_str)
    }

    /// Non-empty switch value
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    /// True for a non-empty value other than `0`, `false` or `no`
    pub fn switched(&self, name: &str) -> bool {
        self.value(name)
            .is_some_and(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
    }

    /// `template:<name>=<value>` overrides, by placeholder name
    pub fn template_overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.switches.iter().filter_map(|(k, v)| {
            k.strip_prefix(TEMPLATE_OVERRIDE_PREFIX)
                .filter(|name| !name.is_empty())
                .map(|name| (name, v.as_str()))
        })
    }

    /// Positional arguments, in order
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Positional arguments other than the lone `-`
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(String::as_str).filter(|a| *a != "-")
    }

    /// True when a lone `-` asks for piped standard input
    pub fn reads_stdin(&self) -> bool {
        self.args.iter().any(|a| a == "-")
    }

    pub fn switches(&self) -> impl Iterator<Item = (&str, &str)> {
        self.switches.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Layered construction; each layer overrides the previous ones
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    switches: BTreeMap<String, String>,
    args: Vec<String>,
}

impl SettingsBuilder {
    pub fn defaults<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.switches(pairs)
    }

    pub fn switch(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.switches.insert(name.into(), value.into());
        self
    }

    pub fn switches<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.switches
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Layer a TOML config file. Nested tables flatten to `table/key`.
    pub fn config_file(self, path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let flat = parse_config(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), switches = flat.len(), "loaded config file");
        Ok(self.switches(flat))
    }

    pub fn args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Settings {
        Settings {
            switches: self.switches,
            args: self.args,
        }
    }
}

/// Split a command line into `--name=value` switches and positional arguments.
///
/// A bare `--name` records `name=name`. Single-dash flags such as `-v` are
/// ignored; a lone `-` and negative numbers stay positional.
pub fn split_args(argv: &[String]) -> (BTreeMap<String, String>, Vec<String>) {
    let mut switches = BTreeMap::new();
    let mut args = Vec::new();
    for arg in argv {
        match SWITCH.captures(arg) {
            Some(caps) => {
                let name = caps[1].trim().to_string();
                let value = caps
                    .get(2)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| name.clone());
                switches.insert(name, value);
            }
            None if is_short_flag(arg) => {}
            None => args.push(arg.clone()),
        }
    }
    (switches, args)
}

/// True for a single-dash flag like `-v`, which is neither a switch nor a path
pub fn is_short_flag(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(rest) => {
            !rest.is_empty()
                && !rest.starts_with('-')
                && !rest.chars().all(|c| c.is_ascii_digit() || c == '.')
        }
        None => false,
    }
}

/// Flatten TOML config text into switch names
pub fn parse_config(content: &str) -> Result<BTreeMap<String, String>, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;
    let mut flat = BTreeMap::new();
    flatten("", &table, &mut flat);
    Ok(flat)
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}/{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten(&name, nested, out),
            other => {
                out.insert(name, scalar_text(other));
            }
        }
    }
}

fn scalar_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn default_switches() -> [(&'static str, &'static str); 2] {
    [("output", "text/plain"), ("gitlab/timeout", "30")]
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("adpn").join(CONFIG_FILE))
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
