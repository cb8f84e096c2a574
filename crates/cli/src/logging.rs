// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup. Logs go to stderr; stdout carries packets and rendered text.

use adpn_core::Settings;

/// Environment variable holding an EnvFilter directive
pub const LOG_ENV: &str = "ADPN_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Level forced by `--quiet`, `--debug` or `--verbose`, strongest first
fn switched_level(settings: &Settings) -> Option<&'static str> {
    if settings.switched("quiet") {
        Some("error")
    } else if settings.switched("debug") {
        Some("debug")
    } else if settings.switched("verbose") {
        Some("info")
    } else {
        None
    }
}

pub fn setup(settings: &Settings) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match switched_level(settings) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    };

    // A second command in the same process keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
