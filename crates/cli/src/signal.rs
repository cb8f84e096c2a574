// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt handling: scratch files never outlive an interrupted command

/// Exit status after SIGINT or SIGTERM
pub const INTERRUPTED_EXIT: i32 = 130;

/// Purge live scratch files and exit on Ctrl-C or SIGTERM
pub fn install() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        let purged = adpn_adapters::scratch::purge();
        tracing::debug!(purged, "interrupted, scratch files removed");
        std::process::exit(INTERRUPTED_EXIT);
    })?;
    Ok(())
}
