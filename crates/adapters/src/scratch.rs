// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scratch files for buffering subprocess output
//!
//! Every live scratch file is listed in a process-wide registry so a signal
//! handler can remove them all before the process exits.

use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::NamedTempFile;

static LIVE: LazyLock<Mutex<BTreeSet<PathBuf>>> = LazyLock::new(Default::default);

// Tests that create scratch files hold this so a purge cannot race them
#[cfg(test)]
pub(crate) static TEST_SERIAL: Mutex<()> = Mutex::new(());

fn live() -> MutexGuard<'static, BTreeSet<PathBuf>> {
    LIVE.lock().unwrap_or_else(|e| e.into_inner())
}

/// Temporary file removed when dropped or purged
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    pub fn new() -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("adpn-")
            .suffix(".tmp")
            .tempfile()?;
        live().insert(file.path().to_path_buf());
        tracing::trace!(path = %file.path().display(), "scratch file created");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// A second handle for a child process to write to
    pub fn writer(&self) -> io::Result<File> {
        self.file.as_file().try_clone()
    }

    pub fn read_to_string(&self) -> io::Result<String> {
        std::fs::read_to_string(self.path())
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        live().remove(self.file.path());
    }
}

/// Remove every live scratch file. Returns how many were removed.
pub fn purge() -> usize {
    let mut live = live();
    let removed = live
        .iter()
        .filter(|path| std::fs::remove_file(path).is_ok())
        .count();
    live.clear();
    removed
}

/// True while `path` belongs to a live scratch file
pub fn is_live(path: &Path) -> bool {
    live().contains(path)
}

#[cfg(test)]
pub(crate) fn live_count() -> usize {
    live().len()
}

#[cfg(test)]
#[path = "scratch_tests.rs"]
mod tests;
