// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Size of an AU's content on disk

use std::fmt;
use std::path::Path;

const UNITS: [(&str, u64); 5] = [
    ("B", 1),
    ("KiB", 1 << 10),
    ("MiB", 1 << 20),
    ("GiB", 1 << 30),
    ("TiB", 1 << 40),
];

/// Total bytes and file count under a directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    pub bytes: u64,
    pub files: u64,
}

impl Extent {
    /// Walk `root` recursively. Symbolic links are not followed.
    pub fn measure(root: &Path) -> std::io::Result<Extent> {
        let mut extent = Extent::default();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    extent.files += 1;
                    extent.bytes += entry.metadata()?.len();
                }
            }
        }
        Ok(extent)
    }

    /// Size scaled to the largest binary unit not exceeding it, up to TiB
    pub fn human_size(&self) -> (f64, &'static str) {
        let (unit, factor) = UNITS
            .iter()
            .rev()
            .find(|(_, factor)| self.bytes >= *factor)
            .copied()
            .unwrap_or(UNITS[0]);
        (self.bytes as f64 / factor as f64, unit)
    }
}

impl fmt::Display for Extent {
    /// `2.1 GiB (2,243,154,758 bytes, 689 files)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (size, unit) = self.human_size();
        write!(
            f,
            "{size:.1} {unit} ({} byte{}, {} file{})",
            thousands(self.bytes),
            plural(self.bytes),
            self.files,
            plural(self.files),
        )
    }
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "extent_tests.rs"]
mod tests;
