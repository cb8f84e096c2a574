// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

fn serial() -> MutexGuard<'static, ()> {
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn scratch_file_is_removed_on_drop() {
    let _serial = serial();
    let scratch = ScratchFile::new().unwrap();
    let path = scratch.path().to_path_buf();
    assert!(path.exists());
    assert!(is_live(&path));

    drop(scratch);
    assert!(!path.exists());
    assert!(!is_live(&path));
}

#[test]
fn writer_shares_the_file() {
    let _serial = serial();
    let scratch = ScratchFile::new().unwrap();
    let mut writer = scratch.writer().unwrap();
    writer.write_all(b"Payload-Oxum validated\n").unwrap();
    writer.flush().unwrap();

    assert_eq!(scratch.read_to_string().unwrap(), "Payload-Oxum validated\n");
}

#[test]
fn purge_removes_live_files() {
    let _serial = serial();
    let scratch = ScratchFile::new().unwrap();
    let path = scratch.path().to_path_buf();

    assert!(purge() >= 1);
    assert!(!path.exists());
    assert!(!is_live(&path));

    // Dropping after a purge is harmless
    drop(scratch);
}
