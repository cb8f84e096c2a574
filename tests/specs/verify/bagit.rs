//! BagIt verification specs

use crate::prelude::*;

#[test]
fn missing_directory_exits_1() {
    Workspace::empty()
        .adpn()
        .args(&["verify"])
        .exits(1)
        .stderr_has("no directory to verify");
}

#[test]
fn directory_without_bag_declaration_exits_2() {
    let temp = Workspace::empty();
    temp.file("loose/data/page-001.tif", "tif");
    temp.adpn().args(&["verify", "loose"]).exits(2);
}

#[cfg(unix)]
#[test]
fn validator_output_and_status_pass_through() {
    use std::os::unix::fs::PermissionsExt;

    let temp = Workspace::empty();
    temp.file("bag/bagit.txt", "BagIt-Version: 0.97\n");
    temp.file("bag/data/page-001.tif", "tif");
    let script = temp.file(
        "fake-bagit.sh",
        "#!/bin/sh\necho \"$2: checksum mismatch\"\nexit 5\n",
    );
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    let program = format!("--bagit={}", script.display());

    temp.adpn()
        .args(&["verify", &program, "bag"])
        .exits(5)
        .stdout_has("bag: checksum mismatch");
}

#[cfg(unix)]
#[test]
fn valid_bag_stamps_packet() {
    use std::os::unix::fs::PermissionsExt;

    let temp = Workspace::empty();
    temp.file("bag/bagit.txt", "BagIt-Version: 0.97\n");
    temp.file("bag/data/page-001.tif", "tif");
    let script = temp.file("fake-bagit.sh", "#!/bin/sh\necho \"$2 is valid\"\n");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    let program = format!("--bagit={}", script.display());

    temp.adpn()
        .args(&["verify", &program, "--output=json", "bag", "-"])
        .stdin(r#"{"Ingest Title":"WPA Folder 01"}"#)
        .passes()
        .stdout_eq("bag is valid\n{\"Ingest Title\":\"WPA Folder 01\",\"BagIt Validation\":\"ok\"}\n");
}
