//! Packet to switches specs

use crate::prelude::*;

#[test]
fn switches_for_plugin_and_parameters() {
    Workspace::empty()
        .adpn()
        .args(&["switches", "-"])
        .stdin(r#"JSON PACKET: {"Ingest Title":"WPA Folder 01","Plugin JAR":"https://example/plugin.jar","Plugin Name":"WPA Photos","parameters":[["base_url","https://example/"],["subdirectory","wpa-01"]]}"#)
        .passes()
        .stdout_eq(
            "--au_title=WPA Folder 01\n\
             --jar=https://example/plugin.jar\n\
             --plugin=WPA Photos\n\
             --base_url=https://example/\n\
             --subdirectory=wpa-01\n",
        );
}
