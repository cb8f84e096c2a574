//! Help output specs

use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn help_lists_every_verb() {
    Workspace::empty()
        .adpn()
        .args(&["--help"])
        .run()
        .success()
        .stdout(
            predicate::str::contains("notify")
                .and(predicate::str::contains("packet"))
                .and(predicate::str::contains("switches"))
                .and(predicate::str::contains("verify")),
        );
}

#[test]
fn version_prints_name() {
    Workspace::empty()
        .adpn()
        .args(&["--version"])
        .passes()
        .stdout_has("adpn");
}
