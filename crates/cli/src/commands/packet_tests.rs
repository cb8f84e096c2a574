// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use adpn_core::Settings;

const STREAM: &str = "\
JSON PACKET: {\"Ingest Step\":\"staged\",\"Staged To\":\"NodeA\",\"parameters\":[[\"base_url\",\"https://example/\"]]}
some log line
JSON PACKET: {\"Ingest Step\":\"published\",\"Staged To\":\"NodeB\"}
";

fn output(switches: &[(&str, &str)]) -> Result<String, CliError> {
    let settings = Settings::builder().switches(switches.iter().copied()).build();
    let inv = Invocation::from_parts(settings, STREAM, Parse::Strict)?;
    let mut out = Vec::new();
    run(&inv, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_cascade_by_default() {
    let text = output(&[("output", "json")]).unwrap();
    assert!(text.starts_with("{\"Ingest Step\":\"published\",\"Staged To\":\"NodeB\""), "{text}");
}

#[test]
fn test_text_mode_prefixes_packet() {
    let text = output(&[("index", "1")]).unwrap();
    assert_eq!(text, "JSON PACKET: {\"Ingest Step\":\"published\",\"Staged To\":\"NodeB\"}\n");
}

#[test]
fn test_pipeline_selects_and_restamps() {
    let text = output(&[("pipeline", "staged:accepted"), ("key", "Ingest Step")]).unwrap();
    assert_eq!(text, "accepted");
}

#[test]
fn test_parameter_key() {
    let text = output(&[("index", "0"), ("key", "@base_url"), ("output", "json")]).unwrap();
    assert_eq!(text, "\"https://example/\"\n");
}

#[test]
fn test_missing_key_fails() {
    let err = output(&[("key", "Gitlab Issue")]).unwrap_err();
    assert_eq!(err.exit_code, 1);
    assert!(err.message.contains("Gitlab Issue"));
}

#[test]
fn test_index_out_of_range() {
    let err = output(&[("index", "5")]).unwrap_err();
    assert!(err.message.contains("No packet at index 5"));
}

#[test]
fn test_no_matching_packet() {
    let err = output(&[("pipeline", "promoted:published")]).unwrap_err();
    assert_eq!(err.exit_code, 4);
}
