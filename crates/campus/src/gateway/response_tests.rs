// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    json_message = { br#"{"message":"X"}"#, "X" },
    json_message_with_extras = { br#"{"message":"Email taken","code":409}"#, "Email taken" },
    plain_text = { b"plain text", "plain text" },
    malformed_json = { br#"{"message": "#, r#"{"message":"# },
    json_without_message = { br#"{"error":"nope"}"#, r#"{"error":"nope"}"# },
    non_string_message = { br#"{"message":["a","b"]}"#, r#"{"message":["a","b"]}"# },
    empty = { b"", GENERIC_ERROR_MESSAGE },
    whitespace = { b"  \n", GENERIC_ERROR_MESSAGE },
    blank_message = { br#"{"message":""}"#, GENERIC_ERROR_MESSAGE },
    whitespace_message = { br#"{"message":"  ","code":500}"#, GENERIC_ERROR_MESSAGE },
)]
fn extracts_error_message(body: &[u8], expected: &str) {
    assert_eq!(error_message(body), expected);
}

#[test]
fn success_body_parses_json() -> anyhow::Result<()> {
    let value = parse_success(br#"[{"date":"2024-05-01","status":"present"}]"#)?;
    assert_eq!(value[0]["status"], "present");
    Ok(())
}

#[test]
fn empty_success_body_is_null() -> anyhow::Result<()> {
    assert_eq!(parse_success(b"")?, Value::Null);
    Ok(())
}

#[test]
fn non_json_success_body_is_invalid_response() {
    assert_eq!(parse_success(b"<html>"), Err(GatewayError::InvalidResponse));
}
