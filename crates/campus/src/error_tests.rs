// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    api = { GatewayError::Api { status: 422, message: "X".into() }, "API_ERROR", Some(422) },
    expired = { GatewayError::session_expired(), "SESSION_EXPIRED", Some(401) },
    transport = { GatewayError::Transport("refused".into()), "TRANSPORT", None },
    invalid = { GatewayError::InvalidResponse, "INVALID_RESPONSE", None },
    encode = { GatewayError::Encode("bad".into()), "ENCODE", None },
)]
fn codes_and_status(err: GatewayError, code: &str, status: Option<u16>) {
    assert_eq!(err.as_str(), code);
    assert_eq!(err.http_status(), status);
}

#[test]
fn display_is_the_message() {
    let err = GatewayError::Api { status: 400, message: "Class name already taken".into() };
    assert_eq!(err.to_string(), "Class name already taken");
    assert_eq!(GatewayError::InvalidResponse.to_string(), INVALID_RESPONSE_MESSAGE);
}

#[test]
fn session_expired_carries_user_message() {
    let err = GatewayError::session_expired();
    assert!(err.is_session_expired());
    assert_eq!(err.message(), SESSION_EXPIRED_MESSAGE);
}
