// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response interpretation shared by every gateway call.

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{GatewayError, GENERIC_ERROR_MESSAGE};

/// Turn a non-401 response into the caller's result.
pub(crate) async fn interpret(resp: reqwest::Response) -> Result<Value, GatewayError> {
    let status = resp.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    if status.is_success() {
        let bytes = resp.bytes().await?;
        return parse_success(&bytes);
    }
    let bytes = resp.bytes().await.unwrap_or_default();
    let message = error_message(&bytes);
    tracing::debug!(status = status.as_u16(), %message, "request failed");
    Err(GatewayError::Api { status: status.as_u16(), message })
}

/// Parse a success body. Empty bodies yield `null`.
pub fn parse_success(bytes: &[u8]) -> Result<Value, GatewayError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|_| GatewayError::InvalidResponse)
}

/// Extract a human-readable message from an error body.
///
/// Prefers a JSON `message` string, then the raw text, then a generic message.
/// A blank `message` field counts as no message at all.
pub fn error_message(bytes: &[u8]) -> String {
    if let Ok(Value::Object(body)) = serde_json::from_slice::<Value>(bytes) {
        if let Some(Value::String(message)) = body.get("message") {
            return if message.trim().is_empty() {
                GENERIC_ERROR_MESSAGE.to_owned()
            } else {
                message.clone()
            };
        }
    }
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.is_empty() {
        GENERIC_ERROR_MESSAGE.to_owned()
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
