// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Fallback message when an error response carries no usable body.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Message shown to the user when the session cannot be recovered.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Message for a success response whose body is not JSON.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response format";

/// Errors surfaced by gateway operations.
///
/// `Clone` because a single refresh outcome is fanned out to every request
/// queued behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Credentials could not be recovered and were cleared.
    SessionExpired { message: String },
    /// The request never reached the server.
    Transport(String),
    /// A success response body was not valid JSON.
    InvalidResponse,
    /// A request payload could not be serialized.
    Encode(String),
}

impl GatewayError {
    pub(crate) fn session_expired() -> Self {
        Self::SessionExpired { message: SESSION_EXPIRED_MESSAGE.to_owned() }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api { .. } => "API_ERROR",
            Self::SessionExpired { .. } => "SESSION_EXPIRED",
            Self::Transport(_) => "TRANSPORT",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::Encode(_) => "ENCODE",
        }
    }

    /// HTTP status associated with this error, if the backend produced one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::SessionExpired { .. } => Some(401),
            _ => None,
        }
    }

    /// Human-readable message, suitable for a toast.
    pub fn message(&self) -> &str {
        match self {
            Self::Api { message, .. } | Self::SessionExpired { message } => message,
            Self::Transport(message) | Self::Encode(message) => message,
            Self::InvalidResponse => INVALID_RESPONSE_MESSAGE,
        }
    }

    /// Whether this error ended the session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
