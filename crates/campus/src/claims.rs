// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory decoding of the bearer credential's identity claims.
//!
//! The signature is not verified: claims drive display only (expiry
//! countdown, role label). The backend stays authoritative for access.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::credential::SessionUser;

/// Role tag carried in the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Principal,
    Student,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
            Self::Principal => "principal",
            Self::Student => "student",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User identifier; the backend issues numeric or string ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Claims decoded from the credential's payload segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    /// Expiry as epoch seconds.
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    /// Seconds until expiry, or `None` once expired.
    pub fn expires_in(&self, now: u64) -> Option<u64> {
        if self.exp > now {
            Some(self.exp - now)
        } else {
            None
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_in(now).is_none()
    }

    /// Identity record persisted next to the credential.
    pub fn to_user(&self) -> SessionUser {
        SessionUser { id: self.id.clone(), name: self.name.clone(), role: self.role }
    }
}

/// Why a credential could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not three dot-separated segments.
    Malformed,
    /// Payload segment is not base64url.
    Base64(String),
    /// Payload is not a JSON claims record.
    Json(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => f.write_str("token is not a three-segment credential"),
            Self::Base64(e) => write!(f, "token payload is not base64url: {e}"),
            Self::Json(e) => write!(f, "token payload is not a claims record: {e}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode the identity claims from a compact three-segment token.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(DecodeError::Malformed),
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| DecodeError::Base64(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json(e.to_string()))
}

#[cfg(test)]
#[path = "claims_tests.rs"]
mod tests;
