// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Campus: authenticated request gateway for the school-management backend.
//!
//! Every backend call goes through [`gateway::Gateway`], which attaches the
//! persisted bearer credential, interprets responses, and shares a single
//! token refresh across all callers that hit a 401 at the same time.

pub mod api;
pub mod claims;
pub mod config;
pub mod credential;
pub mod error;
pub mod events;
pub mod gateway;
pub mod shell;

pub use claims::{decode_claims, Claims, DecodeError, Role};
pub use config::GatewayConfig;
pub use credential::{CredentialStore, SessionUser};
pub use error::GatewayError;
pub use events::{EventBus, SessionEvent, SessionEventSink};
pub use gateway::{ApiRequest, Gateway};

/// Return current epoch seconds.
pub fn epoch_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
