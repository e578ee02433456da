// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session credential storage.
//!
//! Two entries are kept: the bearer `token` and the `user` identity record.
//! They are written together at login and cleared together at logout or
//! terminal auth failure. A refresh only replaces the token.

pub mod persist;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::claims::{Role, UserId};

/// Identity record persisted next to the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// Persisted session: both storage entries.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

/// Client-local storage for the session credential.
///
/// The gateway reads the token before every request and calls the write
/// methods while holding its refresh lock, so writes should finish quickly.
/// Synchronous local file IO is acceptable; network round-trips are not.
pub trait CredentialStore: Send + Sync {
    /// Current bearer credential, if any.
    fn token(&self) -> Option<String>;
    /// Current identity record, if any.
    fn user(&self) -> Option<SessionUser>;
    /// Write both entries (login).
    fn save_session(&self, token: &str, user: &SessionUser);
    /// Replace the credential, keeping the identity record (refresh).
    fn save_token(&self, token: &str);
    /// Delete both entries. Idempotent.
    fn clear(&self);
}

/// In-process store with no persistence.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    session: RwLock<StoredSession>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { session: RwLock::new(StoredSession { token: Some(token.into()), user: None }) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.session.read().token.clone()
    }

    fn user(&self) -> Option<SessionUser> {
        self.session.read().user.clone()
    }

    fn save_session(&self, token: &str, user: &SessionUser) {
        *self.session.write() =
            StoredSession { token: Some(token.to_owned()), user: Some(user.clone()) };
    }

    fn save_token(&self, token: &str) {
        self.session.write().token = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.session.write() = StoredSession::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_refresh_keeps_user() {
        let store = MemoryCredentialStore::new();
        let user = SessionUser { id: UserId::Number(1), name: "Ana".into(), role: Role::Teacher };
        store.save_session("t1", &user);
        store.save_token("t2");
        assert_eq!(store.token().as_deref(), Some("t2"));
        assert_eq!(store.user(), Some(user));
    }

    #[test]
    fn memory_store_clear_is_idempotent() {
        let store = MemoryCredentialStore::with_token("t1");
        store.clear();
        store.clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
    }
}
