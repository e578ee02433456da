// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed credential store: JSON file with atomic writes.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::credential::{CredentialStore, SessionUser, StoredSession};

/// Load a persisted session from a JSON file.
pub fn load(path: &Path) -> anyhow::Result<StoredSession> {
    let contents = std::fs::read_to_string(path)?;
    let session: StoredSession = serde_json::from_str(&contents)?;
    Ok(session)
}

/// Save a session to a JSON file atomically (write tmp + rename).
///
/// The temp name is unique per process and call so concurrent saves never
/// share a `.tmp` file.
pub fn save(path: &Path, session: &StoredSession) -> anyhow::Result<()> {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let json = serde_json::to_string_pretty(session)?;
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(
        "{}.{}.{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id(),
        seq,
    );
    let tmp_path = path.with_file_name(tmp_name);
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Credential store persisted to `session.json`.
///
/// Reads are served from memory. Every write goes through to disk with a
/// synchronous write and rename of a small JSON file; the gateway makes
/// these calls while holding its refresh lock, so a slow filesystem delays
/// concurrent 401 recovery by the same amount. Disk failures are logged and
/// do not fail the calling request.
pub struct FileCredentialStore {
    path: PathBuf,
    session: RwLock<StoredSession>,
}

impl FileCredentialStore {
    /// Open the store, seeding it from `path` if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = if path.exists() {
            match load(&path) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        err = %e,
                        "ignoring unreadable session file"
                    );
                    StoredSession::default()
                }
            }
        } else {
            StoredSession::default()
        };
        Self { path, session: RwLock::new(session) }
    }

    fn persist(&self, session: &StoredSession) {
        if let Err(e) = save(&self.path, session) {
            tracing::warn!(path = %self.path.display(), err = %e, "failed to persist session");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        self.session.read().token.clone()
    }

    fn user(&self) -> Option<SessionUser> {
        self.session.read().user.clone()
    }

    fn save_session(&self, token: &str, user: &SessionUser) {
        let mut session = self.session.write();
        *session = StoredSession { token: Some(token.to_owned()), user: Some(user.clone()) };
        self.persist(&session);
    }

    fn save_token(&self, token: &str) {
        let mut session = self.session.write();
        session.token = Some(token.to_owned());
        self.persist(&session);
    }

    fn clear(&self) {
        let mut session = self.session.write();
        *session = StoredSession::default();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                let path = self.path.display();
                tracing::warn!(path = %path, err = %e, "failed to remove session file");
            }
        }
    }
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
