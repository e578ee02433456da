// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::claims::{Role, UserId};

fn parent() -> SessionUser {
    SessionUser { id: UserId::Number(42), name: "Dewi".into(), role: Role::Parent }
}

#[test]
fn session_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/session.json");

    let store = FileCredentialStore::open(&path);
    assert_eq!(store.token(), None);
    store.save_session("tok-1", &parent());
    store.save_token("tok-2");

    let reopened = FileCredentialStore::open(&path);
    assert_eq!(reopened.token().as_deref(), Some("tok-2"));
    assert_eq!(reopened.user(), Some(parent()));
    Ok(())
}

#[test]
fn file_uses_token_and_user_keys() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    FileCredentialStore::open(&path).save_session("tok", &parent());

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(raw["token"], "tok");
    assert_eq!(raw["user"]["id"], 42);
    assert_eq!(raw["user"]["name"], "Dewi");
    assert_eq!(raw["user"]["role"], "parent");
    Ok(())
}

#[test]
fn clear_removes_file_and_is_idempotent() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    let store = FileCredentialStore::open(&path);
    store.save_session("tok", &parent());
    assert!(path.exists());

    store.clear();
    store.clear();
    assert!(!path.exists());
    assert_eq!(store.token(), None);
    assert_eq!(store.user(), None);
    Ok(())
}

#[test]
fn corrupt_file_opens_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json")?;
    let store = FileCredentialStore::open(&path);
    assert_eq!(store.token(), None);
    Ok(())
}

#[test]
fn save_leaves_no_temp_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    save(&path, &StoredSession { token: Some("a".into()), user: None })?;
    save(&path, &StoredSession { token: Some("b".into()), user: None })?;

    let names: Vec<String> = std::fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["session.json".to_owned()]);
    assert_eq!(load(&path)?.token.as_deref(), Some("b"));
    Ok(())
}
