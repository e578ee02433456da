// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Smoke tests for the `campus` binary.

use std::path::Path;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;

fn token(name: &str, exp: u64) -> String {
    let claims = json!({ "id": 5, "name": name, "role": "parent", "exp": exp });
    format!("h.{}.s", URL_SAFE_NO_PAD.encode(claims.to_string()))
}

/// Backend that accepts only `token("Dewi", FAR)` and refuses every refresh.
async fn spawn_backend() -> anyhow::Result<String> {
    const FAR: u64 = 4_000_000_000;
    let app = Router::new()
        .route(
            "/auth/login",
            post(|| async { Json(json!({ "accessToken": token("Dewi", FAR) })) }),
        )
        .route(
            "/auth/refresh-token",
            post(|| async {
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Refresh token expired" })))
            }),
        )
        .route(
            "/parents/schedule",
            get(|headers: HeaderMap| async move {
                let expected = format!("Bearer {}", token("Dewi", FAR));
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some(auth) if auth == expected => {
                        Json(json!([{ "day": "monday", "subject": "Math" }])).into_response()
                    }
                    _ => StatusCode::UNAUTHORIZED.into_response(),
                }
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn run_campus(
    api_url: &str,
    state_dir: &Path,
    args: &[&str],
) -> anyhow::Result<std::process::Output> {
    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_campus"))
        .arg("--api-url")
        .arg(api_url)
        .arg("--state-dir")
        .arg(state_dir)
        .arg("--redirect-delay-ms")
        .arg("20")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .await?;
    Ok(output)
}

#[tokio::test]
async fn login_then_whoami() -> anyhow::Result<()> {
    let api = spawn_backend().await?;
    let dir = tempfile::tempdir()?;

    let login = ["login", "--email", "dewi@home.test", "--password", "pw"];
    let out = run_campus(&api, dir.path(), &login).await?;
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let user: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(user["name"], "Dewi");
    assert_eq!(user["role"], "parent");

    let out = run_campus(&api, dir.path(), &["whoami"]).await?;
    assert!(out.status.success());
    let line = String::from_utf8(out.stdout)?;
    assert!(line.starts_with("Dewi (parent, id 5): expires in"), "got {line}");

    let out = run_campus(&api, dir.path(), &["request", "get", "/parents/schedule"]).await?;
    assert!(out.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(rows[0]["subject"], "Math");
    Ok(())
}

#[tokio::test]
async fn expired_session_is_cleared_and_redirected() -> anyhow::Result<()> {
    let api = spawn_backend().await?;
    let dir = tempfile::tempdir()?;
    let session = json!({
        "token": token("Dewi", 1),
        "user": { "id": 5, "name": "Dewi", "role": "parent" },
    });
    std::fs::write(dir.path().join("session.json"), session.to_string())?;

    let out = run_campus(&api, dir.path(), &["request", "GET", "/parents/schedule"]).await?;
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Your session has expired. Please log in again."), "stderr: {stderr}");
    assert!(stderr.contains("redirecting to /login"), "stderr: {stderr}");
    assert!(!dir.path().join("session.json").exists());
    Ok(())
}

#[tokio::test]
async fn whoami_without_session_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = run_campus("http://127.0.0.1:9", dir.path(), &["whoami"]).await?;
    assert_eq!(out.status.code(), Some(1));
    Ok(())
}
