// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use super::*;
use crate::credential::MemoryCredentialStore;

fn token(exp: u64) -> String {
    let payload = format!(r#"{{"id":9,"name":"Rina","role":"teacher","exp":{exp}}}"#);
    format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
}

#[test]
fn whoami_shows_countdown() -> anyhow::Result<()> {
    let store = MemoryCredentialStore::with_token(token(1_000 + 3_725));
    assert_eq!(whoami(&store, 1_000)?, "Rina (teacher, id 9): expires in 62m 5s");
    Ok(())
}

#[test]
fn whoami_reports_expired() -> anyhow::Result<()> {
    let store = MemoryCredentialStore::with_token(token(500));
    assert_eq!(whoami(&store, 1_000)?, "Rina (teacher, id 9): expired");
    Ok(())
}

#[test]
fn whoami_without_session_fails() {
    let store = MemoryCredentialStore::new();
    assert!(whoami(&store, 0).is_err());
}

#[test]
fn cli_parses_flattened_config() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from([
        "campus",
        "--api-url",
        "https://api.example.test",
        "--redirect-delay-ms",
        "10",
        "attendance",
        "2024-05-01",
    ])?;
    assert_eq!(cli.config.api_url, "https://api.example.test");
    assert_eq!(cli.config.redirect_delay(), Duration::from_millis(10));
    assert!(matches!(cli.command, Command::Attendance { ref date } if date == "2024-05-01"));
    Ok(())
}

#[test]
fn request_body_must_be_json() {
    assert!(matches!(parse_body("{oops"), Err(GatewayError::Encode(_))));
}
