// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line shell: composition root for the gateway.
//!
//! Wires the file-backed credential store and the event bus into a
//! [`Gateway`], runs one command, and plays the UI shell's part on a
//! terminal auth failure (show the notification, follow the redirect).

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::claims::{decode_claims, Claims};
use crate::config::GatewayConfig;
use crate::credential::persist::FileCredentialStore;
use crate::credential::CredentialStore;
use crate::error::GatewayError;
use crate::events::{EventBus, SessionEvent};
use crate::gateway::{ApiRequest, Gateway};

/// Client for the school-management backend.
#[derive(Debug, Parser)]
#[command(name = "campus", version)]
pub struct Cli {
    #[command(flatten)]
    pub config: GatewayConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account from a JSON body.
    Register {
        #[arg(long)]
        body: String,
    },
    /// End the session on the server and locally.
    Logout,
    /// Show the stored identity and time left on the credential.
    Whoami,
    /// Fetch the current user's profile.
    Profile,
    /// Change the current user's password.
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// Show the homeroom class of the logged-in teacher.
    MyClass,
    /// Show class attendance for a date (YYYY-MM-DD).
    Attendance { date: String },
    /// Show the teaching schedule.
    Schedule {
        #[arg(long)]
        day: Option<String>,
    },
    /// Send an arbitrary request to a resource path, e.g. `GET /subjects`.
    Request {
        method: String,
        path: String,
        #[arg(long)]
        body: Option<String>,
    },
}

/// Run one command. Returns the process exit code.
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.config;
    let bus = EventBus::new(config.login_path.clone());
    let mut events = bus.subscribe();
    let store = Arc::new(FileCredentialStore::open(config.session_path()));

    if let Command::Whoami = cli.command {
        println!("{}", whoami(store.as_ref(), crate::epoch_secs())?);
        return Ok(0);
    }

    let gateway = Gateway::new(&config, store, Arc::new(bus))?;
    match dispatch(&gateway, cli.command).await {
        Ok(Value::Null) => Ok(0),
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(0)
        }
        Err(e) if e.is_session_expired() => {
            if !follow_session_events(&mut events, config.redirect_delay()).await {
                eprintln!("error: {e}");
            }
            Ok(2)
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(1)
        }
    }
}

async fn dispatch(gateway: &Gateway, command: Command) -> Result<Value, GatewayError> {
    match command {
        Command::Login { email, password } => {
            let user = gateway.login(&email, &password).await?;
            serde_json::to_value(user).map_err(|e| GatewayError::Encode(e.to_string()))
        }
        Command::Register { body } => gateway.register(&parse_body(&body)?).await,
        Command::Logout => gateway.logout().await.map(|()| Value::Null),
        Command::Whoami => Ok(Value::Null),
        Command::Profile => gateway.profile().await,
        Command::ChangePassword { current, new } => gateway.change_password(&current, &new).await,
        Command::MyClass => gateway.my_class().await,
        Command::Attendance { date } => gateway.attendance(&date).await,
        Command::Schedule { day } => gateway.teacher_schedule(day.as_deref()).await,
        Command::Request { method, path, body } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())
                .map_err(|e| GatewayError::Encode(e.to_string()))?;
            let mut req = ApiRequest::new(method, path);
            if let Some(body) = body {
                req = req.json(&parse_body(&body)?)?;
            }
            gateway.execute(&req).await
        }
    }
}

fn parse_body(body: &str) -> Result<Value, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Encode(e.to_string()))
}

/// Render the stored identity from the credential's claims.
pub fn whoami(store: &dyn CredentialStore, now: u64) -> anyhow::Result<String> {
    let Some(token) = store.token() else {
        anyhow::bail!("not logged in");
    };
    let claims = decode_claims(&token)?;
    Ok(describe(&claims, now))
}

fn describe(claims: &Claims, now: u64) -> String {
    let expiry = match claims.expires_in(now) {
        Some(secs) => format!("expires in {}m {}s", secs / 60, secs % 60),
        None => "expired".to_owned(),
    };
    format!("{} ({}, id {}): {expiry}", claims.name, claims.role, claims.id)
}

/// Print the auth notification, then wait for the login redirect.
///
/// Returns whether a notification was shown. Bounded by the redirect delay
/// plus a grace second; a session already cleared by an earlier cycle emits
/// nothing.
async fn follow_session_events(
    events: &mut broadcast::Receiver<SessionEvent>,
    delay: Duration,
) -> bool {
    let deadline = tokio::time::Instant::now() + delay + Duration::from_secs(1);
    let mut notified = false;
    loop {
        match tokio::time::timeout_at(deadline, events.recv()).await {
            Ok(Ok(SessionEvent::AuthError { message })) => {
                eprintln!("{message}");
                notified = true;
            }
            Ok(Ok(SessionEvent::LoginRequired { path })) => {
                eprintln!("redirecting to {path}: run `campus login` to start a new session");
                return notified;
            }
            Ok(Err(broadcast::error::RecvError::Lagged(_))) => continue,
            Ok(Err(_)) | Err(_) => return notified,
        }
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
