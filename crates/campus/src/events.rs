// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session event channel between the gateway and the UI shell.
//!
//! The gateway only knows the [`SessionEventSink`] trait. The shell decides
//! what a notification or a forced logout looks like.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Receiver side of the gateway's terminal-failure side effects.
pub trait SessionEventSink: Send + Sync {
    /// Show a user-visible notification.
    fn notify(&self, message: &str);
    /// Navigate to the login screen.
    fn force_logout(&self);
}

/// Events broadcast to the UI shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session ended; `message` is meant for the user.
    #[serde(rename = "auth:error")]
    AuthError { message: String },
    /// The shell should navigate to `path`.
    LoginRequired { path: String },
}

/// Broadcast-backed [`SessionEventSink`].
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
    login_path: String,
}

impl EventBus {
    pub fn new(login_path: impl Into<String>) -> Self {
        let (tx, _rx) = broadcast::channel(64);
        Self { tx, login_path: login_path.into() }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }
}

impl SessionEventSink for EventBus {
    fn notify(&self, message: &str) {
        let _ = self.tx.send(SessionEvent::AuthError { message: message.to_owned() });
    }

    fn force_logout(&self) {
        let _ = self.tx.send(SessionEvent::LoginRequired { path: self.login_path.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_uses_colon_tag() -> anyhow::Result<()> {
        let json = serde_json::to_value(SessionEvent::AuthError { message: "bye".into() })?;
        assert_eq!(json, serde_json::json!({ "event": "auth:error", "message": "bye" }));
        let json = serde_json::to_value(SessionEvent::LoginRequired { path: "/login".into() })?;
        assert_eq!(json, serde_json::json!({ "event": "login_required", "path": "/login" }));
        Ok(())
    }

    #[test]
    fn bus_delivers_in_order() -> anyhow::Result<()> {
        let bus = EventBus::new("/login");
        let mut rx = bus.subscribe();
        bus.notify("expired");
        bus.force_logout();
        assert_eq!(rx.try_recv()?, SessionEvent::AuthError { message: "expired".into() });
        assert_eq!(rx.try_recv()?, SessionEvent::LoginRequired { path: "/login".into() });
        Ok(())
    }

    #[test]
    fn bus_without_subscribers_does_not_fail() {
        let bus = EventBus::new("/login");
        bus.notify("nobody listening");
        bus.force_logout();
    }
}
