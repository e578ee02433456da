// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the request gateway.
#[derive(Debug, Clone, clap::Args)]
pub struct GatewayConfig {
    /// Base URL of the backend API. Resource paths are appended verbatim.
    #[arg(long, default_value = "http://127.0.0.1:5000/api", env = "CAMPUS_API_URL")]
    pub api_url: String,

    /// Per-request transport timeout in milliseconds.
    #[arg(long, default_value_t = 30000, env = "CAMPUS_TIMEOUT_MS")]
    pub timeout_ms: u64,

    /// Delay between the session-expired notification and the login redirect.
    #[arg(long, default_value_t = 2000, env = "CAMPUS_REDIRECT_DELAY_MS")]
    pub redirect_delay_ms: u64,

    /// Route the shell navigates to after a terminal auth failure.
    #[arg(long, default_value = "/login", env = "CAMPUS_LOGIN_PATH")]
    pub login_path: String,

    /// Directory holding the persisted session. Defaults to the XDG state dir.
    #[arg(long, env = "CAMPUS_STATE_DIR")]
    pub state_dir: Option<PathBuf>,
}

impl GatewayConfig {
    /// Config pointing at `api_url` with every other field at its default.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_ms: 30000,
            redirect_delay_ms: 2000,
            login_path: "/login".to_owned(),
            state_dir: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Resolve the state directory for the persisted session.
    ///
    /// Uses `--state-dir` when set, then `$XDG_STATE_HOME/campus`,
    /// then `$HOME/.local/state/campus`.
    pub fn state_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.state_dir {
            return dir.clone();
        }
        if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
            return PathBuf::from(xdg).join("campus");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local/state/campus");
        }
        PathBuf::from(".campus")
    }

    /// Path of the persisted session file.
    pub fn session_path(&self) -> PathBuf {
        self.state_dir().join("session.json")
    }
}
