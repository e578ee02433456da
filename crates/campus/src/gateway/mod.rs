// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated request gateway.
//!
//! Every backend operation builds an [`ApiRequest`] and hands it to
//! [`Gateway::execute`], which attaches the stored credential, interprets the
//! response, and on 401 joins or starts the single shared refresh cycle
//! before retrying.

pub mod refresh;
pub mod response;

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Once};
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::credential::{CredentialStore, SessionUser};
use crate::error::GatewayError;
use crate::events::SessionEventSink;
use crate::gateway::refresh::{Recovered, RefreshState};

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh-token";

/// Upper bound on sends for one logical call (original + retries).
const MAX_ATTEMPTS: u32 = 3;

static CRYPTO_INIT: Once = Once::new();

/// Install the ring crypto provider for reqwest/rustls.
/// Safe to call multiple times; only the first call has effect.
pub fn ensure_crypto() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// One backend call: method, resource path, query and optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Sent without a credential; a 401 is an ordinary error, not a refresh trigger.
    pub anonymous: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, anonymous: false }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(body).map_err(|e| GatewayError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

/// Shared gateway state. Refresh coordination lives in [`refresh`].
struct Inner {
    base_url: String,
    http: reqwest::Client,
    store: Arc<dyn CredentialStore>,
    sink: Arc<dyn SessionEventSink>,
    redirect_delay: Duration,
    refresh: Mutex<RefreshState>,
    /// Bumped under the `refresh` lock on every login and logout.
    generation: AtomicU64,
}

/// Cheaply cloneable handle; all clones share one credential and one refresh cycle.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<Inner>,
}

impl Gateway {
    pub fn new(
        config: &GatewayConfig,
        store: Arc<dyn CredentialStore>,
        sink: Arc<dyn SessionEventSink>,
    ) -> Result<Self, GatewayError> {
        ensure_crypto();
        let http = reqwest::Client::builder().timeout(config.timeout()).cookie_store(true).build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                base_url: config.api_url.trim_end_matches('/').to_owned(),
                http,
                store,
                sink,
                redirect_delay: config.redirect_delay(),
                refresh: Mutex::new(RefreshState::Idle),
                generation: AtomicU64::new(0),
            }),
        })
    }

    /// Credential the next request will carry.
    pub fn credential(&self) -> Option<String> {
        self.inner.store.token()
    }

    /// Identity record stored at login.
    pub fn user(&self) -> Option<SessionUser> {
        self.inner.store.user()
    }

    /// Persist a freshly issued session. A refresh still in flight will not
    /// overwrite it.
    pub(crate) fn begin_session(&self, token: &str, user: &SessionUser) {
        self.inner.begin_session(token, user);
    }

    /// Drop the local session. A refresh still in flight will not restore it.
    pub(crate) fn end_session(&self) {
        self.inner.end_session();
    }

    /// Send `req`, recovering from an expired credential when possible.
    ///
    /// Returns the parsed JSON body, or `Value::Null` for 204 and empty bodies.
    pub async fn execute(&self, req: &ApiRequest) -> Result<Value, GatewayError> {
        let mut credential = if req.anonymous { None } else { self.inner.store.token() };
        let mut refreshed = false;
        let mut attempts = 0;
        loop {
            attempts += 1;
            let resp = self.inner.send(req, credential.as_deref()).await?;
            if resp.status() != StatusCode::UNAUTHORIZED || req.anonymous {
                return response::interpret(resp).await;
            }

            tracing::debug!(
                method = %req.method,
                path = %req.path,
                attempts,
                "request unauthorized"
            );
            if req.path == REFRESH_PATH {
                let message = response::error_message(&resp.bytes().await.unwrap_or_default());
                return Err(self.inner.expire(credential.as_deref(), message));
            }
            if attempts >= MAX_ATTEMPTS {
                return Err(self.inner.expire(credential.as_deref(), "retry limit reached".into()));
            }

            match Arc::clone(&self.inner).recover(credential.as_deref(), refreshed).await? {
                Recovered::Current(token) => credential = Some(token),
                Recovered::Refreshed(token) => {
                    refreshed = true;
                    credential = Some(token);
                }
            }
        }
    }

    /// Exchange the stored credential for a new one, joining any cycle already in flight.
    pub async fn refresh_session(&self) -> Result<String, GatewayError> {
        let current = self.inner.store.token();
        match Arc::clone(&self.inner).recover(current.as_deref(), false).await? {
            Recovered::Current(token) | Recovered::Refreshed(token) => Ok(token),
        }
    }
}

impl Inner {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        req: &ApiRequest,
        credential: Option<&str>,
    ) -> Result<reqwest::Response, GatewayError> {
        let mut builder = self
            .http
            .request(req.method.clone(), self.url(&req.path))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(token) = credential {
            builder = builder.bearer_auth(token);
        }
        if let Some(ref body) = req.body {
            builder = builder.json(body);
        }
        match builder.send().await {
            Ok(resp) => Ok(resp),
            Err(e) => {
                tracing::debug!(
                    method = %req.method,
                    path = %req.path,
                    err = %e,
                    "transport error"
                );
                Err(e.into())
            }
        }
    }
}
