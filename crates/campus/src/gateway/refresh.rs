// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight credential refresh.
//!
//! At most one refresh cycle runs at a time. A caller that hits a 401 while
//! the gateway is idle starts a cycle; callers arriving while it runs queue a
//! oneshot and receive the same outcome. The cycle runs on its own task so a
//! dropped caller cannot leave the state stuck in `InFlight`.
//!
//! Login and logout bump a session generation under the same lock. A cycle
//! that settles after the generation moved on persists nothing and hands its
//! waiters whatever the new session holds.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::oneshot;

use crate::credential::SessionUser;
use crate::error::{GatewayError, SESSION_EXPIRED_MESSAGE};
use crate::gateway::{response, ApiRequest, Inner, REFRESH_PATH};

type Waiter = oneshot::Sender<Result<Recovered, GatewayError>>;

/// Refresh coordination state, guarded by the gateway mutex.
pub(crate) enum RefreshState {
    Idle,
    /// A cycle is running; waiters are drained FIFO when it settles.
    InFlight(Vec<Waiter>),
}

/// Credential to retry with after a 401.
#[derive(Debug, Clone)]
pub(crate) enum Recovered {
    /// Another cycle already replaced the credential the request was sent with.
    Current(String),
    /// Issued by the cycle this caller started or joined.
    Refreshed(String),
}

/// How a cycle left the session, decided under the lock.
enum Settled {
    Refreshed(String),
    Failed(String),
    /// Login or logout ran meanwhile; carries the credential now stored.
    Superseded(Option<String>),
}

enum Decision {
    Wait(oneshot::Receiver<Result<Recovered, GatewayError>>),
    Retry(String),
    Gone,
    Expire,
}

impl Inner {
    /// Recover from a 401 for a request sent with `sent`.
    ///
    /// `refreshed` is true when `sent` already came out of a refresh on behalf
    /// of this call; a second rejection of it ends the session.
    pub(super) async fn recover(
        self: Arc<Self>,
        sent: Option<&str>,
        refreshed: bool,
    ) -> Result<Recovered, GatewayError> {
        let decision = {
            let mut state = self.refresh.lock();
            match &mut *state {
                RefreshState::InFlight(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    tracing::debug!(queued = waiters.len(), "refresh in flight, queued");
                    Decision::Wait(rx)
                }
                RefreshState::Idle => match self.store.token() {
                    Some(current) if Some(current.as_str()) != sent => Decision::Retry(current),
                    None if sent.is_some() => Decision::Gone,
                    _ if refreshed => Decision::Expire,
                    _ => {
                        let (tx, rx) = oneshot::channel();
                        *state = RefreshState::InFlight(vec![tx]);
                        let generation = self.generation.load(Ordering::Acquire);
                        let sent = sent.map(str::to_owned);
                        tokio::spawn(Arc::clone(&self).run_cycle(sent, generation));
                        Decision::Wait(rx)
                    }
                },
            }
        };

        match decision {
            Decision::Wait(rx) => match rx.await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::session_expired()),
            },
            Decision::Retry(token) => Ok(Recovered::Current(token)),
            Decision::Gone => Err(GatewayError::session_expired()),
            Decision::Expire => {
                Err(self.expire(sent, "refreshed credential was rejected".to_owned()))
            }
        }
    }

    /// One refresh cycle: call the endpoint, then settle every waiter.
    async fn run_cycle(self: Arc<Self>, sent: Option<String>, generation: u64) {
        let outcome = self.do_refresh(sent.as_deref()).await;

        // Persisting and draining happen under the lock so no caller can see
        // an idle gateway still holding the old credential.
        let (waiters, settled) = {
            let mut state = self.refresh.lock();
            let waiters = match std::mem::replace(&mut *state, RefreshState::Idle) {
                RefreshState::InFlight(waiters) => waiters,
                RefreshState::Idle => Vec::new(),
            };
            let settled = if self.generation.load(Ordering::Acquire) != generation {
                Settled::Superseded(self.store.token())
            } else {
                match outcome {
                    Ok(token) => {
                        self.store.save_token(&token);
                        Settled::Refreshed(token)
                    }
                    Err(e) => {
                        self.store.clear();
                        Settled::Failed(e.message().to_owned())
                    }
                }
            };
            (waiters, settled)
        };

        let result = match settled {
            Settled::Refreshed(token) => {
                tracing::info!(waiters = waiters.len(), "credential refreshed");
                Ok(Recovered::Refreshed(token))
            }
            Settled::Failed(message) => {
                tracing::warn!(
                    waiters = waiters.len(),
                    err = %message,
                    "credential refresh failed, ending session"
                );
                self.announce_expiry();
                Err(GatewayError::SessionExpired { message })
            }
            Settled::Superseded(current) => {
                tracing::debug!(waiters = waiters.len(), "session changed during refresh");
                current.map(Recovered::Current).ok_or_else(GatewayError::session_expired)
            }
        };
        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }

    /// Start a new session (login). Supersedes any refresh in flight.
    pub(super) fn begin_session(&self, token: &str, user: &SessionUser) {
        let _state = self.refresh.lock();
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.store.save_session(token, user);
    }

    /// End the session (logout). Supersedes any refresh in flight.
    pub(super) fn end_session(&self) {
        let _state = self.refresh.lock();
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.store.clear();
    }

    /// Call the refresh endpoint directly, outside the retry loop.
    async fn do_refresh(&self, credential: Option<&str>) -> Result<String, GatewayError> {
        let resp = self.send(&ApiRequest::post(REFRESH_PATH), credential).await?;
        let body = response::interpret(resp).await?;
        body.get("accessToken")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .ok_or(GatewayError::InvalidResponse)
    }

    /// Terminal failure outside a refresh cycle.
    ///
    /// Clears the store only if it still holds `sent`, so concurrent callers
    /// rejected for the same credential produce one notification between them.
    pub(super) fn expire(&self, sent: Option<&str>, reason: String) -> GatewayError {
        let cleared = {
            let state = self.refresh.lock();
            let idle = matches!(*state, RefreshState::Idle);
            if idle && self.store.token().as_deref() == sent {
                self.store.clear();
                true
            } else {
                false
            }
        };
        if cleared {
            tracing::warn!(err = %reason, "session rejected, ending session");
            self.announce_expiry();
        }
        GatewayError::SessionExpired { message: reason }
    }

    /// Notify now, redirect to login after the configured delay.
    fn announce_expiry(&self) {
        self.sink.notify(SESSION_EXPIRED_MESSAGE);
        let sink = Arc::clone(&self.sink);
        let delay = self.redirect_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sink.force_logout();
        });
    }
}
