// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Login, logout and profile operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::claims::decode_claims;
use crate::credential::SessionUser;
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Body of `PUT /auth/profile`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

impl Gateway {
    /// Log in and persist both the credential and the identity record.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, GatewayError> {
        let req = ApiRequest::post("/auth/login")
            .anonymous()
            .json(&LoginRequest { email, password })?;
        let body = self.execute(&req).await?;
        let login: LoginResponse =
            serde_json::from_value(body).map_err(|_| GatewayError::InvalidResponse)?;

        let user = match (decode_claims(&login.access_token), login.user) {
            (Ok(claims), _) => claims.to_user(),
            (Err(_), Some(user)) => user,
            (Err(e), None) => {
                tracing::warn!(err = %e, "login token carries no identity claims");
                return Err(GatewayError::InvalidResponse);
            }
        };
        self.begin_session(&login.access_token, &user);
        tracing::info!(user = %user.name, role = %user.role, "logged in");
        Ok(user)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, payload: &impl Serialize) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::post("/auth/register").anonymous().json(payload)?).await
    }

    /// Invalidate the server session, then clear local state regardless of the outcome.
    pub async fn logout(&self) -> Result<(), GatewayError> {
        let result = self.execute(&ApiRequest::post("/auth/logout")).await;
        self.end_session();
        match result {
            Ok(_) => {
                tracing::info!("logged out");
                Ok(())
            }
            Err(e) if e.is_session_expired() => Ok(()),
            Err(e) => {
                tracing::warn!(err = %e, "server logout failed, local session cleared");
                Err(e)
            }
        }
    }

    pub async fn profile(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/auth/profile")).await
    }

    /// Change the current user's password.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<Value, GatewayError> {
        let req = ApiRequest::put("/auth/profile")
            .json(&PasswordChange { current_password, new_password })?;
        self.execute(&req).await
    }
}
