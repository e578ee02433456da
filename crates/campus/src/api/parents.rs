// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parent dashboard operations. All are scoped server-side to the parent's child.

use std::fmt::Display;

use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

impl Gateway {
    pub async fn parent_profile(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/parents/profile")).await
    }

    pub async fn child_attendance(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/parents/attendance")).await
    }

    /// Per-subject grade summary.
    pub async fn child_grades(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/parents/grades")).await
    }

    /// Grade breakdown for one subject.
    pub async fn child_subject_grades(
        &self,
        subject_id: impl Display,
    ) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get(format!("/parents/grades/{subject_id}"))).await
    }

    pub async fn child_schedule(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/parents/schedule")).await
    }

    pub async fn child_evaluations(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/parents/evaluations")).await
    }

    pub async fn child_evaluation(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get(format!("/parents/evaluations/{id}"))).await
    }
}
