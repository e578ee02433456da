// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Class membership and timetable operations (admin).

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

impl Gateway {
    pub async fn class_students(&self, class_id: impl Display) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get(format!("/classes/{class_id}/students"))).await
    }

    /// Enroll students; `payload` lists the student ids.
    pub async fn add_class_students(
        &self,
        class_id: impl Display,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        let req = ApiRequest::post(format!("/classes/{class_id}/students")).json(payload)?;
        self.execute(&req).await
    }

    pub async fn remove_class_student(
        &self,
        class_id: impl Display,
        student_id: impl Display,
    ) -> Result<Value, GatewayError> {
        let path = format!("/classes/{class_id}/students/{student_id}");
        self.execute(&ApiRequest::delete(path)).await
    }

    pub async fn class_schedule(&self, class_id: impl Display) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get(format!("/classes/{class_id}/schedule"))).await
    }

    /// Replace the weekly timetable of a class.
    pub async fn save_class_schedule(
        &self,
        class_id: impl Display,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        let req = ApiRequest::put(format!("/classes/{class_id}/schedule")).json(payload)?;
        self.execute(&req).await
    }
}
