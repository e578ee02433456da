// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Homeroom teacher operations: class roster, attendance, schedule,
//! evaluations and the grade book.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

impl Gateway {
    /// The class the logged-in teacher is homeroom teacher of.
    pub async fn my_class(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/teachers/my-class")).await
    }

    /// Attendance of the teacher's class on `date` (`YYYY-MM-DD`).
    pub async fn attendance(&self, date: &str) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get(format!("/teachers/attendances/{date}"))).await
    }

    /// Save attendance for `date`.
    pub async fn save_attendance(
        &self,
        date: &str,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        let req = ApiRequest::post(format!("/teachers/attendances/{date}")).json(payload)?;
        self.execute(&req).await
    }

    /// Teaching schedule, optionally narrowed to one day.
    pub async fn teacher_schedule(&self, day: Option<&str>) -> Result<Value, GatewayError> {
        let mut req = ApiRequest::get("/teachers/schedule");
        if let Some(day) = day {
            req = req.query("day", day);
        }
        self.execute(&req).await
    }

    pub async fn evaluations(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/teachers/evaluations")).await
    }

    pub async fn evaluation(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get(format!("/teachers/evaluations/{id}"))).await
    }

    pub async fn create_evaluation(&self, payload: &impl Serialize) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::post("/teachers/evaluations").json(payload)?).await
    }

    pub async fn update_evaluation(
        &self,
        id: impl Display,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        let req = ApiRequest::put(format!("/teachers/evaluations/{id}")).json(payload)?;
        self.execute(&req).await
    }

    pub async fn grade_categories(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/teachers/grades/categories")).await
    }

    pub async fn save_grade_category(
        &self,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::post("/teachers/grades/categories").json(payload)?).await
    }

    pub async fn update_grade_category(
        &self,
        id: impl Display,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        let req = ApiRequest::put(format!("/teachers/grades/categories/{id}")).json(payload)?;
        self.execute(&req).await
    }

    pub async fn delete_grade_category(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::delete(format!("/teachers/grades/categories/{id}"))).await
    }

    /// Assessments (details) inside a grade category.
    pub async fn grade_details(&self, category_id: impl Display) -> Result<Value, GatewayError> {
        let path = format!("/teachers/grades/categories/{category_id}/details");
        self.execute(&ApiRequest::get(path)).await
    }

    pub async fn save_grade_detail(
        &self,
        category_id: impl Display,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        let path = format!("/teachers/grades/categories/{category_id}/details");
        self.execute(&ApiRequest::post(path).json(payload)?).await
    }

    pub async fn delete_grade_detail(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::delete(format!("/teachers/grades/details/{id}"))).await
    }

    /// Student scores for one assessment.
    pub async fn grade_scores(&self, detail_id: impl Display) -> Result<Value, GatewayError> {
        let path = format!("/teachers/grades/details/{detail_id}/scores");
        self.execute(&ApiRequest::get(path)).await
    }

    pub async fn save_grade_scores(
        &self,
        detail_id: impl Display,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        let path = format!("/teachers/grades/details/{detail_id}/scores");
        self.execute(&ApiRequest::put(path).json(payload)?).await
    }
}
