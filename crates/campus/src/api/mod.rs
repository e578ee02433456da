// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-resource backend operations.
//!
//! Every operation is a thin binding that builds an [`ApiRequest`] and runs
//! it through [`Gateway::execute`], so the refresh protocol applies to all of
//! them alike.

pub mod auth;
pub mod classes;
pub mod parents;
pub mod teachers;

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

/// CRUD operations on one collection path.
#[derive(Clone, Copy)]
pub struct Resource<'a> {
    gateway: &'a Gateway,
    base: &'static str,
}

impl<'a> Resource<'a> {
    pub fn new(gateway: &'a Gateway, base: &'static str) -> Self {
        Self { gateway, base }
    }

    fn item(&self, id: impl Display) -> String {
        format!("{}/{id}", self.base)
    }

    pub async fn list(&self) -> Result<Value, GatewayError> {
        self.gateway.execute(&ApiRequest::get(self.base)).await
    }

    pub async fn get(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.gateway.execute(&ApiRequest::get(self.item(id))).await
    }

    pub async fn create(&self, payload: &impl Serialize) -> Result<Value, GatewayError> {
        self.gateway.execute(&ApiRequest::post(self.base).json(payload)?).await
    }

    pub async fn update(
        &self,
        id: impl Display,
        payload: &impl Serialize,
    ) -> Result<Value, GatewayError> {
        self.gateway.execute(&ApiRequest::put(self.item(id)).json(payload)?).await
    }

    pub async fn delete(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.gateway.execute(&ApiRequest::delete(self.item(id))).await
    }
}

impl Gateway {
    pub fn users(&self) -> Resource<'_> {
        Resource::new(self, "/users")
    }

    pub fn teachers(&self) -> Resource<'_> {
        Resource::new(self, "/teachers")
    }

    pub fn parents(&self) -> Resource<'_> {
        Resource::new(self, "/parents")
    }

    pub fn students(&self) -> Resource<'_> {
        Resource::new(self, "/students")
    }

    pub fn classes(&self) -> Resource<'_> {
        Resource::new(self, "/classes")
    }

    pub fn subjects(&self) -> Resource<'_> {
        Resource::new(self, "/subjects")
    }

    pub fn curriculums(&self) -> Resource<'_> {
        Resource::new(self, "/curriculums")
    }

    pub fn academic_calendar(&self) -> Resource<'_> {
        Resource::new(self, "/academic-calendar")
    }

    /// Timetable of the logged-in student.
    pub async fn student_schedule(&self) -> Result<Value, GatewayError> {
        self.execute(&ApiRequest::get("/students/schedule")).await
    }
}
