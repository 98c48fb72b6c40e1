//! Route handlers and router fallbacks for the Stay API
//!
//! Every handler is a pure function of its route: payloads are fixed and no
//! state is read or written.

use axum::Json;
use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TestData {
    pub test: bool,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub message: &'static str,
    pub data: TestData,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to Stay Backend API",
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

pub async fn api_test() -> Json<TestResponse> {
    Json(TestResponse {
        message: "Test endpoint is working",
        data: TestData { test: true },
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
