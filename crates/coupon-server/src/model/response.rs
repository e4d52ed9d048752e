//! HTTP response types for the coupon server

use actix_web::{HttpResponse, HttpResponseBuilder, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Success body for state-changing operations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageResult<T> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> MessageResult<T> {
    pub fn new(message: &str, data: T) -> Self {
        MessageResult {
            message: message.to_string(),
            data,
        }
    }

    pub fn http_success(message: &str, data: T) -> HttpResponse {
        HttpResponse::Ok().json(MessageResult::new(message, data))
    }
}

/// Error body: numeric error code, HTTP reason phrase and human message
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResult {
    pub code: i32,
    pub error: String,
    pub message: String,
}

impl ErrorResult {
    pub fn new(status: StatusCode, code: i32, message: &str) -> Self {
        ErrorResult {
            code,
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message: message.to_string(),
        }
    }

    pub fn http_response(status: StatusCode, code: i32, message: &str) -> HttpResponse {
        HttpResponseBuilder::new(status).json(ErrorResult::new(status, code, message))
    }
}
