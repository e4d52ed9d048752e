// Error handling for HTTP responses
// Maps the coupon error taxonomy onto status codes and the JSON error body

use std::fmt::{Display, Formatter};

use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, http::StatusCode};

use coupon_common::CouponError;
use coupon_common::error::SERVER_ERROR;

use crate::model::response::ErrorResult;

// Local wrapper for application errors to implement actix-web error handling
// (Cannot impl foreign trait for foreign type due to orphan rules)
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<CouponError> for AppError {
    fn from(value: CouponError) -> Self {
        AppError {
            inner: anyhow::Error::new(value),
        }
    }
}

impl AppError {
    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

/// HTTP status for each error kind
pub fn status_of(error: &CouponError) -> StatusCode {
    match error {
        CouponError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        CouponError::Busy => StatusCode::TOO_MANY_REQUESTS,
        CouponError::SoldOut | CouponError::NotRedeemable => StatusCode::NOT_FOUND,
        CouponError::DatabaseError(_) | CouponError::InternalError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.downcast_ref::<CouponError>()
            .map(status_of)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        match self.downcast_ref::<CouponError>() {
            // Storage details stay in the logs
            Some(e @ (CouponError::DatabaseError(_) | CouponError::InternalError(_))) => {
                let code = e.error_code();
                ErrorResult::http_response(status_of(e), code.code, code.message)
            }
            Some(e) => ErrorResult::http_response(status_of(e), e.error_code().code, &e.to_string()),
            None => ErrorResult::http_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR.code,
                SERVER_ERROR.message,
            ),
        }
    }
}

/// Turn JSON extractor failures into `InvalidRequest` responses
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::from(CouponError::InvalidRequest(format!(
        "malformed request body: {}",
        err
    )))
    .into()
}
