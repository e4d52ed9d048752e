//! Request tracing middleware.
//!
//! Opens one `http_request` span per request carrying method, path, peer and
//! request id. The request id is taken from `x-request-id` when the client
//! sends one, generated otherwise, and always echoed on the response.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::task::{Context, Poll};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
};
use tracing::{Instrument, Span, info, info_span};

/// Request id header
pub const X_REQUEST_ID: &str = "x-request-id";

/// Longest client-supplied request id that is propagated as-is
const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Request id attached to the request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Use the client's id when it is printable and bounded, otherwise generate one
    fn from_header(value: Option<&HeaderValue>) -> Self {
        value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LENGTH)
            .map(|v| RequestId(v.to_string()))
            .unwrap_or_else(|| RequestId(uuid::Uuid::new_v4().to_string()))
    }
}

/// Tracing middleware factory
#[derive(Default)]
pub struct RequestTracing;

impl RequestTracing {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestTracing
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestTracingService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTracingService { service }))
    }
}

pub struct RequestTracingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTracingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = RequestId::from_header(req.headers().get(X_REQUEST_ID));

        let method = req.method().to_string();
        let path = req.path().to_string();
        let peer_ip = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        req.extensions_mut().insert(request_id.clone());

        let span = info_span!(
            "http_request",
            request_id = %request_id.0,
            http.method = %method,
            http.target = %path,
            net.peer.ip = %peer_ip,
            http.status_code = tracing::field::Empty,
        );

        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut res = fut.await?;

                let status = res.status().as_u16();
                Span::current().record("http.status_code", status);
                info!(status, "request completed");

                if let Ok(value) = HeaderValue::from_str(&request_id.0) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(X_REQUEST_ID), value);
                }

                Ok(res)
            }
            .instrument(span),
        )
    }
}
