// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Honors or generates x-request-id, wraps each request in a span and echoes the id back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::network::REQUEST_ID_HEADER;
use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use std::time::Instant;
use tracing::{Instrument, Span};
use uuid::Uuid;

/// Correlation id of the current request, available as a request extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Fresh random id
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("req_{}", Uuid::new_v4().simple()))
    }
}

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = tracing::field::Empty,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Attach a request id and span to every request
///
/// A non-empty incoming `x-request-id` is reused, otherwise one is generated.
/// The id is echoed on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map_or_else(RequestId::generate, |value| RequestId(value.to_owned()));

    let span = create_request_span(request.method().as_str(), request.uri().path());
    span.record("request_id", request_id.0.as_str());
    request.extensions_mut().insert(request_id.clone());

    let started = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;

    span.record("status_code", response.status().as_u16());
    span.record(
        "duration_ms",
        u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    );
    span.in_scope(|| tracing::debug!("Request completed"));

    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
