// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID propagation, request spans and the CORS layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS layer built from configuration
pub mod cors;
/// Request ID propagation and per-request tracing spans
pub mod request_id;

pub use cors::setup_cors;
pub use request_id::{create_request_span, request_id_middleware, RequestId};
