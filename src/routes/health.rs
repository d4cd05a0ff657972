// ABOUTME: Health check and welcome route handlers for service monitoring
// ABOUTME: Provides the root welcome message plus health and readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes
//!
//! None of these endpoints require authentication.

use crate::constants::service_names::CALORIE_SERVICE;
use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_root() -> Json<Value> {
        Json(json!({
            "ok": true,
            "message": "Welcome to the Meal Calorie Count Generator"
        }))
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": CALORIE_SERVICE,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(json!({
            "status": "ready",
            "usda_api_key_configured": !resources.config.usda.api_key.is_empty(),
            "cached_searches": resources.resolver.cache().len().await,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
