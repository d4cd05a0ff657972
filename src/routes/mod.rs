// ABOUTME: Route module organization for the calorie service HTTP endpoints
// ABOUTME: Assembles domain routers and the middleware stack into one axum app
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to the service layer.

/// Calorie lookup routes
pub mod calories;
/// Root, health and readiness routes
pub mod health;

pub use calories::CaloriesRoutes;
pub use health::HealthRoutes;

use crate::constants::usda::DEFAULT_TIMEOUT_SECS;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::resources::ServerResources;
use axum::{middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Build the full application router with middleware
pub fn app(resources: Arc<ServerResources>) -> Router {
    // Upstream timeout plus headroom
    let request_timeout =
        Duration::from_secs(
            resources
                .config
                .usda
                .timeout_secs
                .max(DEFAULT_TIMEOUT_SECS)
                .saturating_add(5),
        );

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(CaloriesRoutes::routes(Arc::clone(&resources)))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(&resources.config.cors))
        .layer(middleware::from_fn(request_id_middleware))
}
