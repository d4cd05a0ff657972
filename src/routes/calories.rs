// ABOUTME: Calorie lookup route: authenticated POST /get-calories
// ABOUTME: Validates the request, then delegates to the calorie resolver, which never fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie routes
//!
//! Authentication and payload validation are the only ways this endpoint
//! answers with an error (401 / 422). Once the resolver runs, the response is
//! a 200 carrying either a full or a degraded [`ResolutionResult`].

use crate::auth::extract_bearer_token;
use crate::errors::AppError;
use crate::models::{CaloriesRequest, ResolutionResult};
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::debug;

/// Calorie route handlers
pub struct CaloriesRoutes;

impl CaloriesRoutes {
    /// Create the calorie routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/get-calories", post(Self::handle_get_calories))
            .with_state(resources)
    }

    /// Verify the bearer token and return the subject
    fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> Result<String, AppError> {
        let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
        let token = extract_bearer_token(header)?;
        let claims = resources.auth_manager.validate_token(token)?;
        Ok(claims.sub)
    }

    /// Handle POST /get-calories
    async fn handle_get_calories(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<CaloriesRequest>, JsonRejection>,
    ) -> Result<Json<ResolutionResult>, AppError> {
        let subject = Self::authenticate(&headers, &resources)?;

        let Json(request) =
            body.map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        request.validate()?;

        debug!(user = %subject, dish_name = %request.dish_name, "Calorie lookup");
        let result = resources
            .resolver
            .compute(&request.dish_name, request.servings)
            .await;
        Ok(Json(result))
    }
}
