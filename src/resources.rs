// ABOUTME: Centralized resource container for dependency injection into HTTP handlers
// ABOUTME: Owns the shared calorie resolver, auth manager and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared by every route as `Arc<ServerResources>`.
//! Tests build it with [`ServerResources::with_search_client`] to swap the
//! USDA client for a scripted one.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::errors::AppResult;
use crate::external::{FoodSearchClient, UsdaClient};
use crate::services::CalorieResolver;
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Token issuing and verification
    pub auth_manager: Arc<AuthManager>,
    /// Calorie resolution pipeline, including its search cache
    pub resolver: Arc<CalorieResolver>,
}

impl ServerResources {
    /// Build resources backed by the real USDA client
    ///
    /// Must be called inside a tokio runtime (the search cache spawns its cleanup task).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: ServerConfig) -> AppResult<Self> {
        let client = UsdaClient::new(config.usda_client_config())?;
        Ok(Self::with_search_client(config, Arc::new(client)))
    }

    /// Build resources around any search client
    #[must_use]
    pub fn with_search_client(config: ServerConfig, client: Arc<dyn FoodSearchClient>) -> Self {
        let auth_manager = AuthManager::new(
            &config.auth.jwt_secret,
            config.auth.token_expiry_minutes,
        );
        let resolver = CalorieResolver::new(client, &config.resolver_config());

        Self {
            config: Arc::new(config),
            auth_manager: Arc::new(auth_manager),
            resolver: Arc::new(resolver),
        }
    }
}
