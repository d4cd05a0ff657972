// ABOUTME: Main library entry point for the meal calorie estimation service
// ABOUTME: Resolves free-text dish names to calories and macros via USDA FoodData Central
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Calorie Service
//!
//! An HTTP service that turns a dish name and a serving count into an
//! estimated calorie and macronutrient breakdown.
//!
//! ## Pipeline
//!
//! cache lookup → USDA search → fuzzy best-match selection → nutrient
//! extraction → result. Every call to
//! [`services::CalorieResolver::compute`] yields a
//! [`models::ResolutionResult`]; failures produce a degraded result with zero
//! calories and a diagnostic instead of an error.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use calorie_service::config::environment::ServerConfig;
//! use calorie_service::errors::AppResult;
//! use calorie_service::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let resources = ServerResources::new(ServerConfig::from_env()?)?;
//!     let result = resources.resolver.compute("cheese pizza", 2.0).await;
//!     println!("{} kcal", result.total_calories);
//!     Ok(())
//! }
//! ```

/// JWT bearer authentication
pub mod auth;

/// Search payload cache
pub mod cache;

/// Environment configuration
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Unified error handling
pub mod errors;

/// External API clients
pub mod external;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Request and response models
pub mod models;

/// Fuzzy matching and nutrient extraction
pub mod nutrition;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Domain services
pub mod services;
