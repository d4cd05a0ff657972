// ABOUTME: System-wide constants and configuration defaults for the calorie service
// ABOUTME: Contains USDA client defaults, cache sizing, matching thresholds, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults. Anything tunable at runtime is read through
//! [`crate::config::environment::ServerConfig`], which falls back to these.

/// Service identification used in logs and health output
pub mod service_names {
    /// Service name for structured logging
    pub const CALORIE_SERVICE: &str = "calorie-service";

    /// Label reported as the data provider in every resolution result
    pub const USDA_SOURCE_LABEL: &str = "USDA FoodData Central";
}

/// USDA `FoodData` Central client defaults
pub mod usda {
    /// Public API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

    /// Search endpoint path appended to the base URL
    pub const SEARCH_PATH: &str = "/foods/search";

    /// Per-request timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Largest accepted per-request timeout
    pub const MAX_TIMEOUT_SECS: u64 = 300;

    /// Number of search results requested per query
    pub const DEFAULT_PAGE_SIZE: u32 = 25;

    /// Upper bound accepted by the API for `pageSize`
    pub const MAX_PAGE_SIZE: u32 = 200;

    /// Service name used in external-service error messages
    pub const SERVICE_NAME: &str = "USDA API";
}

/// Search result cache defaults
pub mod cache {
    /// Seconds a cached search payload stays valid
    pub const DEFAULT_TTL_SECS: u64 = 300;

    /// Largest accepted TTL (30 days)
    pub const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;

    /// Maximum number of live cache entries
    pub const DEFAULT_MAX_ENTRIES: usize = 512;

    /// Interval of the optional expired-entry sweep
    pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;
}

/// Best-match selection tuning
pub mod matching {
    /// Minimum fuzzy score (0-100) a label needs to be accepted
    pub const DEFAULT_SCORE_CUTOFF: f64 = 30.0;

    /// Highest score the similarity scorer can produce
    pub const MAX_SCORE: f64 = 100.0;
}

/// Authentication defaults
pub mod auth {
    /// Fallback HS256 secret for local development
    pub const DEFAULT_JWT_SECRET: &str = "changeme";

    /// Lifetime of issued access tokens
    pub const DEFAULT_TOKEN_EXPIRY_MINUTES: i64 = 60;

    /// Largest accepted token lifetime (30 days)
    pub const MAX_TOKEN_EXPIRY_MINUTES: i64 = 30 * 24 * 60;
}

/// Request validation limits
pub mod limits {
    /// Minimum accepted length of a dish name
    pub const MIN_DISH_NAME_LEN: usize = 2;
}

/// Network defaults
pub mod network {
    /// Default HTTP listen port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;

    /// Header carrying the request correlation id
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// Diagnostic messages carried in degraded results
pub mod messages {
    /// Search returned no records, or none matched the query
    pub const DISH_NOT_FOUND: &str = "Dish not found";
}
