// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven configuration for the USDA client, cache, matching, auth and HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from environment variables, read once at startup by
//! [`ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, CacheSettings, CorsConfig, Environment, MatchingConfig, ServerConfig, UsdaConfig,
};
