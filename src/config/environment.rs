// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into typed, validated server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `USDA_API_KEY` | empty |
//! | `USDA_BASE_URL` | `https://api.nal.usda.gov/fdc/v1` |
//! | `USDA_TIMEOUT_SECS` | `10` |
//! | `USDA_PAGE_SIZE` | `25` |
//! | `CACHE_TTL_SECONDS` | `300` |
//! | `CACHE_MAX_ENTRIES` | `512` |
//! | `MATCH_SCORE_CUTOFF` | `30` |
//! | `JWT_SECRET` | `changeme` |
//! | `ACCESS_TOKEN_EXPIRE_MINUTES` | `60` |
//! | `CORS_ALLOWED_ORIGINS` | `*` |
//! | `HTTP_PORT` | `8000` |
//! | `ENVIRONMENT` | `development` |
//!
//! Unset or empty variables take the default; anything unparsable is a
//! `ConfigInvalid` error.

use crate::cache::CacheConfig;
use crate::constants::{auth, cache, matching, network, usda};
use crate::errors::{AppError, AppResult};
use crate::external::UsdaClientConfig;
use crate::services::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment; insecure defaults are rejected
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// USDA `FoodData` Central access
#[derive(Debug, Clone)]
pub struct UsdaConfig {
    /// API key sent as `api_key`
    pub api_key: String,
    /// Base URL the search path is appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Result-count cap (1-200)
    pub page_size: u32,
}

/// Search payload cache sizing
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Entry lifetime from insertion
    pub ttl_secs: u64,
    /// Capacity before LRU eviction
    pub max_entries: usize,
}

/// Best-match selection
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Minimum fuzzy score, 0-100
    pub score_cutoff: f64,
}

/// Token issuing and verification
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Lifetime of issued access tokens
    pub token_expiry_minutes: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_expiry_minutes", &self.token_expiry_minutes)
            .finish()
    }
}

/// Cross-origin settings
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// `*` or a comma-separated origin list
    pub allowed_origins: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// USDA client settings
    pub usda: UsdaConfig,
    /// Search cache settings
    pub cache: CacheSettings,
    /// Selector settings
    pub matching: MatchingConfig,
    /// JWT settings
    pub auth: AuthConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: network::DEFAULT_HTTP_PORT,
            environment: Environment::Development,
            usda: UsdaConfig {
                api_key: String::new(),
                base_url: usda::DEFAULT_BASE_URL.to_owned(),
                timeout_secs: usda::DEFAULT_TIMEOUT_SECS,
                page_size: usda::DEFAULT_PAGE_SIZE,
            },
            cache: CacheSettings {
                ttl_secs: cache::DEFAULT_TTL_SECS,
                max_entries: cache::DEFAULT_MAX_ENTRIES,
            },
            matching: MatchingConfig {
                score_cutoff: matching::DEFAULT_SCORE_CUTOFF,
            },
            auth: AuthConfig {
                jwt_secret: auth::DEFAULT_JWT_SECRET.to_owned(),
                token_expiry_minutes: auth::DEFAULT_TOKEN_EXPIRY_MINUTES,
            },
            cors: CorsConfig {
                allowed_origins: "*".to_owned(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a variable cannot be parsed or a value is out of range
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: parse_env("HTTP_PORT", network::DEFAULT_HTTP_PORT)?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            usda: UsdaConfig {
                api_key: env_var_or("USDA_API_KEY", ""),
                base_url: env_var_or("USDA_BASE_URL", usda::DEFAULT_BASE_URL),
                timeout_secs: parse_env("USDA_TIMEOUT_SECS", usda::DEFAULT_TIMEOUT_SECS)?,
                page_size: parse_env("USDA_PAGE_SIZE", usda::DEFAULT_PAGE_SIZE)?,
            },
            cache: CacheSettings {
                ttl_secs: parse_env("CACHE_TTL_SECONDS", cache::DEFAULT_TTL_SECS)?,
                max_entries: parse_env("CACHE_MAX_ENTRIES", cache::DEFAULT_MAX_ENTRIES)?,
            },
            matching: MatchingConfig {
                score_cutoff: parse_env("MATCH_SCORE_CUTOFF", matching::DEFAULT_SCORE_CUTOFF)?,
            },
            auth: AuthConfig {
                jwt_secret: env_var_or("JWT_SECRET", auth::DEFAULT_JWT_SECRET),
                token_expiry_minutes: parse_env(
                    "ACCESS_TOKEN_EXPIRE_MINUTES",
                    auth::DEFAULT_TOKEN_EXPIRY_MINUTES,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first out-of-range value
    pub fn validate(&self) -> AppResult<()> {
        if self.usda.page_size == 0 || self.usda.page_size > usda::MAX_PAGE_SIZE {
            return Err(AppError::config_invalid(format!(
                "USDA_PAGE_SIZE must be between 1 and {}, got {}",
                usda::MAX_PAGE_SIZE,
                self.usda.page_size
            )));
        }
        if self.usda.timeout_secs == 0 || self.usda.timeout_secs > usda::MAX_TIMEOUT_SECS {
            return Err(AppError::config_invalid(format!(
                "USDA_TIMEOUT_SECS must be between 1 and {}, got {}",
                usda::MAX_TIMEOUT_SECS,
                self.usda.timeout_secs
            )));
        }
        if self.cache.ttl_secs > cache::MAX_TTL_SECS {
            return Err(AppError::config_invalid(format!(
                "CACHE_TTL_SECONDS must be at most {}, got {}",
                cache::MAX_TTL_SECS,
                self.cache.ttl_secs
            )));
        }
        if self.cache.max_entries == 0 {
            return Err(AppError::config_invalid("CACHE_MAX_ENTRIES must be positive"));
        }
        if !(0.0..=matching::MAX_SCORE).contains(&self.matching.score_cutoff) {
            return Err(AppError::config_invalid(format!(
                "MATCH_SCORE_CUTOFF must be between 0 and {}, got {}",
                matching::MAX_SCORE,
                self.matching.score_cutoff
            )));
        }
        if !(1..=auth::MAX_TOKEN_EXPIRY_MINUTES).contains(&self.auth.token_expiry_minutes) {
            return Err(AppError::config_invalid(format!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {}, got {}",
                auth::MAX_TOKEN_EXPIRY_MINUTES,
                self.auth.token_expiry_minutes
            )));
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::config_invalid("JWT_SECRET must not be empty"));
        }

        if self.usda.api_key.is_empty() {
            warn!("USDA_API_KEY is not set; upstream searches will be rejected");
        }
        if self.auth.jwt_secret == auth::DEFAULT_JWT_SECRET {
            if self.environment.is_production() {
                return Err(AppError::config_invalid(
                    "JWT_SECRET must be changed from the default in production",
                ));
            }
            warn!("JWT_SECRET is the development default");
        }

        Ok(())
    }

    /// USDA client settings
    #[must_use]
    pub fn usda_client_config(&self) -> UsdaClientConfig {
        UsdaClientConfig {
            api_key: self.usda.api_key.clone(),
            base_url: self.usda.base_url.clone(),
            timeout: Duration::from_secs(self.usda.timeout_secs),
            page_size: self.usda.page_size,
        }
    }

    /// Resolver settings including cache sizing
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            page_size: self.usda.page_size,
            score_cutoff: self.matching.score_cutoff,
            cache: CacheConfig {
                max_entries: self.cache.max_entries,
                ttl: Duration::from_secs(self.cache.ttl_secs),
                ..CacheConfig::default()
            },
        }
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} usda_base_url={} usda_api_key={} usda_timeout_secs={} \
             usda_page_size={} cache_ttl_secs={} cache_max_entries={} match_score_cutoff={} \
             token_expiry_minutes={} cors_allowed_origins={}",
            self.environment,
            self.http_port,
            self.usda.base_url,
            if self.usda.api_key.is_empty() {
                "missing"
            } else {
                "set"
            },
            self.usda.timeout_secs,
            self.usda.page_size,
            self.cache.ttl_secs,
            self.cache.max_entries,
            self.matching.score_cutoff,
            self.auth.token_expiry_minutes,
            self.cors.allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, treating unset or blank as the default
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|e| {
            AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))
        }),
        _ => Ok(default),
    }
}
