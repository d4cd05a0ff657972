// ABOUTME: Cache abstraction for USDA search payloads keyed by normalized dish query
// ABOUTME: Defines cache configuration and the normalized CacheKey type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory cache implementation
pub mod memory;

use crate::constants::cache::{
    DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS,
};
use std::fmt;
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of live entries; least-recently-used entries are evicted beyond this
    pub max_entries: usize,
    /// Lifetime of an entry measured from insertion
    pub ttl: Duration,
    /// Interval between expired-entry sweeps
    pub cleanup_interval: Duration,
    /// Spawn the background sweep task (requires a running tokio runtime)
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            // Tests can explicitly disable by setting to false
            enable_background_cleanup: true,
        }
    }
}

/// Cache key derived from a free-text dish query
///
/// Two queries that differ only in surrounding whitespace or letter case
/// share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Normalize a raw query (trim, lowercase) into a key
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        Self(query.trim().to_lowercase())
    }

    /// Normalized key text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "usda:search:{}", self.0)
    }
}
