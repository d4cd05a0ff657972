// ABOUTME: Calorie resolution pipeline: cache, USDA search, best-match selection, extraction
// ABOUTME: Always yields a ResolutionResult; failures become degraded results with a diagnostic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie resolver
//!
//! Per call:
//!
//! ```text
//! cache check ─ hit ──────────────────────────────┐
//!      └─ miss → USDA search ─ ok → cache store ──┤
//!                     └─ error → degraded         ▼
//!                                   select ─ none → degraded
//!                                     └─ found → extract → success
//! ```
//!
//! There is exactly one upstream attempt per call and no retry. Internal
//! failures are typed as [`ResolveFailure`] and collapsed into a degraded
//! [`ResolutionResult`] at the public boundary, so [`CalorieResolver::compute`]
//! has no error path.

use crate::cache::{memory::InMemoryCache, CacheConfig, CacheKey};
use crate::constants::{
    matching::DEFAULT_SCORE_CUTOFF, messages::DISH_NOT_FOUND, service_names::USDA_SOURCE_LABEL,
    usda::DEFAULT_PAGE_SIZE,
};
use crate::external::{FoodSearchClient, SearchPayload};
use crate::models::{ResolutionResult, Selection};
use crate::nutrition::{extract_nutrients, BestMatchSelector};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Why a resolution degraded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveFailure {
    /// Transport error, timeout, non-success status or malformed upstream body
    #[error("{0}")]
    UpstreamUnavailable(String),
    /// Search succeeded with zero records
    #[error("{}", DISH_NOT_FOUND)]
    NoCandidates,
    /// Records exist but none cleared the fuzzy cutoff or substring fallback
    #[error("{}", DISH_NOT_FOUND)]
    NoAcceptableMatch,
    /// Arguments outside the resolver's domain (non-positive servings, blank dish)
    #[error("{0}")]
    InvalidArguments(String),
}

impl ResolveFailure {
    /// Stable short name for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::NoCandidates => "no_candidates",
            Self::NoAcceptableMatch => "no_acceptable_match",
            Self::InvalidArguments(_) => "invalid_arguments",
        }
    }
}

/// Round half away from zero to two decimals
///
/// Values too large to scale by 100 already have no fractional part and are
/// returned unchanged.
#[must_use]
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Resolver tuning
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Result-count cap sent upstream
    pub page_size: u32,
    /// Minimum fuzzy score for a match (0-100)
    pub score_cutoff: f64,
    /// Search payload cache settings
    pub cache: CacheConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            cache: CacheConfig::default(),
        }
    }
}

/// Resolves dish names to calorie and macro estimates
pub struct CalorieResolver {
    client: Arc<dyn FoodSearchClient>,
    cache: InMemoryCache<Arc<SearchPayload>>,
    selector: BestMatchSelector,
    page_size: u32,
}

impl CalorieResolver {
    /// Create a resolver over a search client
    ///
    /// Must be called inside a tokio runtime when background cache cleanup is enabled.
    #[must_use]
    pub fn new(client: Arc<dyn FoodSearchClient>, config: &ResolverConfig) -> Self {
        Self {
            client,
            cache: InMemoryCache::new(&config.cache),
            selector: BestMatchSelector::new(config.score_cutoff),
            page_size: config.page_size,
        }
    }

    /// Search payload cache, exposed for monitoring and tests
    #[must_use]
    pub const fn cache(&self) -> &InMemoryCache<Arc<SearchPayload>> {
        &self.cache
    }

    /// Resolve `dish_name` for `servings`; never fails
    ///
    /// On any failure the result has zero calories, no selection or macros,
    /// and the reason in `raw.error`.
    #[instrument(skip(self))]
    pub async fn compute(&self, dish_name: &str, servings: f64) -> ResolutionResult {
        match self.resolve(dish_name, servings).await {
            Ok(result) => {
                info!(
                    fdc_id = ?result.selection.as_ref().and_then(|s| s.fdc_id),
                    calories_per_serving = result.calories_per_serving,
                    total_calories = result.total_calories,
                    "Resolved dish"
                );
                result
            }
            Err(failure) => {
                warn!(reason = failure.kind(), error = %failure, "Degraded calorie resolution");
                ResolutionResult::degraded(dish_name, servings, failure.to_string())
            }
        }
    }

    async fn resolve(
        &self,
        dish_name: &str,
        servings: f64,
    ) -> Result<ResolutionResult, ResolveFailure> {
        if !servings.is_finite() || servings <= 0.0 {
            return Err(ResolveFailure::InvalidArguments(
                "servings must be greater than 0".to_owned(),
            ));
        }
        if dish_name.trim().is_empty() {
            return Err(ResolveFailure::InvalidArguments(
                "dish_name must not be blank".to_owned(),
            ));
        }

        let payload = self.search(dish_name).await?;
        if payload.foods.is_empty() {
            return Err(ResolveFailure::NoCandidates);
        }

        let best = self
            .selector
            .pick_best(dish_name, &payload.foods)
            .ok_or(ResolveFailure::NoAcceptableMatch)?;
        debug!(
            index = best.index,
            score = best.score,
            strategy = ?best.strategy,
            "Selected candidate"
        );

        let nutrients = extract_nutrients(best.record);
        let per_serving = nutrients.energy_kcal.max(0.0);
        let total = per_serving * servings;
        if !total.is_finite() {
            return Err(ResolveFailure::InvalidArguments(format!(
                "servings {servings} overflows the calorie total"
            )));
        }

        Ok(ResolutionResult {
            dish_name: dish_name.to_owned(),
            servings,
            calories_per_serving: round2(per_serving),
            total_calories: round2(total),
            source: USDA_SOURCE_LABEL.to_owned(),
            selection: Some(Selection::from(best.record)),
            macros: Some(nutrients.macros),
            raw: None,
        })
    }

    /// Cached payload for the normalized query, or one upstream call stored on success
    async fn search(&self, dish_name: &str) -> Result<Arc<SearchPayload>, ResolveFailure> {
        let key = CacheKey::for_query(dish_name);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(cache_key = %key, "Search cache hit");
            return Ok(cached);
        }
        debug!(cache_key = %key, "Search cache miss");

        let payload = self
            .client
            .search_foods(dish_name, self.page_size)
            .await
            .map_err(|e| ResolveFailure::UpstreamUnavailable(e.message))?;

        let payload = Arc::new(payload);
        self.cache.put(key, Arc::clone(&payload)).await;
        Ok(payload)
    }
}
