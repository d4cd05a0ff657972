// ABOUTME: USDA FoodData Central API client for food search
// ABOUTME: Defines the search wire types, the FoodSearchClient seam, and a scriptable mock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central API Client
//!
//! One call is made per cache miss: `GET {base_url}/foods/search` with the raw
//! dish query, the API key and a page-size cap. Transport failures, non-2xx
//! statuses and undecodable bodies are all reported as
//! [`ErrorCode::ExternalServiceError`](crate::errors::ErrorCode).
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>
//!
//! # Example
//! ```rust,no_run
//! use calorie_service::external::usda_client::{FoodSearchClient, UsdaClient, UsdaClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = UsdaClient::new(UsdaClientConfig {
//!     api_key: "your_api_key".to_owned(),
//!     ..UsdaClientConfig::default()
//! })?;
//! let payload = client.search_foods("apple", 25).await?;
//! println!("{} candidates", payload.foods.len());
//! # Ok(())
//! # }
//! ```

use crate::constants::usda::{
    DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, MAX_PAGE_SIZE, SEARCH_PATH,
    SERVICE_NAME,
};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Result-count cap sent as `pageSize`
    pub page_size: u32,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a `/foods/search` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    /// Candidate records in upstream ranking order
    #[serde(default, deserialize_with = "null_as_default")]
    pub foods: Vec<FoodRecord>,
    /// Total number of hits reported upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hits: Option<u64>,
}

/// One candidate food returned by the search endpoint
///
/// Every field is optional: branded, survey and legacy records expose
/// different subsets and the pipeline must cope with any of them missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    /// `FoodData` Central ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    /// Food description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Brand name (branded foods only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Data type (e.g., "Branded", "Survey (FNDDS)", "SR Legacy")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Per-serving label values keyed by nutrient (`calories`, `protein`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_nutrients: Option<BTreeMap<String, LabelNutrient>>,
    /// Generic nutrient list
    #[serde(default, deserialize_with = "null_as_default")]
    pub food_nutrients: Vec<FoodNutrientEntry>,
}

/// Entry of the `labelNutrients` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelNutrient {
    /// Amount per serving
    #[serde(default)]
    pub value: Option<f64>,
}

/// Entry of the `foodNutrients` list
///
/// Search results carry a flat `nutrientName`/`value`; detail-style records
/// nest the name under `nutrient.name` and report `amount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrientEntry {
    /// Flat nutrient name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrient_name: Option<String>,
    /// Nested nutrient descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrient: Option<NutrientInfo>,
    /// Flat amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Nested-style amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Nested nutrient descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientInfo {
    /// Nutrient name (e.g., "Protein", "Energy")
    #[serde(default)]
    pub name: Option<String>,
}

/// Food search seam between the resolver and the upstream database
#[async_trait]
pub trait FoodSearchClient: Send + Sync {
    /// Search for foods by free-text query
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be made, the upstream answers
    /// with a non-success status, or the body cannot be decoded
    async fn search_foods(&self, query: &str, page_size: u32) -> AppResult<SearchPayload>;
}

/// USDA `FoodData` Central API Client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a new USDA API client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: UsdaClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build USDA HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &UsdaClientConfig {
        &self.config
    }
}

#[async_trait]
impl FoodSearchClient for UsdaClient {
    async fn search_foods(&self, query: &str, page_size: u32) -> AppResult<SearchPayload> {
        if query.is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::invalid_input(format!(
                "Page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let url = format!("{}{SEARCH_PATH}", self.config.base_url.trim_end_matches('/'));
        debug!(query, page_size, "Querying USDA food search");
        let page_size = page_size.to_string();

        // without_url() keeps the api_key query parameter out of error text
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("query", query),
                ("pageSize", page_size.as_str()),
                ("api_key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("HTTP {status}"),
            ));
        }

        response.json::<SearchPayload>().await.map_err(|e| {
            AppError::external_service(
                SERVICE_NAME,
                format!("JSON parse error: {}", e.without_url()),
            )
        })
    }
}

/// Scriptable search client for tests and benchmarks (no network)
///
/// Responses are served in the order they were queued; once the queue is
/// drained every call fails like an unreachable upstream.
#[derive(Default)]
pub struct MockFoodSearchClient {
    responses: Mutex<VecDeque<AppResult<SearchPayload>>>,
    queries: Mutex<Vec<(String, u32)>>,
    calls: AtomicUsize,
}

impl MockFoodSearchClient {
    /// Create a mock with an empty response queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful payload
    #[must_use]
    pub fn with_payload(self, payload: SearchPayload) -> Self {
        self.push(Ok(payload));
        self
    }

    /// Queue a failure
    #[must_use]
    pub fn with_error(self, error: AppError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queue a response on a shared mock
    pub fn push(&self, response: AppResult<SearchPayload>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Number of search calls made so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Query text and page size of every call, in order
    #[must_use]
    pub fn queries(&self) -> Vec<(String, u32)> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl FoodSearchClient for MockFoodSearchClient {
    async fn search_foods(&self, query: &str, page_size: u32) -> AppResult<SearchPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((query.to_owned(), page_size));
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(AppError::external_service(
                    SERVICE_NAME,
                    "mock upstream has no queued response",
                ))
            })
    }
}
