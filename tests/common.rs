// ABOUTME: Shared fixtures for integration tests
// ABOUTME: Builds USDA records, search payloads, test configuration and server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code, missing_docs)]

use calorie_service::cache::CacheConfig;
use calorie_service::config::environment::ServerConfig;
use calorie_service::external::{
    FoodNutrientEntry, FoodRecord, LabelNutrient, MockFoodSearchClient, SearchPayload,
};
use calorie_service::resources::ServerResources;
use calorie_service::services::ResolverConfig;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_USER: &str = "tester@example.com";

/// Generic `foodNutrients` entry with a flat name and value
pub fn nutrient(name: &str, value: f64) -> FoodNutrientEntry {
    FoodNutrientEntry {
        nutrient_name: Some(name.to_owned()),
        value: Some(value),
        ..FoodNutrientEntry::default()
    }
}

/// Record with description, optional brand and generic nutrients
pub fn food(
    fdc_id: u64,
    description: &str,
    brand: Option<&str>,
    nutrients: Vec<FoodNutrientEntry>,
) -> FoodRecord {
    FoodRecord {
        fdc_id: Some(fdc_id),
        description: Some(description.to_owned()),
        brand_name: brand.map(str::to_owned),
        data_type: Some(if brand.is_some() { "Branded" } else { "Survey (FNDDS)" }.to_owned()),
        food_nutrients: nutrients,
        ..FoodRecord::default()
    }
}

/// Record with a label-nutrients block
pub fn labelled_food(fdc_id: u64, description: &str, labels: &[(&str, f64)]) -> FoodRecord {
    FoodRecord {
        fdc_id: Some(fdc_id),
        description: Some(description.to_owned()),
        data_type: Some("Branded".to_owned()),
        label_nutrients: Some(
            labels
                .iter()
                .map(|(k, v)| ((*k).to_owned(), LabelNutrient { value: Some(*v) }))
                .collect::<BTreeMap<_, _>>(),
        ),
        ..FoodRecord::default()
    }
}

pub fn payload(foods: Vec<FoodRecord>) -> SearchPayload {
    SearchPayload {
        total_hits: Some(foods.len() as u64),
        foods,
    }
}

/// Typical search result for "cheese pizza"
pub fn pizza_payload() -> SearchPayload {
    payload(vec![
        food(
            1001,
            "Pizza, cheese, regular crust",
            None,
            vec![
                nutrient("Energy", 266.0),
                nutrient("Protein", 11.39),
                nutrient("Total lipid (fat)", 9.69),
                nutrient("Carbohydrate, by difference", 33.33),
            ],
        ),
        food(
            1002,
            "Orange juice",
            None,
            vec![nutrient("Energy", 45.0)],
        ),
    ])
}

/// Resolver config with background cleanup off so tests control time
pub fn resolver_config() -> ResolverConfig {
    ResolverConfig {
        cache: CacheConfig {
            enable_background_cleanup: false,
            ..CacheConfig::default()
        },
        ..ResolverConfig::default()
    }
}

pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = TEST_JWT_SECRET.to_owned();
    config.usda.api_key = "test-key".to_owned();
    config.usda.timeout_secs = 2;
    config.cache.ttl_secs = 300;
    config
}

pub fn test_resources(client: Arc<MockFoodSearchClient>) -> Arc<ServerResources> {
    Arc::new(ServerResources::with_search_client(test_config(), client))
}
