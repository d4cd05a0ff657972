// ABOUTME: Integration tests for the calorie resolution pipeline
// ABOUTME: Covers success, degraded outcomes, caching, rounding and extraction through a mock client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use calorie_service::cache::CacheConfig;
use calorie_service::errors::AppError;
use calorie_service::external::MockFoodSearchClient;
use calorie_service::services::{CalorieResolver, ResolverConfig};
use common::{food, labelled_food, nutrient, payload, pizza_payload, resolver_config};
use std::sync::Arc;
use std::time::Duration;

fn resolver_with(mock: &Arc<MockFoodSearchClient>) -> CalorieResolver {
    CalorieResolver::new(mock.clone(), &resolver_config())
}

#[tokio::test]
async fn test_successful_resolution() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(pizza_payload()));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("cheese pizza", 2.0).await;

    assert_eq!(result.dish_name, "cheese pizza");
    assert_eq!(result.servings, 2.0);
    assert_eq!(result.calories_per_serving, 266.0);
    assert_eq!(result.total_calories, 532.0);
    assert_eq!(result.source, "USDA FoodData Central");
    assert!(result.raw.is_none());

    let selection = result.selection.expect("selection");
    assert_eq!(selection.fdc_id, Some(1001));
    assert_eq!(
        selection.description.as_deref(),
        Some("Pizza, cheese, regular crust")
    );
    assert_eq!(selection.data_type.as_deref(), Some("Survey (FNDDS)"));

    let macros = result.macros.expect("macros");
    assert_eq!(macros.protein_g, Some(11.39));
    assert_eq!(macros.fat_g, Some(9.69));
    assert_eq!(macros.carb_g, Some(33.33));
    Ok(())
}

#[tokio::test]
async fn test_raw_query_and_page_size_sent_upstream() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(pizza_payload()));
    let resolver = resolver_with(&mock);

    resolver.compute("  Cheese Pizza ", 1.0).await;

    assert_eq!(mock.queries(), vec![("  Cheese Pizza ".to_owned(), 25)]);
    Ok(())
}

#[tokio::test]
async fn test_zero_records_degrades() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(payload(vec![])));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("unicorn stew", 3.0).await;

    assert_eq!(result.total_calories, 0.0);
    assert_eq!(result.calories_per_serving, 0.0);
    assert!(result.selection.is_none());
    assert!(result.macros.is_none());
    assert_eq!(result.servings, 3.0);
    assert_eq!(result.raw.unwrap().error, "Dish not found");
    Ok(())
}

#[tokio::test]
async fn test_no_acceptable_match_degrades() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(payload(vec![
        food(1, "Broccoli, raw", None, vec![nutrient("Energy", 34.0)]),
        food(2, "Orange juice", None, vec![nutrient("Energy", 45.0)]),
    ])));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("xyzabc123", 1.0).await;

    assert!(result.is_degraded());
    assert_eq!(result.total_calories, 0.0);
    assert!(result.selection.is_none());
    assert!(result.macros.is_none());
    assert_eq!(result.raw.unwrap().error, "Dish not found");
    Ok(())
}

#[tokio::test]
async fn test_upstream_failure_degrades_and_is_not_cached() -> Result<()> {
    let mock = Arc::new(
        MockFoodSearchClient::new()
            .with_error(AppError::external_service("USDA API", "HTTP 503 Service Unavailable"))
            .with_payload(pizza_payload()),
    );
    let resolver = resolver_with(&mock);

    let failed = resolver.compute("cheese pizza", 1.0).await;
    assert!(failed.is_degraded());
    assert_eq!(failed.total_calories, 0.0);
    assert!(failed.raw.unwrap().error.contains("HTTP 503"));

    // Failure left nothing in the cache, so the next call goes upstream again
    let recovered = resolver.compute("cheese pizza", 1.0).await;
    assert!(!recovered.is_degraded());
    assert_eq!(mock.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_cached_payload_survives_upstream_outage() -> Result<()> {
    // Only one payload is queued; any second upstream call would fail
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(pizza_payload()));
    let resolver = resolver_with(&mock);

    let first = resolver.compute("cheese pizza", 1.0).await;
    let second = resolver.compute("Cheese Pizza  ", 4.0).await;

    assert_eq!(mock.call_count(), 1);
    assert!(!second.is_degraded());
    assert_eq!(first.selection, second.selection);
    assert_eq!(first.macros, second.macros);
    assert_eq!(second.dish_name, "Cheese Pizza  ");
    assert_eq!(second.total_calories, 1064.0);
    assert_eq!(resolver.cache().len().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_empty_search_result_is_cached() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(payload(vec![])));
    let resolver = resolver_with(&mock);

    assert!(resolver.compute("unicorn stew", 1.0).await.is_degraded());
    assert!(resolver.compute("unicorn stew", 1.0).await.is_degraded());
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cache_entry_expires_after_ttl() -> Result<()> {
    let mock = Arc::new(
        MockFoodSearchClient::new()
            .with_payload(pizza_payload())
            .with_payload(pizza_payload()),
    );
    let config = ResolverConfig {
        cache: CacheConfig {
            ttl: Duration::from_secs(5),
            enable_background_cleanup: false,
            ..CacheConfig::default()
        },
        ..ResolverConfig::default()
    };
    let resolver = CalorieResolver::new(mock.clone(), &config);

    resolver.compute("cheese pizza", 1.0).await;
    tokio::time::advance(Duration::from_secs(4)).await;
    resolver.compute("cheese pizza", 1.0).await;
    assert_eq!(mock.call_count(), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    resolver.compute("cheese pizza", 1.0).await;
    assert_eq!(mock.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rounding_to_two_decimals() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(payload(vec![
        labelled_food(7, "Lasagna, meat", &[("calories", 133.333)]),
    ])));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("lasagna meat", 3.0).await;

    assert_eq!(result.calories_per_serving, 133.33);
    assert_eq!(result.total_calories, 400.0);
    Ok(())
}

#[tokio::test]
async fn test_fractional_servings_echoed_exactly() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(pizza_payload()));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("cheese pizza", 0.333).await;

    assert_eq!(result.servings, 0.333);
    assert_eq!(result.total_calories, 88.58);
    Ok(())
}

#[tokio::test]
async fn test_last_energy_entry_and_first_protein_entry_win() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(payload(vec![food(
        9,
        "Mystery casserole",
        None,
        vec![
            nutrient("Energy", 100.0),
            nutrient("Protein", 10.0),
            nutrient("Energy", 200.0),
            nutrient("Protein", 20.0),
        ],
    )])));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("mystery casserole", 1.0).await;

    assert_eq!(result.calories_per_serving, 200.0);
    assert_eq!(result.macros.unwrap().protein_g, Some(10.0));
    Ok(())
}

#[tokio::test]
async fn test_record_without_energy_resolves_to_zero_calories() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(payload(vec![food(
        3,
        "Water, tap",
        None,
        vec![],
    )])));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("tap water", 2.0).await;

    assert!(!result.is_degraded());
    assert_eq!(result.total_calories, 0.0);
    assert_eq!(result.selection.unwrap().fdc_id, Some(3));
    Ok(())
}

#[tokio::test]
async fn test_invalid_servings_degrade_without_upstream_call() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(pizza_payload()));
    let resolver = resolver_with(&mock);

    for servings in [0.0, -1.0, f64::NAN] {
        let result = resolver.compute("cheese pizza", servings).await;
        assert!(result.is_degraded());
        assert_eq!(result.total_calories, 0.0);
    }
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_resolution_with_unbounded_cache_ttl() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(pizza_payload()));
    let config = ResolverConfig {
        cache: CacheConfig {
            ttl: Duration::from_secs(u64::MAX),
            ..resolver_config().cache
        },
        ..resolver_config()
    };
    let resolver = CalorieResolver::new(mock.clone(), &config);

    let first = resolver.compute("cheese pizza", 1.0).await;
    let second = resolver.compute("cheese pizza", 1.0).await;

    assert_eq!(first.total_calories, 266.0);
    assert_eq!(second, first);
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_huge_servings_keep_a_finite_total() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(pizza_payload()));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("cheese pizza", 1e305).await;

    assert!(!result.is_degraded());
    assert_eq!(result.calories_per_serving, 266.0);
    assert!(result.total_calories.is_finite());
    assert!((result.total_calories - 2.66e307).abs() <= 2.66e307 * 1e-12);
    let body = serde_json::to_value(&result)?;
    assert!(body["total_calories"].is_number());
    Ok(())
}

#[tokio::test]
async fn test_overflowing_total_degrades() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new().with_payload(pizza_payload()));
    let resolver = resolver_with(&mock);

    let result = resolver.compute("cheese pizza", f64::MAX / 2.0).await;

    assert!(result.is_degraded());
    assert_eq!(result.total_calories, 0.0);
    assert!(result.selection.is_none());
    let body = serde_json::to_value(&result)?;
    assert_eq!(body["total_calories"], serde_json::json!(0.0));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolutions_share_the_cache() -> Result<()> {
    let mock = Arc::new(MockFoodSearchClient::new());
    for _ in 0..16 {
        mock.push(Ok(pizza_payload()));
    }
    let resolver = Arc::new(resolver_with(&mock));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.compute("cheese pizza", f64::from(i + 1)).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await?;
        assert!(!result.is_degraded());
        assert_eq!(result.servings, (i + 1) as f64);
        assert!(result.total_calories >= 0.0);
    }
    assert_eq!(resolver.cache().len().await, 1);
    // Concurrent misses may each go upstream, but never more than once per task
    assert!(mock.call_count() <= 16);
    Ok(())
}
