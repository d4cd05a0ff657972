// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Provides the food search seam used by the calorie resolver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients

pub mod usda_client;

// Re-export commonly used types
pub use usda_client::{
    FoodNutrientEntry, FoodRecord, FoodSearchClient, LabelNutrient, MockFoodSearchClient,
    NutrientInfo, SearchPayload, UsdaClient, UsdaClientConfig,
};
