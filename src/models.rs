// ABOUTME: Request and response models for calorie resolution
// ABOUTME: Defines ResolutionResult, Selection, MacroTriple and the validated CaloriesRequest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! `ResolutionResult` serializes directly to the `/get-calories` response body:
//!
//! ```json
//! {
//!   "dish_name": "pizza",
//!   "servings": 2.0,
//!   "calories_per_serving": 266.0,
//!   "total_calories": 532.0,
//!   "source": "USDA FoodData Central",
//!   "selection": { "fdcId": 123, "description": "Pizza, cheese", "dataType": "Branded" },
//!   "macros": { "protein_g": 11.4, "fat_g": 9.7, "carb_g": 33.3 },
//!   "raw": null
//! }
//! ```

use crate::constants::{limits::MIN_DISH_NAME_LEN, service_names::USDA_SOURCE_LABEL};
use crate::errors::{AppError, AppResult};
use crate::external::FoodRecord;
use serde::{Deserialize, Serialize};

/// Macronutrient breakdown in grams; each field is absent when the record lacks it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTriple {
    /// Protein in grams
    pub protein_g: Option<f64>,
    /// Total fat in grams
    pub fat_g: Option<f64>,
    /// Carbohydrates in grams
    pub carb_g: Option<f64>,
}

/// Summary of the USDA record chosen for a dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// FoodData Central identifier
    #[serde(rename = "fdcId")]
    pub fdc_id: Option<u64>,
    /// Record description
    pub description: Option<String>,
    /// Data type tag (Branded, Survey (FNDDS), Foundation, ...)
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
}

impl From<&FoodRecord> for Selection {
    fn from(record: &FoodRecord) -> Self {
        Self {
            fdc_id: record.fdc_id,
            description: record.description.clone(),
            data_type: record.data_type.clone(),
        }
    }
}

/// Diagnostic payload attached to degraded results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDiagnostic {
    /// Human-readable failure reason
    pub error: String,
}

/// Outcome of a calorie resolution, successful or degraded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Dish name exactly as requested
    pub dish_name: String,
    /// Servings exactly as requested
    pub servings: f64,
    /// Energy per serving in kcal, rounded to 2 decimals
    pub calories_per_serving: f64,
    /// `calories_per_serving * servings`, rounded to 2 decimals
    pub total_calories: f64,
    /// Data provider label
    pub source: String,
    /// Chosen record, absent when resolution failed
    pub selection: Option<Selection>,
    /// Macros of the chosen record, absent when resolution failed
    pub macros: Option<MacroTriple>,
    /// Failure diagnostic, absent on success
    pub raw: Option<RawDiagnostic>,
}

impl ResolutionResult {
    /// Degraded result: zero calories, no selection or macros, reason in `raw`
    #[must_use]
    pub fn degraded(dish_name: &str, servings: f64, reason: impl Into<String>) -> Self {
        Self {
            dish_name: dish_name.to_owned(),
            servings,
            calories_per_serving: 0.0,
            total_calories: 0.0,
            source: USDA_SOURCE_LABEL.to_owned(),
            selection: None,
            macros: None,
            raw: Some(RawDiagnostic {
                error: reason.into(),
            }),
        }
    }

    /// Whether this result carries a failure diagnostic
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.raw.is_some()
    }
}

/// Body of `POST /get-calories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloriesRequest {
    /// Free-text dish name
    pub dish_name: String,
    /// Number of servings, strictly positive
    pub servings: f64,
}

impl CaloriesRequest {
    /// Check field constraints before the request reaches the resolver
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the dish name is shorter than two characters
    /// or servings is not a finite positive number.
    pub fn validate(&self) -> AppResult<()> {
        if self.dish_name.chars().count() < MIN_DISH_NAME_LEN {
            return Err(AppError::invalid_input(format!(
                "dish_name must be at least {MIN_DISH_NAME_LEN} characters"
            )));
        }
        if !self.servings.is_finite() || self.servings <= 0.0 {
            return Err(AppError::invalid_input(
                "servings must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(dish_name: &str, servings: f64) -> CaloriesRequest {
        CaloriesRequest {
            dish_name: dish_name.to_owned(),
            servings,
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(request("pizza", 1.0).validate().is_ok());
        assert!(request("ab", 0.5).validate().is_ok());
        assert!(request("a", 1.0).validate().is_err());
        assert!(request("", 1.0).validate().is_err());
        assert!(request("pizza", 0.0).validate().is_err());
        assert!(request("pizza", -2.0).validate().is_err());
        assert!(request("pizza", f64::NAN).validate().is_err());
        assert!(request("pizza", f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_degraded_result_shape() {
        let result = ResolutionResult::degraded("xyzabc123", 2.0, "Dish not found");
        assert!(result.is_degraded());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "dish_name": "xyzabc123",
                "servings": 2.0,
                "calories_per_serving": 0.0,
                "total_calories": 0.0,
                "source": "USDA FoodData Central",
                "selection": null,
                "macros": null,
                "raw": { "error": "Dish not found" }
            })
        );
    }

    #[test]
    fn test_selection_uses_wire_field_names() {
        let record = FoodRecord {
            fdc_id: Some(42),
            description: Some("Apple, raw".to_owned()),
            data_type: Some("Foundation".to_owned()),
            ..FoodRecord::default()
        };
        let value = serde_json::to_value(Selection::from(&record)).unwrap();
        assert_eq!(
            value,
            json!({ "fdcId": 42, "description": "Apple, raw", "dataType": "Foundation" })
        );
    }
}
