// ABOUTME: Nutrition domain logic: fuzzy dish matching and nutrient extraction
// ABOUTME: Pure functions over USDA search records, no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Nutrient extraction from a selected record
pub mod extractor;
/// Weighted fuzzy string similarity
pub mod fuzzy;
/// Best-match selection over search candidates
pub mod selector;

pub use extractor::{extract_nutrients, ExtractedNutrients};
pub use fuzzy::weighted_ratio;
pub use selector::{candidate_label, BestMatch, BestMatchSelector, MatchStrategy};
