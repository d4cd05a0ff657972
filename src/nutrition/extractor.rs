// ABOUTME: Energy and macronutrient extraction from a single USDA food record
// ABOUTME: Label nutrients take priority; the generic nutrient list fills remaining gaps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrient extraction
//!
//! Two tiers, resolved per field:
//!
//! 1. `labelNutrients` entries keyed exactly `calories`, `protein`, `fat`,
//!    `carbohydrates`.
//! 2. `foodNutrients`, scanned in order, for any field tier 1 left unset.
//!    Names are matched by lowercase substring (`energy`/`calorie`, `protein`,
//!    `fat`, `carbohydrate`).
//!
//! Macro fields latch on the first matching generic entry. Energy does not:
//! every matching generic entry overwrites the previous one, so the last
//! `Energy` entry in the list wins. Callers rely on this ordering; the
//! `last_generic_energy_entry_wins` test pins it.

use crate::external::{FoodNutrientEntry, FoodRecord};
use crate::models::MacroTriple;

/// Energy and macros read from one record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtractedNutrients {
    /// Energy per serving in kcal; 0.0 when the record carries none
    pub energy_kcal: f64,
    /// Macronutrients in grams
    pub macros: MacroTriple,
}

fn label_value(record: &FoodRecord, key: &str) -> Option<f64> {
    record
        .label_nutrients
        .as_ref()
        .and_then(|labels| labels.get(key))
        .and_then(|entry| entry.value)
}

fn entry_name(entry: &FoodNutrientEntry) -> String {
    entry
        .nutrient_name
        .as_deref()
        .or_else(|| entry.nutrient.as_ref().and_then(|n| n.name.as_deref()))
        .unwrap_or_default()
        .to_lowercase()
}

fn latch(slot: &mut Option<f64>, value: f64) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// Extract energy and macros from a record; never fails
#[must_use]
pub fn extract_nutrients(record: &FoodRecord) -> ExtractedNutrients {
    let label_energy = label_value(record, "calories");
    let mut generic_energy = None;
    let mut macros = MacroTriple {
        protein_g: label_value(record, "protein"),
        fat_g: label_value(record, "fat"),
        carb_g: label_value(record, "carbohydrates"),
    };

    for entry in &record.food_nutrients {
        let Some(value) = entry.value.or(entry.amount) else {
            continue;
        };
        let name = entry_name(entry);

        if label_energy.is_none() && (name.contains("energy") || name.contains("calorie")) {
            generic_energy = Some(value);
        }
        if name.contains("protein") {
            latch(&mut macros.protein_g, value);
        }
        if name.contains("fat") {
            latch(&mut macros.fat_g, value);
        }
        if name.contains("carbohydrate") {
            latch(&mut macros.carb_g, value);
        }
    }

    ExtractedNutrients {
        energy_kcal: label_energy.or(generic_energy).unwrap_or(0.0),
        macros,
    }
}
