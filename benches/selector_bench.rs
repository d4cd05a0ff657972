// ABOUTME: Criterion benchmarks for dish matching and nutrient extraction
// ABOUTME: Measures fuzzy scoring, best-match selection over a full page, and extraction cost
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the matching hot path.
//!
//! Every cache miss scores each record of a search page against the query,
//! so selection cost grows with the configured page size.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use calorie_service::external::{FoodNutrientEntry, FoodRecord};
use calorie_service::nutrition::{extract_nutrients, weighted_ratio, BestMatchSelector};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const DESCRIPTIONS: &[&str] = &[
    "Pizza, cheese, regular crust, frozen, cooked",
    "Macaroni and cheese, boxed, prepared",
    "Chicken, broilers or fryers, breast, meat only, roasted",
    "Orange juice, raw",
    "Broccoli, raw",
    "Bread, whole-wheat, commercially prepared",
    "Yogurt, Greek, plain, nonfat",
    "Rice, white, long-grain, cooked",
];

fn nutrient(name: &str, value: f64) -> FoodNutrientEntry {
    FoodNutrientEntry {
        nutrient_name: Some(name.to_owned()),
        value: Some(value),
        ..FoodNutrientEntry::default()
    }
}

#[allow(clippy::cast_precision_loss)]
fn generate_records(count: usize) -> Vec<FoodRecord> {
    (0..count)
        .map(|i| FoodRecord {
            fdc_id: Some(i as u64),
            description: Some(DESCRIPTIONS[i % DESCRIPTIONS.len()].to_owned()),
            brand_name: (i % 3 == 0).then(|| format!("BRAND {i}")),
            food_nutrients: vec![
                nutrient("Protein", 5.0 + i as f64),
                nutrient("Total lipid (fat)", 3.0),
                nutrient("Carbohydrate, by difference", 20.0),
                nutrient("Energy", 120.0),
                nutrient("Energy", 500.0),
            ],
            ..FoodRecord::default()
        })
        .collect()
}

fn bench_weighted_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_ratio");

    for (name, query, label) in [
        ("exact", "orange juice", "Orange juice "),
        (
            "reordered",
            "cheese pizza",
            "Pizza, cheese, regular crust, frozen, cooked ",
        ),
        ("long_tail", "rice", "Rice, white, long-grain, cooked BRAND 42"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| weighted_ratio(black_box(query), black_box(label)));
        });
    }

    group.finish();
}

fn bench_pick_best(c: &mut Criterion) {
    let selector = BestMatchSelector::default();
    let mut group = c.benchmark_group("pick_best");

    for count in [5_u64, 25, 100] {
        let records = generate_records(usize::try_from(count).unwrap());
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("match", count), &records, |b, records| {
            b.iter(|| selector.pick_best(black_box("cheese pizza"), black_box(records)));
        });
        group.bench_with_input(
            BenchmarkId::new("no_match", count),
            &records,
            |b, records| {
                b.iter(|| selector.pick_best(black_box("xyzabc123"), black_box(records)));
            },
        );
    }

    group.finish();
}

fn bench_extract_nutrients(c: &mut Criterion) {
    let records = generate_records(1);
    c.bench_function("extract_nutrients", |b| {
        b.iter(|| extract_nutrients(black_box(&records[0])));
    });
}

criterion_group!(
    benches,
    bench_weighted_ratio,
    bench_pick_best,
    bench_extract_nutrients
);
criterion_main!(benches);
