// ABOUTME: Domain service layer for business logic behind the HTTP routes
// ABOUTME: Hosts the calorie resolution pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services are protocol-agnostic: route handlers validate and authenticate,
//! then delegate here.

/// Dish name to calorie/macro resolution with caching and degraded fallbacks
pub mod calorie_resolver;

pub use calorie_resolver::{round2, CalorieResolver, ResolveFailure, ResolverConfig};
