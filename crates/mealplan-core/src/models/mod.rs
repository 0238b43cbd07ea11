// ABOUTME: Domain models for meal planning and nutrition reconciliation
// ABOUTME: Re-exports nutrition values, catalog entries, meal types, and plan structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Models
//!
//! Data structures shared by the planning pipeline:
//!
//! - [`nutrition`]: macro values, catalog entries, meal types, targets
//! - [`plan`]: proposed items from the producer, resolved items, meals, plans

/// Nutrition values, catalog entries, meal types, and targets
pub mod nutrition;
/// Candidate and resolved meal plan structures
pub mod plan;

pub use nutrition::{round_to_tenth, FoodCatalogEntry, MealType, NutritionTargets, NutritionValues};
pub use plan::{
    normalize_quantity, CandidatePlan, FoodResolution, Meal, MealPlan, ProposedFoodItem,
    ProposedMeal, ResolvedFoodItem,
};
