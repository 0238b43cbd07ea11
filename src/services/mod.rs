// ABOUTME: Domain service layer wiring the planning pipeline to its external collaborators
// ABOUTME: Provides the meal plan service used by the command-line interface and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services hold the collaborator handles (text producer, catalog, meal log
//! store) and run the pure planning pipeline between them.

/// Meal plan generation and persistence
pub mod meal_plan;

pub use meal_plan::{GeneratedPlan, MealPlanService};
