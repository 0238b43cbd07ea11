// ABOUTME: System prompts for the meal planning text producer, loaded at compile time
// ABOUTME: Provides the meal planner instructions describing the required JSON shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Meal planner system prompt
///
/// Describes the planner's role, the catalog-only food rule, and the exact
/// JSON shape (`meals[].mealType/mealName/foods[].foodId/foodName/quantity`).
pub const MEAL_PLANNER_SYSTEM_PROMPT: &str = include_str!("meal_planner_system.md");

/// Get the system prompt for the meal planner
#[must_use]
pub const fn get_meal_planner_system_prompt() -> &'static str {
    MEAL_PLANNER_SYSTEM_PROMPT
}
