// ABOUTME: Meal planning pipeline: targets, prompt, candidate parsing, resolution and reconciliation
// ABOUTME: Pure planning logic with no knowledge of the transport used to reach the text producer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Planning
//!
//! The pipeline runs in this order:
//!
//! - [`targets`]: derive meal count and daily/per-meal targets from a calorie goal
//! - [`prompt`]: render the producer request
//! - [`parser`]: extract and validate a candidate plan from free-form text
//! - [`resolver`]: bind foods to the catalog and meals to slots
//! - [`reconciler`]: scale quantities toward the targets

/// Candidate plan extraction and validation
pub mod parser;
/// Producer prompt rendering
pub mod prompt;
/// Ordered macro balance rules
pub mod rules;
/// Quantity reconciliation passes
pub mod reconciler;
/// Catalog and slot resolution
pub mod resolver;
/// Target derivation
pub mod targets;

pub use parser::{extract_json_payload, parse_candidate_plan, strip_code_fences};
pub use prompt::{build_meal_plan_prompt, MealPlanPrompt};
pub use reconciler::{
    apply_daily_bounds_pass, apply_macro_balance_pass, apply_meal_band_pass, find_deviations,
    reconcile, Deviation, PassOutcome, ReconciliationPass, ReconciliationReport,
    ReconciliationStatus,
};
pub use resolver::{assign_meal_slots, match_by_name, resolve_food, resolve_plan};
pub use rules::{select_macro_rule, MacroNutrient, MacroRatios, MacroRule, MACRO_BALANCE_RULES};
pub use targets::{calculate_targets, daily_macro_targets, meal_count_for};
