// ABOUTME: Main library entry point for the meal plan nutrition reconciliation engine
// ABOUTME: Turns unreliable producer output into a catalog-bound plan within calorie and macro bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Meal Plan Engine
//!
//! Given a daily calorie goal and free-form text from a generative text
//! producer, the engine builds a one-day meal plan whose foods come from a
//! known catalog and whose quantities are corrected toward per-meal and
//! whole-day targets.
//!
//! ## Architecture
//!
//! - **planning**: target derivation, prompt rendering, candidate parsing,
//!   catalog resolution and the reconciliation passes
//! - **llm**: text producer trait and an `OpenAI`-compatible HTTP adapter
//! - **catalog**: food catalog trait with in-memory and `SQLite` adapters
//! - **persistence**: meal log store trait with a `SQLite` adapter
//! - **services**: the pipeline wired to its collaborators
//! - **config** / **logging**: environment configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealplan_engine::models::{FoodCatalogEntry, NutritionValues};
//! use mealplan_engine::catalog::InMemoryFoodCatalog;
//! use mealplan_engine::planning::{calculate_targets, parse_candidate_plan, reconcile, resolve_plan};
//! use mealplan_engine::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let catalog = InMemoryFoodCatalog::new([FoodCatalogEntry::new(
//!         "oats",
//!         "Rolled oats",
//!         NutritionValues::new(389.0, 16.9, 66.3, 6.9),
//!     )]);
//!     let targets = calculate_targets(1800.0);
//!     let candidate = parse_candidate_plan(
//!         r#"{"meals":[{"mealType":"Breakfast","foods":[{"foodId":"oats","quantity":1.0}]}]}"#,
//!     )?;
//!     let mut plan = resolve_plan(&catalog, candidate, &targets).await?;
//!     let report = reconcile(&mut plan)?;
//!     println!("{:?}", report.status);
//!     Ok(())
//! }
//! ```

/// Food catalog accessors
pub mod catalog;

/// Environment-based configuration
pub mod config;

/// Reconciliation tolerances and target constants
pub mod constants;

/// Unified error handling with standard error codes
pub mod errors;

/// Text producer abstraction and `OpenAI`-compatible adapter
pub mod llm;

/// Structured logging setup and planning log helpers
pub mod logging;

/// Nutrition and meal plan data models
pub mod models;

/// Meal log persistence
pub mod persistence;

/// Target derivation, parsing, resolution and reconciliation
pub mod planning;

/// Pipeline orchestration over the external collaborators
pub mod services;
