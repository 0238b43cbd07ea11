// ABOUTME: Core types and constants for the meal plan reconciliation engine
// ABOUTME: Foundation crate with error handling, nutrition models, and tolerance constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Meal Plan Core
//!
//! Foundation crate providing shared types and constants for the meal plan
//! reconciliation engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `PlanGenerationError`
//! - **constants**: Tolerance bands, quantity limits, macro split and meal-count tiers
//! - **models**: Catalog entries, nutrition values, meals and meal plans

/// Unified error handling system with standard error codes
pub mod errors;

/// Reconciliation tolerances and target-derivation constants
pub mod constants;

/// Core data models (catalog entries, meals, plans, targets)
pub mod models;
