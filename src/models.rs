// ABOUTME: Re-exports the nutrition and meal plan models from mealplan-core
// ABOUTME: Catalog entries, proposed and resolved items, meals, plans and targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use mealplan_core::models::*;
