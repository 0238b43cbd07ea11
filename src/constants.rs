// ABOUTME: Re-exports reconciliation tolerances and target constants from mealplan-core
// ABOUTME: Quantity limits, macro calorie shares, meal-count tiers and band widths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use mealplan_core::constants::*;
