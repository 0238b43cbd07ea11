// ABOUTME: Re-exports the unified error types from mealplan-core
// ABOUTME: AppError, ErrorCode, PlanGenerationError and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use mealplan_core::errors::*;
