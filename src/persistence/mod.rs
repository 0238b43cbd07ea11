// ABOUTME: Meal log persistence seam for finalized meal plans
// ABOUTME: Defines the MealLogStore trait and the per-call write summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Log Persistence
//!
//! Finalized meals are written into per-user, per-day meal-log containers,
//! one container per meal type. Writing replaces whatever items a container
//! held, so repeating a write for the same key is idempotent. Meals whose
//! container does not exist are skipped and reported.

mod sqlite;

pub use sqlite::{SqliteMealLogStore, StoredMealItem};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppResult;
use crate::models::{Meal, MealType};

/// Outcome of one `replace_meal_items` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersistSummary {
    /// Meals whose container was found and rewritten
    pub written_meals: usize,
    /// Item rows inserted across all written meals
    pub inserted_items: usize,
    /// Meals skipped because no container exists for their type
    pub skipped_meal_types: Vec<MealType>,
}

/// Store for finalized meal items
#[async_trait]
pub trait MealLogStore: Send + Sync {
    /// Replace stored items for each meal's container under `(user_id, log_date)`
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails
    async fn replace_meal_items(
        &self,
        user_id: &str,
        log_date: NaiveDate,
        meals: &[Meal],
    ) -> AppResult<PersistSummary>;
}
