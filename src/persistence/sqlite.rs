// ABOUTME: SQLite meal log store with per-meal delete-then-insert transactions
// ABOUTME: Containers are keyed by user, date and meal type; items carry final quantity and nutrition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::{instrument, warn};
use uuid::Uuid;

use super::{MealLogStore, PersistSummary};
use crate::errors::{AppError, AppResult};
use crate::logging::PlanLogger;
use crate::models::{Meal, MealType};

/// A persisted meal item as read back from the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredMealItem {
    /// Row identifier
    pub id: String,
    /// Meal slot the item belongs to
    pub meal_type: MealType,
    /// Position within the meal
    pub position: i64,
    /// Resolved catalog identifier (or the original reference if unresolved)
    pub food_id: String,
    /// Food name
    pub food_name: String,
    /// Final quantity multiple
    pub quantity: f64,
    /// Final calories
    pub calories: f64,
    /// Final protein grams
    pub protein_g: f64,
    /// Final carbohydrate grams
    pub carbs_g: f64,
    /// Final fat grams
    pub fat_g: f64,
}

/// Meal log store over `meal_logs` and `meal_log_items`
#[derive(Debug, Clone)]
pub struct SqliteMealLogStore {
    pool: SqlitePool,
}

impl SqliteMealLogStore {
    /// Create a store over an existing pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the meal log tables if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                log_date TEXT NOT NULL,
                meal_type TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, log_date, meal_type)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal_logs table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_log_items (
                id TEXT PRIMARY KEY,
                meal_log_id TEXT NOT NULL REFERENCES meal_logs(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                food_id TEXT NOT NULL,
                food_name TEXT NOT NULL,
                quantity REAL NOT NULL,
                calories REAL NOT NULL,
                protein_g REAL NOT NULL,
                carbs_g REAL NOT NULL,
                fat_g REAL NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal_log_items table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_meal_log_items_log ON meal_log_items(meal_log_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal_log_items index: {e}")))?;

        Ok(())
    }

    /// Ensure a container exists for `(user_id, log_date, meal_type)`; returns its id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn ensure_meal_log(
        &self,
        user_id: &str,
        log_date: NaiveDate,
        meal_type: MealType,
    ) -> AppResult<String> {
        sqlx::query(
            r"
            INSERT INTO meal_logs (id, user_id, log_date, meal_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(user_id, log_date, meal_type) DO NOTHING
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(log_date.to_string())
        .bind(meal_type.as_str())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meal log: {e}")))?;

        self.find_meal_log(user_id, log_date, meal_type)
            .await?
            .ok_or_else(|| AppError::internal("Meal log missing after insert"))
    }

    async fn find_meal_log(
        &self,
        user_id: &str,
        log_date: NaiveDate,
        meal_type: MealType,
    ) -> AppResult<Option<String>> {
        let row = sqlx::query(
            r"
            SELECT id FROM meal_logs
            WHERE user_id = $1 AND log_date = $2 AND meal_type = $3
            ",
        )
        .bind(user_id)
        .bind(log_date.to_string())
        .bind(meal_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find meal log: {e}")))?;

        row.map(|r| {
            r.try_get::<String, _>("id")
                .map_err(|e| AppError::database(format!("Invalid meal_logs.id: {e}")))
        })
        .transpose()
    }

    /// Rewrite one container's items inside a transaction; returns rows inserted
    async fn replace_container_items(&self, meal_log_id: &str, meal: &Meal) -> AppResult<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM meal_log_items WHERE meal_log_id = $1")
            .bind(meal_log_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear meal items: {e}")))?;

        for (position, item) in meal.items().iter().enumerate() {
            let nutrition = item.calculated_nutrition();
            sqlx::query(
                r"
                INSERT INTO meal_log_items (
                    id, meal_log_id, position, food_id, food_name,
                    quantity, calories, protein_g, carbs_g, fat_g
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(meal_log_id)
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .bind(item.food_id())
            .bind(item.food_name())
            .bind(item.quantity())
            .bind(nutrition.calories)
            .bind(nutrition.protein_g)
            .bind(nutrition.carbs_g)
            .bind(nutrition.fat_g)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert meal item: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;

        Ok(meal.items().len())
    }

    /// Read back stored items for a user and date, ordered by meal slot then position
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_meal_items(
        &self,
        user_id: &str,
        log_date: NaiveDate,
    ) -> AppResult<Vec<StoredMealItem>> {
        let rows = sqlx::query(
            r"
            SELECT i.id, l.meal_type, i.position, i.food_id, i.food_name,
                   i.quantity, i.calories, i.protein_g, i.carbs_g, i.fat_g
            FROM meal_log_items i
            JOIN meal_logs l ON l.id = i.meal_log_id
            WHERE l.user_id = $1 AND l.log_date = $2
            ORDER BY l.meal_type, i.position
            ",
        )
        .bind(user_id)
        .bind(log_date.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list meal items: {e}")))?;

        let mut items = rows
            .iter()
            .map(row_to_stored_item)
            .collect::<AppResult<Vec<_>>>()?;
        items.sort_by_key(|item| (slot_order(item.meal_type), item.position));
        Ok(items)
    }
}

const fn slot_order(meal_type: MealType) -> u8 {
    match meal_type {
        MealType::Breakfast => 0,
        MealType::MorningSnack => 1,
        MealType::Lunch => 2,
        MealType::AfternoonSnack => 3,
        MealType::Dinner => 4,
        MealType::DinnerSnack => 5,
    }
}

#[async_trait]
impl MealLogStore for SqliteMealLogStore {
    #[instrument(skip(self, meals), fields(user.id = %user_id, log.date = %log_date, meals = meals.len()))]
    async fn replace_meal_items(
        &self,
        user_id: &str,
        log_date: NaiveDate,
        meals: &[Meal],
    ) -> AppResult<PersistSummary> {
        let mut summary = PersistSummary::default();

        for meal in meals {
            let Some(meal_log_id) = self
                .find_meal_log(user_id, log_date, meal.meal_type())
                .await?
            else {
                warn!(
                    meal_type = %meal.meal_type(),
                    "No meal log container for meal type, skipping"
                );
                summary.skipped_meal_types.push(meal.meal_type());
                continue;
            };

            summary.inserted_items += self.replace_container_items(&meal_log_id, meal).await?;
            summary.written_meals += 1;
        }

        PlanLogger::log_persistence(
            user_id,
            &log_date.to_string(),
            summary.written_meals,
            summary.inserted_items,
            summary.skipped_meal_types.len(),
        );

        Ok(summary)
    }
}

/// Convert a joined database row to a `StoredMealItem`
fn row_to_stored_item(row: &SqliteRow) -> AppResult<StoredMealItem> {
    let text = |column: &str| -> AppResult<String> {
        row.try_get(column)
            .map_err(|e| AppError::database(format!("Invalid meal item {column}: {e}")))
    };
    let real = |column: &str| -> AppResult<f64> {
        row.try_get(column)
            .map_err(|e| AppError::database(format!("Invalid meal item {column}: {e}")))
    };

    let meal_type_str = text("meal_type")?;
    let meal_type = MealType::from_str_lossy(&meal_type_str).ok_or_else(|| {
        AppError::database(format!("Unknown meal type in meal_logs: {meal_type_str}"))
    })?;

    Ok(StoredMealItem {
        id: text("id")?,
        meal_type,
        position: row
            .try_get("position")
            .map_err(|e| AppError::database(format!("Invalid meal item position: {e}")))?,
        food_id: text("food_id")?,
        food_name: text("food_name")?,
        quantity: real("quantity")?,
        calories: real("calories")?,
        protein_g: real("protein_g")?,
        carbs_g: real("carbs_g")?,
        fat_g: real("fat_g")?,
    })
}
