// ABOUTME: SQLite-backed food catalog using sqlx
// ABOUTME: Stores per-100g nutrition in a foods table with idempotent upserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::FoodCatalog;
use crate::errors::{AppError, AppResult};
use crate::models::FoodCatalogEntry;

/// Food catalog stored in the `foods` table
#[derive(Debug, Clone)]
pub struct SqliteFoodCatalog {
    pool: SqlitePool,
}

impl SqliteFoodCatalog {
    /// Create a catalog over an existing pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `foods` table if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS foods (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                calories REAL NOT NULL,
                protein_g REAL NOT NULL,
                carbs_g REAL NOT NULL,
                fat_g REAL NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create foods table: {e}")))?;

        Ok(())
    }

    /// Insert or replace a food
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn upsert(&self, entry: &FoodCatalogEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO foods (id, name, calories, protein_g, carbs_g, fat_g)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                calories = excluded.calories,
                protein_g = excluded.protein_g,
                carbs_g = excluded.carbs_g,
                fat_g = excluded.fat_g
            ",
        )
        .bind(&entry.id)
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.carbs_g)
        .bind(entry.fat_g)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert food {}: {e}", entry.id)))?;

        Ok(())
    }

    /// Upsert many foods; returns how many were written
    ///
    /// # Errors
    ///
    /// Returns an error if any upsert fails
    pub async fn upsert_all(&self, entries: &[FoodCatalogEntry]) -> AppResult<usize> {
        for entry in entries {
            self.upsert(entry).await?;
        }
        Ok(entries.len())
    }
}

#[async_trait]
impl FoodCatalog for SqliteFoodCatalog {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<FoodCatalogEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, name, calories, protein_g, carbs_g, fat_g
            FROM foods
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get food: {e}")))?;

        row.map(|r| row_to_food(&r)).transpose()
    }

    async fn get_all(&self) -> AppResult<Vec<FoodCatalogEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, calories, protein_g, carbs_g, fat_g
            FROM foods
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list foods: {e}")))?;

        rows.iter().map(row_to_food).collect()
    }
}

/// Convert a database row to a `FoodCatalogEntry`
fn row_to_food(row: &SqliteRow) -> AppResult<FoodCatalogEntry> {
    let read = |column: &str| -> AppResult<f64> {
        row.try_get(column)
            .map_err(|e| AppError::database(format!("Invalid foods.{column}: {e}")))
    };

    Ok(FoodCatalogEntry {
        id: row
            .try_get("id")
            .map_err(|e| AppError::database(format!("Invalid foods.id: {e}")))?,
        name: row
            .try_get("name")
            .map_err(|e| AppError::database(format!("Invalid foods.name: {e}")))?,
        calories: read("calories")?,
        protein_g: read("protein_g")?,
        carbs_g: read("carbs_g")?,
        fat_g: read("fat_g")?,
    })
}
