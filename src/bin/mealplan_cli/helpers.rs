// ABOUTME: Output and database helpers for mealplan-cli
// ABOUTME: JSON printing to stdout and meal log store setup with container provisioning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use mealplan_engine::persistence::SqliteMealLogStore;
use serde::Serialize;
use sqlx::sqlite::SqlitePoolOptions;

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Connect to the meal log database and create its tables
pub async fn open_meal_log_store(database_url: &str) -> Result<SqliteMealLogStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to {database_url}"))?;

    let store = SqliteMealLogStore::new(pool);
    store.migrate().await?;
    Ok(store)
}
