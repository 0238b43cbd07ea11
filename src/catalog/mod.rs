// ABOUTME: Nutrient catalog accessor seam used to resolve proposed foods
// ABOUTME: Defines the FoodCatalog trait with in-memory and SQLite implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Food Catalog
//!
//! Read-only lookup of foods with per-100 g nutrition. Entries are trusted as
//! given; the engine never validates nutrition values.

mod memory;
mod sqlite;

pub use memory::InMemoryFoodCatalog;
pub use sqlite::SqliteFoodCatalog;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::FoodCatalogEntry;

/// Read-only access to the nutrient catalog
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// Look up a food by its exact identifier
    async fn get_by_id(&self, id: &str) -> AppResult<Option<FoodCatalogEntry>>;

    /// All foods, ordered by identifier
    async fn get_all(&self) -> AppResult<Vec<FoodCatalogEntry>>;
}
