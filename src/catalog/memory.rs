// ABOUTME: In-memory food catalog built from entries or a JSON file
// ABOUTME: Used by the CLI and tests; lookups are lock-free over an immutable index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use super::FoodCatalog;
use crate::errors::{AppError, AppResult};
use crate::models::FoodCatalogEntry;

/// Accepted on-disk layouts: a bare array or `{"foods": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Bare(Vec<FoodCatalogEntry>),
    Wrapped { foods: Vec<FoodCatalogEntry> },
}

/// Immutable in-memory catalog
#[derive(Debug, Clone, Default)]
pub struct InMemoryFoodCatalog {
    entries: Vec<FoodCatalogEntry>,
    index: HashMap<String, usize>,
}

impl InMemoryFoodCatalog {
    /// Build a catalog; entries are sorted by id and later duplicates replace earlier ones
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = FoodCatalogEntry>) -> Self {
        let mut by_id: HashMap<String, FoodCatalogEntry> = HashMap::new();
        for entry in entries {
            if let Some(previous) = by_id.insert(entry.id.clone(), entry) {
                warn!(food.id = %previous.id, "Duplicate catalog id, keeping the later entry");
            }
        }

        let mut entries: Vec<FoodCatalogEntry> = by_id.into_values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();

        Self { entries, index }
    }

    /// Parse a catalog from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a catalog array or `{"foods": [...]}` object
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| AppError::invalid_input(format!("Invalid food catalog JSON: {e}")))?;
        let entries = match file {
            CatalogFile::Bare(entries) | CatalogFile::Wrapped { foods: entries } => entries,
        };
        Ok(Self::new(entries))
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::invalid_input(format!(
                "Failed to read food catalog {}: {e}",
                path.display()
            ))
        })?;
        let catalog = Self::from_json_str(&json)?;
        debug!(path = %path.display(), foods = catalog.len(), "Loaded food catalog");
        Ok(catalog)
    }

    /// Number of foods
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow all entries, ordered by id
    #[must_use]
    pub fn entries(&self) -> &[FoodCatalogEntry] {
        &self.entries
    }
}

#[async_trait]
impl FoodCatalog for InMemoryFoodCatalog {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<FoodCatalogEntry>> {
        Ok(self
            .index
            .get(id)
            .and_then(|&i| self.entries.get(i))
            .cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<FoodCatalogEntry>> {
        Ok(self.entries.clone())
    }
}
