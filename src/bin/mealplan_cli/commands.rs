// ABOUTME: Subcommand implementations for mealplan-cli
// ABOUTME: Wires catalog, producer and meal log store into the meal plan service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use mealplan_engine::catalog::InMemoryFoodCatalog;
use mealplan_engine::config::EngineConfig;
use mealplan_engine::llm::OpenAiCompatibleProvider;
use mealplan_engine::persistence::SqliteMealLogStore;
use mealplan_engine::planning::calculate_targets;
use mealplan_engine::services::{GeneratedPlan, MealPlanService};
use tracing::warn;

use crate::helpers::{open_meal_log_store, print_json};
use crate::PersistArgs;

/// `targets`: print derived targets
pub fn targets(calories: f64) -> Result<()> {
    print_json(&calculate_targets(calories))
}

struct Wiring {
    service: MealPlanService,
    store: Option<SqliteMealLogStore>,
}

async fn build_service(
    config: &EngineConfig,
    catalog_path: &Path,
    persist: &PersistArgs,
) -> Result<Wiring> {
    let catalog = InMemoryFoodCatalog::from_json_file(catalog_path).await?;
    let llm = OpenAiCompatibleProvider::from_llm_config(&config.llm)?;
    let service = MealPlanService::new(Arc::new(llm), Arc::new(catalog), config.clone());

    if persist.user.is_none() {
        return Ok(Wiring {
            service,
            store: None,
        });
    }

    let store = open_meal_log_store(&config.database.url).await?;
    Ok(Wiring {
        service: service.with_store(Arc::new(store.clone())),
        store: Some(store),
    })
}

async fn finish(wiring: &Wiring, generated: &GeneratedPlan, persist: &PersistArgs) -> Result<()> {
    print_json(generated)?;

    let (Some(user), Some(date), Some(store)) =
        (persist.user.as_deref(), persist.date, wiring.store.as_ref())
    else {
        return Ok(());
    };

    for meal in generated.plan.meals() {
        store.ensure_meal_log(user, date, meal.meal_type()).await?;
    }
    let summary = wiring.service.save_plan(user, date, &generated.plan).await?;
    print_json(&summary)
}

/// `reconcile`: parse and reconcile a stored producer response
pub async fn reconcile(
    config: &EngineConfig,
    calories: f64,
    catalog_path: &Path,
    response_path: &Path,
    persist: PersistArgs,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(response_path)
        .await
        .with_context(|| format!("Failed to read {}", response_path.display()))?;

    let wiring = build_service(config, catalog_path, &persist).await?;
    let generated = wiring.service.plan_from_response(calories, &raw).await?;
    finish(&wiring, &generated, &persist).await
}

/// `generate`: call the producer, retrying retryable failures up to `attempts` times
pub async fn generate(
    config: &EngineConfig,
    calories: f64,
    catalog_path: &Path,
    attempts: u32,
    persist: PersistArgs,
) -> Result<()> {
    let wiring = build_service(config, catalog_path, &persist).await?;
    let attempts = attempts.max(1);

    let mut attempt = 1;
    let generated = loop {
        match wiring.service.generate_plan(calories).await {
            Ok(generated) => break generated,
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!(attempt, attempts, error = %e, "Plan generation failed, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    };

    finish(&wiring, &generated, &persist).await
}
