// ABOUTME: Meal plan service orchestrating targets, producer call, parsing, resolution and reconciliation
// ABOUTME: Single attempt per call; persistence is delegated to an optional meal log store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::FoodCatalog;
use crate::config::EngineConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatRequest, LlmProvider};
use crate::logging::PlanLogger;
use crate::models::{MealPlan, NutritionTargets};
use crate::persistence::{MealLogStore, PersistSummary};
use crate::planning::{
    build_meal_plan_prompt, calculate_targets, parse_candidate_plan, reconcile, resolve_plan,
    ReconciliationReport,
};

/// A reconciled plan together with the targets it was built against
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    /// Targets derived from the calorie goal
    pub targets: NutritionTargets,
    /// Reconciled plan
    pub plan: MealPlan,
    /// Per-pass outcomes and final status
    pub report: ReconciliationReport,
}

/// Meal plan generation service
///
/// Holds no per-request state; each call builds and owns its own plan.
#[derive(Clone)]
pub struct MealPlanService {
    llm: Arc<dyn LlmProvider>,
    catalog: Arc<dyn FoodCatalog>,
    store: Option<Arc<dyn MealLogStore>>,
    config: EngineConfig,
}

impl MealPlanService {
    /// Create a service without persistence
    #[must_use]
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        catalog: Arc<dyn FoodCatalog>,
        config: EngineConfig,
    ) -> Self {
        Self {
            llm,
            catalog,
            store: None,
            config,
        }
    }

    /// Attach a meal log store for `save_plan`
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn MealLogStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Generate a plan for a daily calorie goal with one producer call.
    ///
    /// # Errors
    ///
    /// Returns a retryable `PlanGenerationFailed` error when the producer
    /// output holds no usable plan, or the producer/catalog error otherwise
    #[instrument(skip(self), fields(provider = %self.llm.name()))]
    pub async fn generate_plan(&self, daily_calories: f64) -> AppResult<GeneratedPlan> {
        let targets = calculate_targets(daily_calories);
        let catalog = self.catalog.get_all().await?;
        let prompt =
            build_meal_plan_prompt(&targets, &catalog, self.config.prompt.catalog_limit);

        let request = ChatRequest::new(prompt.into_messages())
            .with_model(self.config.llm.model.clone())
            .with_temperature(self.config.llm.temperature)
            .with_max_tokens(self.config.llm.max_tokens)
            .with_json_mode();

        let response = self.llm.complete(&request).await?;
        info!(
            model = %response.model,
            response_len = response.content.len(),
            "Producer responded"
        );

        self.plan_from_targets(targets, &response.content).await
    }

    /// Build a reconciled plan from producer output that is already in hand
    ///
    /// # Errors
    ///
    /// Returns a retryable `PlanGenerationFailed` error when `raw` holds no
    /// usable plan, or a catalog error
    pub async fn plan_from_response(
        &self,
        daily_calories: f64,
        raw: &str,
    ) -> AppResult<GeneratedPlan> {
        self.plan_from_targets(calculate_targets(daily_calories), raw)
            .await
    }

    async fn plan_from_targets(
        &self,
        targets: NutritionTargets,
        raw: &str,
    ) -> AppResult<GeneratedPlan> {
        let candidate = parse_candidate_plan(raw).map_err(|e| {
            PlanLogger::log_plan_generation_failure(e.kind(), &e.to_string(), raw.len());
            AppError::from(e)
        })?;

        let mut plan = resolve_plan(self.catalog.as_ref(), candidate, &targets).await?;
        let report = reconcile(&mut plan)?;

        Ok(GeneratedPlan {
            targets,
            plan,
            report,
        })
    }

    /// Persist a finalized plan's meals for a user and date
    ///
    /// # Errors
    ///
    /// Returns a config error when no store is attached, or the store's error
    pub async fn save_plan(
        &self,
        user_id: &str,
        log_date: NaiveDate,
        plan: &MealPlan,
    ) -> AppResult<PersistSummary> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| AppError::config("No meal log store configured"))?;
        store.replace_meal_items(user_id, log_date, plan.meals()).await
    }
}
