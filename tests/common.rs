// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides logging setup, a sample catalog, plan builders and a scripted text producer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `mealplan_engine`

use std::collections::VecDeque;
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use mealplan_engine::catalog::InMemoryFoodCatalog;
use mealplan_engine::errors::AppError;
use mealplan_engine::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use mealplan_engine::models::{
    FoodCatalogEntry, FoodResolution, Meal, MealPlan, MealType, NutritionValues, ResolvedFoodItem,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// In-memory `SQLite` pool; a single connection keeps the database alive
pub async fn create_test_pool() -> SqlitePool {
    init_test_logging();
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

/// Small catalog with per-100 g values
pub fn sample_foods() -> Vec<FoodCatalogEntry> {
    vec![
        FoodCatalogEntry::new(
            "oats",
            "Rolled oats",
            NutritionValues::new(389.0, 16.9, 66.3, 6.9),
        ),
        FoodCatalogEntry::new(
            "chicken-breast",
            "Chicken breast, grilled",
            NutritionValues::new(165.0, 31.0, 0.0, 3.6),
        ),
        FoodCatalogEntry::new(
            "brown-rice",
            "Brown rice, cooked",
            NutritionValues::new(123.0, 2.7, 25.6, 1.0),
        ),
        FoodCatalogEntry::new(
            "salmon",
            "Atlantic salmon",
            NutritionValues::new(208.0, 20.0, 0.0, 13.0),
        ),
        FoodCatalogEntry::new(
            "banana",
            "Banana",
            NutritionValues::new(89.0, 1.1, 22.8, 0.3),
        ),
        FoodCatalogEntry::new(
            "olive-oil",
            "Olive oil",
            NutritionValues::new(884.0, 0.0, 0.0, 100.0),
        ),
    ]
}

pub fn sample_catalog() -> InMemoryFoodCatalog {
    InMemoryFoodCatalog::new(sample_foods())
}

/// A resolved item with the given per-100 g values
pub fn item(id: &str, base: NutritionValues, quantity: f64) -> ResolvedFoodItem {
    ResolvedFoodItem::new(id, id, FoodResolution::ById, base, Some(quantity))
}

/// A resolved item carrying calories only
pub fn calorie_item(id: &str, calories: f64, quantity: f64) -> ResolvedFoodItem {
    item(id, NutritionValues::new(calories, 0.0, 0.0, 0.0), quantity)
}

pub fn meal(meal_type: MealType, target_calories: f64, items: Vec<ResolvedFoodItem>) -> Meal {
    Meal::new(meal_type, meal_type.display_name(), target_calories, items)
}

/// Single-meal plan whose daily target equals `daily`
pub fn single_meal_plan(daily: NutritionValues, items: Vec<ResolvedFoodItem>) -> MealPlan {
    MealPlan::new(
        vec![meal(MealType::Breakfast, daily.calories, items)],
        daily,
    )
}

/// Assert every quantity is on the 0.1 grid within [0.3, 3.0]
pub fn assert_quantity_invariant(plan: &MealPlan) {
    for item in plan.meals().iter().flat_map(Meal::items) {
        let q = item.quantity();
        assert!((0.3..=3.0).contains(&q), "quantity {q} out of range");
        assert!(
            ((q * 10.0).round() - q * 10.0).abs() < 1e-9,
            "quantity {q} not a multiple of 0.1"
        );
    }
}

/// Assert calculated calories equal base calories times quantity, to one decimal
pub fn assert_calculated_consistent(plan: &MealPlan) {
    for item in plan.meals().iter().flat_map(Meal::items) {
        let expected = item.base_nutrition().calories * item.quantity();
        assert!(
            (item.calculated_nutrition().calories - expected).abs() <= 0.05 + 1e-9,
            "calculated {} != base x quantity {expected}",
            item.calculated_nutrition().calories
        );
    }
}

// ============================================================================
// Scripted text producer
// ============================================================================

/// Text producer returning queued replies in order
pub struct ScriptedProducer {
    replies: Mutex<VecDeque<Result<String, AppError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProducer {
    pub fn new(replies: impl IntoIterator<Item = Result<String, AppError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(content: &str) -> Self {
        Self::new([Ok(content.to_owned())])
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProducer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn display_name(&self) -> &str {
        "Scripted Producer"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::text_only() | LlmCapabilities::JSON_MODE
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("no scripted reply left")))?;

        Ok(ChatResponse {
            content: reply,
            model: "scripted-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}
