// ABOUTME: Integration tests for the SQLite meal log store
// ABOUTME: Validates container provisioning, idempotent replace, and skipping of missing containers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use common::{calorie_item, create_test_pool, item, meal};
use mealplan_engine::models::{Meal, MealType, NutritionValues};
use mealplan_engine::persistence::{MealLogStore, SqliteMealLogStore};

async fn create_store() -> SqliteMealLogStore {
    let store = SqliteMealLogStore::new(create_test_pool().await);
    store.migrate().await.unwrap();
    store
}

fn log_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn day_meals() -> Vec<Meal> {
    vec![
        meal(
            MealType::Breakfast,
            600.0,
            vec![
                item("oats", NutritionValues::new(389.0, 16.9, 66.3, 6.9), 1.2),
                calorie_item("banana", 89.0, 1.0),
            ],
        ),
        meal(
            MealType::Lunch,
            600.0,
            vec![calorie_item("brown-rice", 123.0, 2.0)],
        ),
        meal(
            MealType::Dinner,
            600.0,
            vec![calorie_item("salmon", 208.0, 1.5)],
        ),
    ]
}

#[tokio::test]
async fn test_ensure_meal_log_is_stable() {
    let store = create_store().await;

    let first = store
        .ensure_meal_log("user-1", log_date(), MealType::Lunch)
        .await
        .unwrap();
    let second = store
        .ensure_meal_log("user-1", log_date(), MealType::Lunch)
        .await
        .unwrap();
    let other_user = store
        .ensure_meal_log("user-2", log_date(), MealType::Lunch)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other_user);
}

#[tokio::test]
async fn test_replace_writes_items_with_final_values() {
    let store = create_store().await;
    for meal_type in [MealType::Breakfast, MealType::Lunch, MealType::Dinner] {
        store
            .ensure_meal_log("user-1", log_date(), meal_type)
            .await
            .unwrap();
    }

    let summary = store
        .replace_meal_items("user-1", log_date(), &day_meals())
        .await
        .unwrap();

    assert_eq!(summary.written_meals, 3);
    assert_eq!(summary.inserted_items, 4);
    assert!(summary.skipped_meal_types.is_empty());

    let items = store.list_meal_items("user-1", log_date()).await.unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i.food_id.as_str()).collect();
    assert_eq!(ids, vec!["oats", "banana", "brown-rice", "salmon"]);

    let oats = &items[0];
    assert_eq!(oats.meal_type, MealType::Breakfast);
    assert_eq!(oats.position, 0);
    assert!((oats.quantity - 1.2).abs() < 1e-9);
    assert!((oats.calories - 466.8).abs() < 1e-9);
    assert!((oats.protein_g - 20.3).abs() < 1e-9);
}

#[tokio::test]
async fn test_replace_is_idempotent() {
    let store = create_store().await;
    for meal_type in [MealType::Breakfast, MealType::Lunch, MealType::Dinner] {
        store
            .ensure_meal_log("user-1", log_date(), meal_type)
            .await
            .unwrap();
    }

    store
        .replace_meal_items("user-1", log_date(), &day_meals())
        .await
        .unwrap();
    let first: Vec<(String, f64)> = store
        .list_meal_items("user-1", log_date())
        .await
        .unwrap()
        .into_iter()
        .map(|i| (i.food_id, i.quantity))
        .collect();

    store
        .replace_meal_items("user-1", log_date(), &day_meals())
        .await
        .unwrap();
    let second: Vec<(String, f64)> = store
        .list_meal_items("user-1", log_date())
        .await
        .unwrap()
        .into_iter()
        .map(|i| (i.food_id, i.quantity))
        .collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_container_skipped() {
    let store = create_store().await;
    store
        .ensure_meal_log("user-1", log_date(), MealType::Breakfast)
        .await
        .unwrap();

    let summary = store
        .replace_meal_items("user-1", log_date(), &day_meals())
        .await
        .unwrap();

    assert_eq!(summary.written_meals, 1);
    assert_eq!(summary.inserted_items, 2);
    assert_eq!(
        summary.skipped_meal_types,
        vec![MealType::Lunch, MealType::Dinner]
    );

    let items = store.list_meal_items("user-1", log_date()).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.meal_type == MealType::Breakfast));
}

#[tokio::test]
async fn test_other_dates_untouched() {
    let store = create_store().await;
    let other_day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    for date in [log_date(), other_day] {
        store
            .ensure_meal_log("user-1", date, MealType::Lunch)
            .await
            .unwrap();
    }

    store
        .replace_meal_items("user-1", other_day, &day_meals()[1..2])
        .await
        .unwrap();
    store
        .replace_meal_items("user-1", log_date(), &[])
        .await
        .unwrap();

    assert!(store
        .list_meal_items("user-1", log_date())
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        store
            .list_meal_items("user-1", other_day)
            .await
            .unwrap()
            .len(),
        1
    );
}
