// ABOUTME: Tests for the target calculator across calorie tiers
// ABOUTME: Validates meal counts, macro shares, per-meal splits and slot ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealplan_engine::models::MealType;
use mealplan_engine::planning::{calculate_targets, daily_macro_targets, meal_count_for};

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn test_meal_count_tiers() {
    let cases = [
        (0.0, 3),
        (1200.0, 3),
        (1800.0, 3),
        (2000.0, 4),
        (2600.0, 4),
        (3000.0, 5),
        (4500.0, 5),
    ];

    for (calories, expected) in cases {
        assert_eq!(meal_count_for(calories), expected, "{calories} kcal");
    }
}

#[test]
fn test_daily_macro_shares() {
    let daily = daily_macro_targets(1800.0);

    assert!(close(daily.calories, 1800.0));
    assert!(close(daily.protein_g, 90.0));
    assert!(close(daily.carbs_g, 247.5));
    assert!(close(daily.fat_g, 55.0));
}

#[test]
fn test_per_meal_split_is_even() {
    let targets = calculate_targets(2600.0);

    assert_eq!(targets.meal_count, 4);
    assert!(close(targets.per_meal.calories, 650.0));
    assert!(close(targets.per_meal.protein_g, targets.daily.protein_g / 4.0));
    assert!(close(
        targets.per_meal.calories * targets.meal_count as f64,
        targets.daily.calories
    ));
}

#[test]
fn test_slots_follow_meal_count() {
    assert_eq!(
        calculate_targets(1800.0).meal_slots,
        vec![MealType::Breakfast, MealType::Lunch, MealType::Dinner]
    );
    assert_eq!(
        calculate_targets(2600.0).meal_slots,
        vec![
            MealType::Breakfast,
            MealType::Lunch,
            MealType::AfternoonSnack,
            MealType::Dinner,
        ]
    );
    assert_eq!(calculate_targets(3200.0).meal_slots.len(), 5);
}

#[test]
fn test_non_finite_goal_treated_as_zero() {
    for calories in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let targets = calculate_targets(calories);
        assert!(close(targets.daily_calories, 0.0));
        assert_eq!(targets.meal_count, 3);
        assert!(close(targets.per_meal.calories, 0.0));
    }
}
