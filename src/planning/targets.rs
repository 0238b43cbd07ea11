// ABOUTME: Target calculator deriving meal count and daily/per-meal macro targets
// ABOUTME: Pure function over the daily calorie goal using fixed tiers and macro shares
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mealplan_core::constants::{targets, units};

use crate::models::{MealType, NutritionTargets, NutritionValues};

/// Number of meals for a daily calorie goal
///
/// ≥3000 kcal → 5, ≥2500 → 4, ≥2000 → 4, otherwise 3.
#[must_use]
pub fn meal_count_for(daily_calories: f64) -> usize {
    if daily_calories >= targets::FIVE_MEAL_THRESHOLD {
        5
    } else if daily_calories >= targets::FOUR_MEAL_HIGH_THRESHOLD
        || daily_calories >= targets::FOUR_MEAL_THRESHOLD
    {
        4
    } else {
        targets::DEFAULT_MEAL_COUNT
    }
}

/// Daily macro targets for a calorie goal
#[must_use]
pub fn daily_macro_targets(daily_calories: f64) -> NutritionValues {
    NutritionValues::new(
        daily_calories,
        daily_calories * targets::PROTEIN_CALORIE_SHARE / units::KCAL_PER_GRAM_PROTEIN,
        daily_calories * targets::CARBS_CALORIE_SHARE / units::KCAL_PER_GRAM_CARBS,
        daily_calories * targets::FAT_CALORIE_SHARE / units::KCAL_PER_GRAM_FAT,
    )
}

/// Derive meal count, daily targets, and evenly split per-meal targets.
///
/// Non-finite or negative goals are treated as zero.
#[must_use]
pub fn calculate_targets(daily_calories: f64) -> NutritionTargets {
    let daily_calories = if daily_calories.is_finite() {
        daily_calories.max(0.0)
    } else {
        0.0
    };

    let meal_count = meal_count_for(daily_calories);
    let daily = daily_macro_targets(daily_calories);

    NutritionTargets {
        daily_calories,
        meal_count,
        daily,
        per_meal: daily.scaled(1.0 / meal_count as f64),
        meal_slots: MealType::slots_for(meal_count).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(meal_count_for(1999.9), 3);
        assert_eq!(meal_count_for(2000.0), 4);
        assert_eq!(meal_count_for(2999.9), 4);
        assert_eq!(meal_count_for(3000.0), 5);
    }

    #[test]
    fn test_negative_goal_is_zero() {
        let targets = calculate_targets(-50.0);
        assert!(targets.daily.calories.abs() < f64::EPSILON);
        assert_eq!(targets.meal_count, 3);
    }
}
