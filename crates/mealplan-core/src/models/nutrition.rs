// ABOUTME: Nutrition value models for catalog foods, meals, and daily targets
// ABOUTME: NutritionValues, FoodCatalogEntry, MealType, and NutritionTargets definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Round to one decimal place, half away from zero
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calories and macronutrients for a food, meal, or day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionValues {
    /// Energy in kilocalories
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}

impl NutritionValues {
    /// Create nutrition values from explicit macros
    #[must_use]
    pub const fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// All-zero values, used for unresolved foods
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Multiply every field by `factor`
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.calories * factor,
            self.protein_g * factor,
            self.carbs_g * factor,
            self.fat_g * factor,
        )
    }

    /// Round every field to one decimal place
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(
            round_to_tenth(self.calories),
            round_to_tenth(self.protein_g),
            round_to_tenth(self.carbs_g),
            round_to_tenth(self.fat_g),
        )
    }
}

impl Add for NutritionValues {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.calories + rhs.calories,
            self.protein_g + rhs.protein_g,
            self.carbs_g + rhs.carbs_g,
            self.fat_g + rhs.fat_g,
        )
    }
}

impl AddAssign for NutritionValues {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionValues {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Self> for NutritionValues {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A food as stored in the nutrient catalog, with values per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCatalogEntry {
    /// Catalog identifier
    #[serde(alias = "foodId", alias = "food_id")]
    pub id: String,
    /// Display name
    #[serde(alias = "foodName", alias = "food_name")]
    pub name: String,
    /// Kilocalories per 100 g
    #[serde(alias = "caloriesPer100g", alias = "calories_per_100g")]
    pub calories: f64,
    /// Protein grams per 100 g
    #[serde(alias = "protein", alias = "proteinPer100g")]
    pub protein_g: f64,
    /// Carbohydrate grams per 100 g
    #[serde(alias = "carbs", alias = "carbsPer100g", alias = "carbohydrates_g")]
    pub carbs_g: f64,
    /// Fat grams per 100 g
    #[serde(alias = "fat", alias = "fatPer100g")]
    pub fat_g: f64,
}

impl FoodCatalogEntry {
    /// Create a catalog entry
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        per_100g: NutritionValues,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calories: per_100g.calories,
            protein_g: per_100g.protein_g,
            carbs_g: per_100g.carbs_g,
            fat_g: per_100g.fat_g,
        }
    }

    /// Nutrition per 100 g
    #[must_use]
    pub const fn per_100g(&self) -> NutritionValues {
        NutritionValues::new(self.calories, self.protein_g, self.carbs_g, self.fat_g)
    }
}

/// Meal slot label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Snack between breakfast and lunch
    MorningSnack,
    /// Lunch meal
    Lunch,
    /// Snack between lunch and dinner
    AfternoonSnack,
    /// Dinner meal
    Dinner,
    /// Snack after dinner
    DinnerSnack,
}

const THREE_MEAL_SLOTS: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];
const FOUR_MEAL_SLOTS: [MealType; 4] = [
    MealType::Breakfast,
    MealType::Lunch,
    MealType::AfternoonSnack,
    MealType::Dinner,
];
const FIVE_MEAL_SLOTS: [MealType; 5] = [
    MealType::Breakfast,
    MealType::MorningSnack,
    MealType::Lunch,
    MealType::AfternoonSnack,
    MealType::Dinner,
];

impl MealType {
    /// Stable snake_case identifier, also used as the persistence key
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::MorningSnack => "morning_snack",
            Self::Lunch => "lunch",
            Self::AfternoonSnack => "afternoon_snack",
            Self::Dinner => "dinner",
            Self::DinnerSnack => "dinner_snack",
        }
    }

    /// Human-readable label, as shown to the text producer
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::MorningSnack => "Morning Snack",
            Self::Lunch => "Lunch",
            Self::AfternoonSnack => "Afternoon Snack",
            Self::Dinner => "Dinner",
            Self::DinnerSnack => "Dinner Snack",
        }
    }

    /// Parse a meal type from a free-form label.
    ///
    /// Case, whitespace, `_` and `-` are ignored, so "Morning Snack",
    /// "morning_snack" and "MorningSnack" all parse. Numbered snacks map to
    /// their position in the day. Returns `None` for unrecognized labels.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "breakfast" => Some(Self::Breakfast),
            "morningsnack" | "midmorningsnack" | "amsnack" | "snack1" => Some(Self::MorningSnack),
            "lunch" => Some(Self::Lunch),
            "afternoonsnack" | "pmsnack" | "snack2" | "snack" => Some(Self::AfternoonSnack),
            "dinner" | "supper" => Some(Self::Dinner),
            "dinnersnack" | "eveningsnack" | "nightsnack" | "snack3" => Some(Self::DinnerSnack),
            _ => None,
        }
    }

    /// Ordered meal slots for a decided meal count.
    ///
    /// Counts above five use the five-meal layout; counts below four use the
    /// three-meal layout.
    #[must_use]
    pub const fn slots_for(meal_count: usize) -> &'static [Self] {
        match meal_count {
            0..=3 => &THREE_MEAL_SLOTS,
            4 => &FOUR_MEAL_SLOTS,
            _ => &FIVE_MEAL_SLOTS,
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Daily and per-meal nutrition targets derived from a calorie goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Daily calorie goal the targets were derived from
    pub daily_calories: f64,
    /// Decided number of meals
    pub meal_count: usize,
    /// Whole-day targets
    pub daily: NutritionValues,
    /// Targets for each meal (daily divided evenly)
    pub per_meal: NutritionValues,
    /// Ordered meal slots, one per meal
    pub meal_slots: Vec<MealType>,
}
