// ABOUTME: Candidate and resolved meal plan models with recompute-on-mutation totals
// ABOUTME: ProposedFoodItem, ResolvedFoodItem, Meal, and MealPlan definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::nutrition::{MealType, NutritionValues};
use crate::constants::quantity;

/// A food reference proposed by the text producer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposedFoodItem {
    /// Catalog identifier, if the producer gave one
    pub food_id: Option<String>,
    /// Food name, if the producer gave one
    pub food_name: Option<String>,
    /// Serving quantity as a multiple of 100 g
    pub quantity: Option<f64>,
}

/// A meal proposed by the text producer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposedMeal {
    /// Raw meal-type label as written by the producer
    pub meal_type: String,
    /// Optional descriptive name ("Greek yogurt bowl")
    pub meal_name: Option<String>,
    /// Proposed foods, in order
    pub foods: Vec<ProposedFoodItem>,
}

/// The structured payload extracted from producer output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidatePlan {
    /// Proposed meals, in producer order
    pub meals: Vec<ProposedMeal>,
}

/// How a proposed food was bound to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodResolution {
    /// Identifier matched a catalog entry exactly
    ById,
    /// Name matched a catalog entry exactly, ignoring case
    ByExactName,
    /// Name contained, or was contained in, a catalog entry name
    ByPartialName,
    /// Nothing matched; nutrition is zero
    Unresolved,
}

impl FoodResolution {
    /// Whether the item carries catalog nutrition
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Normalize a proposed quantity onto the `quantity::STEP` grid within the allowed range.
///
/// Missing and non-finite values fall back to the default serving. Grid
/// rounding is half away from zero.
#[must_use]
pub fn normalize_quantity(raw: Option<f64>) -> f64 {
    let value = raw.filter(|q| q.is_finite()).unwrap_or(quantity::DEFAULT);
    let steps_per_unit = (1.0 / quantity::STEP).round();
    ((value * steps_per_unit).round() / steps_per_unit).clamp(quantity::MIN, quantity::MAX)
}

/// A proposed food bound to a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFoodItem {
    food_id: String,
    food_name: String,
    resolution: FoodResolution,
    quantity: f64,
    base: NutritionValues,
    calculated: NutritionValues,
}

impl ResolvedFoodItem {
    /// Bind a food to its per-100 g nutrition; the quantity is normalized
    #[must_use]
    pub fn new(
        food_id: impl Into<String>,
        food_name: impl Into<String>,
        resolution: FoodResolution,
        base: NutritionValues,
        quantity: Option<f64>,
    ) -> Self {
        let quantity = normalize_quantity(quantity);
        Self {
            food_id: food_id.into(),
            food_name: food_name.into(),
            resolution,
            quantity,
            base,
            calculated: base.scaled(quantity).rounded(),
        }
    }

    /// Resolved catalog identifier, or the original one when unresolved
    #[must_use]
    pub fn food_id(&self) -> &str {
        &self.food_id
    }

    /// Food name
    #[must_use]
    pub fn food_name(&self) -> &str {
        &self.food_name
    }

    /// How the food was resolved
    #[must_use]
    pub const fn resolution(&self) -> FoodResolution {
        self.resolution
    }

    /// Current quantity, a multiple of 0.1 in the allowed range
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Per-100 g nutrition copied from the catalog
    #[must_use]
    pub const fn base_nutrition(&self) -> NutritionValues {
        self.base
    }

    /// Base nutrition times quantity, rounded to one decimal
    #[must_use]
    pub const fn calculated_nutrition(&self) -> NutritionValues {
        self.calculated
    }

    /// Multiply the quantity by `factor`, round to 0.1, clamp, and recompute
    pub fn scale_quantity(&mut self, factor: f64) {
        self.set_quantity(self.quantity * factor);
    }

    /// Set the quantity (rounded to 0.1 and clamped) and recompute
    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = normalize_quantity(Some(quantity));
        self.calculated = self.base.scaled(self.quantity).rounded();
    }
}

/// One meal of the day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    meal_type: MealType,
    name: String,
    target_calories: f64,
    items: Vec<ResolvedFoodItem>,
    nutrition: NutritionValues,
}

impl Meal {
    /// Create a meal and compute its totals
    #[must_use]
    pub fn new(
        meal_type: MealType,
        name: impl Into<String>,
        target_calories: f64,
        items: Vec<ResolvedFoodItem>,
    ) -> Self {
        let mut meal = Self {
            meal_type,
            name: name.into(),
            target_calories,
            items,
            nutrition: NutritionValues::zero(),
        };
        meal.recompute();
        meal
    }

    /// Meal slot
    #[must_use]
    pub const fn meal_type(&self) -> MealType {
        self.meal_type
    }

    /// Descriptive name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calorie target for this meal
    #[must_use]
    pub const fn target_calories(&self) -> f64 {
        self.target_calories
    }

    /// Items in producer order
    #[must_use]
    pub fn items(&self) -> &[ResolvedFoodItem] {
        &self.items
    }

    /// Sum of item nutrition
    #[must_use]
    pub const fn nutrition(&self) -> NutritionValues {
        self.nutrition
    }

    /// Sum of item calories
    #[must_use]
    pub const fn actual_calories(&self) -> f64 {
        self.nutrition.calories
    }

    /// Whether the meal has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Scale every item's quantity by `factor` and recompute
    pub fn scale(&mut self, factor: f64) {
        for item in &mut self.items {
            item.scale_quantity(factor);
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.nutrition = self
            .items
            .iter()
            .map(ResolvedFoodItem::calculated_nutrition)
            .sum::<NutritionValues>()
            .rounded();
    }
}

/// A day's meals with daily targets and totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlan {
    meals: Vec<Meal>,
    daily_target: NutritionValues,
    actual_daily: NutritionValues,
}

impl MealPlan {
    /// Create a plan and compute its daily totals
    #[must_use]
    pub fn new(meals: Vec<Meal>, daily_target: NutritionValues) -> Self {
        let mut plan = Self {
            meals,
            daily_target,
            actual_daily: NutritionValues::zero(),
        };
        plan.recompute();
        plan
    }

    /// Meals in slot order
    #[must_use]
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Number of meals
    #[must_use]
    pub fn meal_count(&self) -> usize {
        self.meals.len()
    }

    /// Whole-day targets
    #[must_use]
    pub const fn daily_target(&self) -> NutritionValues {
        self.daily_target
    }

    /// Sum of meal nutrition
    #[must_use]
    pub const fn actual_daily(&self) -> NutritionValues {
        self.actual_daily
    }

    /// Scale one meal's items by `factor`; returns `false` if `index` is out of range
    pub fn scale_meal(&mut self, index: usize, factor: f64) -> bool {
        let Some(meal) = self.meals.get_mut(index) else {
            return false;
        };
        meal.scale(factor);
        self.recompute();
        true
    }

    /// Scale every item in the plan by `factor`
    pub fn scale_all(&mut self, factor: f64) {
        for meal in &mut self.meals {
            meal.scale(factor);
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.actual_daily = self
            .meals
            .iter()
            .map(Meal::nutrition)
            .sum::<NutritionValues>()
            .rounded();
    }
}
