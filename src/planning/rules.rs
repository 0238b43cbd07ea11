// ABOUTME: Ordered macro-balance rule table used by the whole-day balance pass
// ABOUTME: Each rule pairs a macro ratio predicate with a global quantity factor; first match wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Macro Balance Rules
//!
//! The thresholds and factors are empirical, not derived from a model. They
//! are pinned by tests; change them together with those tests.

use serde::Serialize;

use mealplan_core::constants::reconciliation::{
    MACRO_RATIO_LOWER_TRIGGER, MACRO_RATIO_UPPER_TRIGGER,
};

use crate::models::NutritionValues;

use Comparison::{Above, Below};
use MacroNutrient::{Carbs, Fat, Protein};

/// Macronutrient a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroNutrient {
    /// Protein grams
    Protein,
    /// Carbohydrate grams
    Carbs,
    /// Fat grams
    Fat,
}

/// Direction of a threshold test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Ratio strictly greater than the threshold
    Above,
    /// Ratio strictly less than the threshold
    Below,
}

/// One row of the balance ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroRule {
    /// Nutrient whose ratio is tested
    pub nutrient: MacroNutrient,
    /// Threshold direction
    pub comparison: Comparison,
    /// Ratio threshold
    pub threshold: f64,
    /// Factor applied to every quantity when the rule matches
    pub factor: f64,
}

impl MacroRule {
    const fn new(
        nutrient: MacroNutrient,
        comparison: Comparison,
        threshold: f64,
        factor: f64,
    ) -> Self {
        Self {
            nutrient,
            comparison,
            threshold,
            factor,
        }
    }

    /// Whether this rule's predicate holds for `ratios`
    #[must_use]
    pub fn matches(&self, ratios: &MacroRatios) -> bool {
        let ratio = ratios.get(self.nutrient);
        match self.comparison {
            Comparison::Above => ratio > self.threshold,
            Comparison::Below => ratio < self.threshold,
        }
    }
}

/// The balance ladder, evaluated top to bottom
pub const MACRO_BALANCE_RULES: [MacroRule; 14] = [
    MacroRule::new(Protein, Above, 1.2, 0.75),
    MacroRule::new(Protein, Above, 1.15, 0.82),
    MacroRule::new(Protein, Above, 1.1, 0.88),
    MacroRule::new(Fat, Above, 1.3, 0.80),
    MacroRule::new(Fat, Above, 1.25, 0.75),
    MacroRule::new(Fat, Above, 1.2, 0.88),
    MacroRule::new(Carbs, Below, 0.75, 1.40),
    MacroRule::new(Carbs, Below, 0.8, 1.30),
    MacroRule::new(Carbs, Below, 0.85, 1.20),
    MacroRule::new(Carbs, Below, 0.9, 1.15),
    MacroRule::new(Carbs, Below, 0.95, 1.08),
    MacroRule::new(Fat, Below, 0.65, 1.25),
    MacroRule::new(Fat, Below, 0.7, 1.20),
    MacroRule::new(Fat, Below, 0.85, 1.12),
];

/// Actual-to-target ratios for the three macronutrients
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroRatios {
    /// Protein actual / target
    pub protein: f64,
    /// Carbohydrate actual / target
    pub carbs: f64,
    /// Fat actual / target
    pub fat: f64,
}

impl MacroRatios {
    /// Compute ratios; a zero (or negative) target yields a neutral ratio of 1
    #[must_use]
    pub fn from_totals(actual: NutritionValues, target: NutritionValues) -> Self {
        let ratio = |a: f64, t: f64| if t > 0.0 { a / t } else { 1.0 };
        Self {
            protein: ratio(actual.protein_g, target.protein_g),
            carbs: ratio(actual.carbs_g, target.carbs_g),
            fat: ratio(actual.fat_g, target.fat_g),
        }
    }

    /// Ratio for one nutrient
    #[must_use]
    pub const fn get(&self, nutrient: MacroNutrient) -> f64 {
        match nutrient {
            MacroNutrient::Protein => self.protein,
            MacroNutrient::Carbs => self.carbs,
            MacroNutrient::Fat => self.fat,
        }
    }

    /// Largest ratio
    #[must_use]
    pub fn max(&self) -> f64 {
        self.protein.max(self.carbs).max(self.fat)
    }

    /// Smallest ratio
    #[must_use]
    pub fn min(&self) -> f64 {
        self.protein.min(self.carbs).min(self.fat)
    }

    /// Whether any ratio lies outside the trigger window
    #[must_use]
    pub fn needs_balancing(&self) -> bool {
        self.max() > MACRO_RATIO_UPPER_TRIGGER || self.min() < MACRO_RATIO_LOWER_TRIGGER
    }
}

/// First matching rule, with its 1-based position in the ladder
#[must_use]
pub fn select_macro_rule(ratios: &MacroRatios) -> Option<(usize, &'static MacroRule)> {
    MACRO_BALANCE_RULES
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(ratios))
        .map(|(i, rule)| (i + 1, rule))
}
