// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Tolerance bands, quantity limits, macro split, and meal-count tiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by the stage of the pipeline that reads them.

/// Serving quantity limits, expressed as multiples of 100 g
pub mod quantity {
    /// Smallest quantity a reconciled item may carry
    pub const MIN: f64 = 0.3;
    /// Largest quantity a reconciled item may carry
    pub const MAX: f64 = 3.0;
    /// Quantities are kept on this grid
    pub const STEP: f64 = 0.1;
    /// Used when the producer omits a quantity or sends a non-finite one
    pub const DEFAULT: f64 = 1.0;
}

/// Energy density of macronutrients
pub mod units {
    /// Kilocalories per gram of protein
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Kilocalories per gram of carbohydrate
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Kilocalories per gram of fat
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
}

/// Daily target derivation
pub mod targets {
    /// Share of daily calories from protein
    pub const PROTEIN_CALORIE_SHARE: f64 = 0.20;
    /// Share of daily calories from carbohydrates
    pub const CARBS_CALORIE_SHARE: f64 = 0.55;
    /// Share of daily calories from fat
    pub const FAT_CALORIE_SHARE: f64 = 0.275;

    /// Calorie goal at or above which five meals are planned
    pub const FIVE_MEAL_THRESHOLD: f64 = 3000.0;
    /// Calorie goal at or above which four meals are planned
    pub const FOUR_MEAL_HIGH_THRESHOLD: f64 = 2500.0;
    /// Calorie goal at or above which four meals are planned (lower tier)
    pub const FOUR_MEAL_THRESHOLD: f64 = 2000.0;
    /// Meal count below every tier
    pub const DEFAULT_MEAL_COUNT: usize = 3;
}

/// Reconciliation tolerance bands
pub mod reconciliation {
    /// Per-meal band: actual calories may deviate this fraction from target
    pub const MEAL_BAND_TOLERANCE: f64 = 0.10;
    /// Macro balance pass triggers when any ratio exceeds this
    pub const MACRO_RATIO_UPPER_TRIGGER: f64 = 1.3;
    /// Macro balance pass triggers when any ratio falls below this
    pub const MACRO_RATIO_LOWER_TRIGGER: f64 = 0.8;
    /// Daily floor sits this many kcal below the daily target
    pub const DAILY_FLOOR_OFFSET_KCAL: f64 = 100.0;
}

/// Prompt construction defaults
pub mod prompt {
    /// Catalog entries embedded into the producer prompt
    pub const DEFAULT_CATALOG_LIMIT: usize = 200;
}
