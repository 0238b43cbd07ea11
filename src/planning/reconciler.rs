// ABOUTME: Nutrition reconciler applying the per-meal, macro-balance, and daily-bound passes
// ABOUTME: Scales item quantities in place and reports each pass plus any residual deviations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Reconciler
//!
//! Four sequential passes over a [`MealPlan`]:
//!
//! 1. **Meal band**: each meal outside ±10% of its calorie target is scaled
//!    by `target / actual`.
//! 2. **Macro balance**: if any day-level macro ratio leaves `[0.8, 1.3]`,
//!    the first matching rule in [`MACRO_BALANCE_RULES`](super::rules::MACRO_BALANCE_RULES)
//!    scales every item.
//! 3. **Daily ceiling**: a day above target is scaled down to the target.
//! 4. **Daily floor**: otherwise, a day more than 100 kcal below target is
//!    scaled up to `target - 100`.
//!
//! Every scaling rounds quantities to 0.1 and clamps them to `[0.3, 3.0]`,
//! so a plan may end outside its bands. The report says so.

use serde::Serialize;
use tracing::{debug, info};

use mealplan_core::constants::reconciliation::{DAILY_FLOOR_OFFSET_KCAL, MEAL_BAND_TOLERANCE};

use super::rules::{select_macro_rule, MacroRatios};
use crate::errors::{AppError, AppResult};
use crate::logging::PlanLogger;
use crate::models::{MealPlan, MealType};

/// Identifies a reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationPass {
    /// Per-meal calorie band correction
    MealBand,
    /// Whole-day macro balance
    MacroBalance,
    /// Day was above its calorie target
    DailyCeiling,
    /// Day was more than the floor offset below its target
    DailyFloor,
    /// Day checked and already within bounds
    DailyBounds,
}

impl ReconciliationPass {
    /// Stable identifier for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MealBand => "meal_band",
            Self::MacroBalance => "macro_balance",
            Self::DailyCeiling => "daily_ceiling",
            Self::DailyFloor => "daily_floor",
            Self::DailyBounds => "daily_bounds",
        }
    }
}

/// What one pass (or one meal within the meal-band pass) did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassOutcome {
    /// Which pass ran
    pub pass: ReconciliationPass,
    /// Whether quantities were scaled
    pub applied: bool,
    /// Scale factor applied (1.0 when not applied)
    pub scale: f64,
    /// 1-based macro rule position, for the macro-balance pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<usize>,
    /// Meal the outcome refers to, for the meal-band pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
}

impl PassOutcome {
    fn skipped(pass: ReconciliationPass) -> Self {
        Self {
            pass,
            applied: false,
            scale: 1.0,
            rule: None,
            meal_type: None,
        }
    }

    fn scaled(pass: ReconciliationPass, scale: f64) -> Self {
        Self {
            pass,
            applied: true,
            scale,
            rule: None,
            meal_type: None,
        }
    }

    fn log(&self) {
        PlanLogger::log_pass(self.pass.as_str(), self.applied, self.scale, self.rule);
    }
}

/// A constraint the final plan still violates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Deviation {
    /// A meal outside its ±10% calorie band
    MealOutOfBand {
        /// Meal slot
        meal_type: MealType,
        /// Meal calorie target
        target_calories: f64,
        /// Meal calories after reconciliation
        actual_calories: f64,
    },
    /// The day above its calorie target
    DailyAboveCeiling {
        /// Daily calorie target
        target_calories: f64,
        /// Daily calories after reconciliation
        actual_calories: f64,
    },
    /// The day more than the floor offset below its target
    DailyBelowFloor {
        /// Lowest acceptable daily calories
        floor_calories: f64,
        /// Daily calories after reconciliation
        actual_calories: f64,
    },
}

/// Final state of a reconciled plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReconciliationStatus {
    /// Every meal and the day are within their bands
    Reconciled,
    /// Clamping (or empty meals) left some constraints unmet
    Partial {
        /// Remaining violations
        deviations: Vec<Deviation>,
    },
}

impl ReconciliationStatus {
    /// Whether every band is satisfied
    #[must_use]
    pub const fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled)
    }
}

/// Result of a full reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationReport {
    /// Outcomes in execution order
    pub passes: Vec<PassOutcome>,
    /// Final status
    pub status: ReconciliationStatus,
}

fn meal_band(target: f64) -> (f64, f64) {
    (
        target * (1.0 - MEAL_BAND_TOLERANCE),
        target * (1.0 + MEAL_BAND_TOLERANCE),
    )
}

/// Pass A: scale each meal outside its calorie band back to target.
///
/// Meals with zero calories or a zero target are left alone.
pub fn apply_meal_band_pass(plan: &mut MealPlan) -> Vec<PassOutcome> {
    let targets: Vec<(MealType, f64, f64)> = plan
        .meals()
        .iter()
        .map(|m| (m.meal_type(), m.target_calories(), m.actual_calories()))
        .collect();

    targets
        .into_iter()
        .enumerate()
        .map(|(index, (meal_type, target, actual))| {
            let (low, high) = meal_band(target);
            let mut outcome = if actual <= 0.0 || target <= 0.0 || (low..=high).contains(&actual)
            {
                PassOutcome::skipped(ReconciliationPass::MealBand)
            } else {
                let scale = target / actual;
                plan.scale_meal(index, scale);
                debug!(
                    meal_type = %meal_type,
                    target,
                    before = actual,
                    after = plan.meals().get(index).map_or(0.0, |m| m.actual_calories()),
                    scale,
                    "Meal scaled into band"
                );
                PassOutcome::scaled(ReconciliationPass::MealBand, scale)
            };
            outcome.meal_type = Some(meal_type);
            outcome
        })
        .collect()
}

/// Pass B: apply one global factor from the macro rule ladder when ratios are off.
///
/// A plan whose ratios are all within the trigger window is left unchanged.
pub fn apply_macro_balance_pass(plan: &mut MealPlan) -> PassOutcome {
    let ratios = MacroRatios::from_totals(plan.actual_daily(), plan.daily_target());
    if !ratios.needs_balancing() {
        return PassOutcome::skipped(ReconciliationPass::MacroBalance);
    }

    let Some((position, rule)) = select_macro_rule(&ratios) else {
        debug!(?ratios, "Macro ratios out of window but no rule matched");
        return PassOutcome::skipped(ReconciliationPass::MacroBalance);
    };

    plan.scale_all(rule.factor);
    debug!(?ratios, rule = position, factor = rule.factor, "Macro balance applied");

    PassOutcome {
        rule: Some(position),
        ..PassOutcome::scaled(ReconciliationPass::MacroBalance, rule.factor)
    }
}

/// Passes C and D: pull the day under its ceiling, or else up to its floor.
///
/// A zero-calorie day is left alone.
pub fn apply_daily_bounds_pass(plan: &mut MealPlan) -> PassOutcome {
    let actual = plan.actual_daily().calories;
    let target = plan.daily_target().calories;
    let floor = target - DAILY_FLOOR_OFFSET_KCAL;

    if actual <= 0.0 {
        return PassOutcome::skipped(ReconciliationPass::DailyBounds);
    }

    let (pass, scale) = if actual > target {
        (ReconciliationPass::DailyCeiling, target / actual)
    } else if actual < floor {
        (ReconciliationPass::DailyFloor, floor / actual)
    } else {
        return PassOutcome::skipped(ReconciliationPass::DailyBounds);
    };

    plan.scale_all(scale);
    PassOutcome::scaled(pass, scale)
}

/// Residual constraint violations of a plan
#[must_use]
pub fn find_deviations(plan: &MealPlan) -> Vec<Deviation> {
    let mut deviations: Vec<Deviation> = plan
        .meals()
        .iter()
        .filter(|meal| meal.target_calories() > 0.0)
        .filter(|meal| {
            let (low, high) = meal_band(meal.target_calories());
            !(low..=high).contains(&meal.actual_calories())
        })
        .map(|meal| Deviation::MealOutOfBand {
            meal_type: meal.meal_type(),
            target_calories: meal.target_calories(),
            actual_calories: meal.actual_calories(),
        })
        .collect();

    let actual = plan.actual_daily().calories;
    let target = plan.daily_target().calories;
    let floor = target - DAILY_FLOOR_OFFSET_KCAL;
    if actual > target {
        deviations.push(Deviation::DailyAboveCeiling {
            target_calories: target,
            actual_calories: actual,
        });
    } else if actual < floor {
        deviations.push(Deviation::DailyBelowFloor {
            floor_calories: floor,
            actual_calories: actual,
        });
    }

    deviations
}

/// Run all passes in order and report the outcome
///
/// # Errors
///
/// Returns an error if the plan has no meals
pub fn reconcile(plan: &mut MealPlan) -> AppResult<ReconciliationReport> {
    if plan.meal_count() == 0 {
        return Err(AppError::invalid_input(
            "Cannot reconcile a meal plan with zero meals",
        ));
    }

    let mut passes = apply_meal_band_pass(plan);
    passes.push(apply_macro_balance_pass(plan));
    passes.push(apply_daily_bounds_pass(plan));

    for outcome in passes.iter().filter(|o| o.applied) {
        outcome.log();
    }

    let deviations = find_deviations(plan);
    let status = if deviations.is_empty() {
        ReconciliationStatus::Reconciled
    } else {
        ReconciliationStatus::Partial { deviations }
    };

    info!(
        meals = plan.meal_count(),
        daily_target = plan.daily_target().calories,
        daily_actual = plan.actual_daily().calories,
        passes_applied = passes.iter().filter(|o| o.applied).count(),
        reconciled = status.is_reconciled(),
        "Meal plan reconciled"
    );

    Ok(ReconciliationReport { passes, status })
}
