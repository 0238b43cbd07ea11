// ABOUTME: Binds proposed foods to catalog entries and proposed meals to meal slots
// ABOUTME: Resolution falls back id -> exact name -> partial name -> unresolved with zero nutrition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::{debug, warn};

use crate::catalog::FoodCatalog;
use crate::errors::AppResult;
use crate::logging::PlanLogger;
use crate::models::{
    CandidatePlan, FoodCatalogEntry, FoodResolution, Meal, MealPlan, MealType, NutritionTargets,
    NutritionValues, ProposedFoodItem, ProposedMeal, ResolvedFoodItem,
};

/// Match a name against the catalog: exact (case-insensitive) first, then partial.
///
/// A partial match is a catalog name containing the proposed name, or the
/// proposed name containing a catalog name. The first entry in catalog order wins.
#[must_use]
pub fn match_by_name<'a>(
    catalog: &'a [FoodCatalogEntry],
    name: &str,
) -> Option<(&'a FoodCatalogEntry, FoodResolution)> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(entry) = catalog
        .iter()
        .find(|e| e.name.trim().to_lowercase() == needle)
    {
        return Some((entry, FoodResolution::ByExactName));
    }

    catalog
        .iter()
        .find(|e| {
            let candidate = e.name.trim().to_lowercase();
            !candidate.is_empty() && (candidate.contains(&needle) || needle.contains(&candidate))
        })
        .map(|entry| (entry, FoodResolution::ByPartialName))
}

/// Resolve one proposed food.
///
/// `all_foods` is the catalog snapshot used for name matching. Unresolved
/// foods keep their original identifier and carry zero nutrition.
///
/// # Errors
///
/// Returns an error only if the catalog lookup itself fails
pub async fn resolve_food(
    catalog: &dyn FoodCatalog,
    all_foods: &[FoodCatalogEntry],
    proposed: &ProposedFoodItem,
) -> AppResult<ResolvedFoodItem> {
    if let Some(id) = proposed.food_id.as_deref() {
        if let Some(entry) = catalog.get_by_id(id).await? {
            return Ok(bind(&entry, FoodResolution::ById, proposed.quantity));
        }
    }

    if let Some((entry, resolution)) = proposed
        .food_name
        .as_deref()
        .and_then(|name| match_by_name(all_foods, name))
    {
        debug!(
            food.name = proposed.food_name.as_deref().unwrap_or(""),
            food.id = %entry.id,
            resolution = ?resolution,
            "Resolved food by name"
        );
        return Ok(bind(entry, resolution, proposed.quantity));
    }

    PlanLogger::log_unresolved_food(proposed.food_id.as_deref(), proposed.food_name.as_deref());
    let original_id = proposed
        .food_id
        .clone()
        .or_else(|| proposed.food_name.clone())
        .unwrap_or_default();
    let name = proposed
        .food_name
        .clone()
        .unwrap_or_else(|| original_id.clone());

    Ok(ResolvedFoodItem::new(
        original_id,
        name,
        FoodResolution::Unresolved,
        NutritionValues::zero(),
        proposed.quantity,
    ))
}

fn bind(
    entry: &FoodCatalogEntry,
    resolution: FoodResolution,
    quantity: Option<f64>,
) -> ResolvedFoodItem {
    ResolvedFoodItem::new(
        entry.id.clone(),
        entry.name.clone(),
        resolution,
        entry.per_100g(),
        quantity,
    )
}

/// Assign proposed meals to the ordered slot list.
///
/// Meals whose label parses to a slot's type take that slot first; the rest
/// fill the remaining slots in order. Surplus meals are dropped; slots left
/// over get `None`.
#[must_use]
pub fn assign_meal_slots(
    candidates: Vec<ProposedMeal>,
    slots: &[MealType],
) -> Vec<(MealType, Option<ProposedMeal>)> {
    let mut pending: Vec<Option<ProposedMeal>> = candidates.into_iter().map(Some).collect();
    let mut assigned: Vec<Option<ProposedMeal>> = slots.iter().map(|_| None).collect();

    for (slot, target) in slots.iter().zip(assigned.iter_mut()) {
        let matching = pending.iter_mut().find(|candidate| {
            candidate
                .as_ref()
                .and_then(|meal| MealType::from_str_lossy(&meal.meal_type))
                == Some(*slot)
        });
        if let Some(candidate) = matching {
            *target = candidate.take();
        }
    }

    let mut leftovers = pending.into_iter().flatten();
    for target in assigned.iter_mut().filter(|t| t.is_none()) {
        *target = leftovers.next();
    }

    let dropped: Vec<String> = leftovers.map(|meal| meal.meal_type).collect();
    if !dropped.is_empty() {
        warn!(
            dropped = dropped.len(),
            meal_types = ?dropped,
            slots = slots.len(),
            "Producer proposed more meals than slots, dropping surplus"
        );
    }

    slots.iter().copied().zip(assigned).collect()
}

/// Build a meal plan from a candidate: assign slots, resolve every food, attach targets
///
/// # Errors
///
/// Returns an error if a catalog lookup fails
pub async fn resolve_plan(
    catalog: &dyn FoodCatalog,
    candidate: CandidatePlan,
    targets: &NutritionTargets,
) -> AppResult<MealPlan> {
    let all_foods = catalog.get_all().await?;
    let mut meals = Vec::with_capacity(targets.meal_slots.len());

    for (slot, proposed) in assign_meal_slots(candidate.meals, &targets.meal_slots) {
        let Some(proposed) = proposed else {
            warn!(meal_type = %slot, "No proposed meal for slot, adding an empty meal");
            meals.push(Meal::new(
                slot,
                slot.display_name(),
                targets.per_meal.calories,
                Vec::new(),
            ));
            continue;
        };

        let mut items = Vec::with_capacity(proposed.foods.len());
        for food in &proposed.foods {
            items.push(resolve_food(catalog, &all_foods, food).await?);
        }

        let name = proposed
            .meal_name
            .unwrap_or_else(|| slot.display_name().to_owned());
        meals.push(Meal::new(slot, name, targets.per_meal.calories, items));
    }

    Ok(MealPlan::new(meals, targets.daily))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(label: &str) -> ProposedMeal {
        ProposedMeal {
            meal_type: label.to_owned(),
            meal_name: None,
            foods: Vec::new(),
        }
    }

    #[test]
    fn test_slots_matched_by_type_before_order() {
        let slots = MealType::slots_for(3);
        let assigned = assign_meal_slots(
            vec![meal("dinner"), meal("Breakfast"), meal("brunch")],
            slots,
        );

        let labels: Vec<&str> = assigned
            .iter()
            .map(|(_, m)| m.as_ref().map_or("", |m| m.meal_type.as_str()))
            .collect();
        assert_eq!(labels, vec!["Breakfast", "brunch", "dinner"]);
    }

    #[test]
    fn test_missing_and_surplus_meals() {
        let slots = MealType::slots_for(3);
        let short = assign_meal_slots(vec![meal("lunch")], slots);
        assert!(short[0].1.is_none());
        assert!(short[1].1.is_some());
        assert!(short[2].1.is_none());

        let long = assign_meal_slots(
            vec![
                meal("breakfast"),
                meal("lunch"),
                meal("dinner"),
                meal("snack"),
            ],
            slots,
        );
        assert_eq!(long.len(), 3);
        assert!(long.iter().all(|(_, m)| m.is_some()));
    }

    #[test]
    fn test_partial_name_both_directions() {
        let catalog = vec![
            FoodCatalogEntry::new("c1", "Chicken breast, grilled", NutritionValues::zero()),
            FoodCatalogEntry::new("r1", "Rice", NutritionValues::zero()),
        ];

        let (entry, how) = match_by_name(&catalog, "chicken breast").unwrap();
        assert_eq!(entry.id, "c1");
        assert_eq!(how, FoodResolution::ByPartialName);

        let (entry, _) = match_by_name(&catalog, "Steamed brown rice").unwrap();
        assert_eq!(entry.id, "r1");

        let (_, how) = match_by_name(&catalog, "RICE").unwrap();
        assert_eq!(how, FoodResolution::ByExactName);

        assert!(match_by_name(&catalog, "   ").is_none());
    }
}
