// ABOUTME: Builds the system and user messages sent to the text producer for plan generation
// ABOUTME: Embeds a bounded catalog subset, calorie and macro targets, and the exact meal slots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;
use serde_json::json;

use crate::llm::prompts::get_meal_planner_system_prompt;
use crate::llm::ChatMessage;
use crate::models::{FoodCatalogEntry, NutritionTargets};

/// Rendered prompt for one plan generation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealPlanPrompt {
    /// Planner instructions and JSON shape
    pub system: String,
    /// Targets, slots and catalog for this request
    pub user: String,
}

impl MealPlanPrompt {
    /// Convert into chat messages (system first)
    #[must_use]
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.system), ChatMessage::user(self.user)]
    }
}

/// First `limit` catalog entries ordered by id
fn catalog_subset(catalog: &[FoodCatalogEntry], limit: usize) -> Vec<&FoodCatalogEntry> {
    let mut entries: Vec<&FoodCatalogEntry> = catalog.iter().collect();
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    entries.truncate(limit);
    entries
}

/// Render the prompt for a set of targets.
///
/// The catalog is sent as compact JSON lines, one food per line, with
/// per-100 g values.
#[must_use]
pub fn build_meal_plan_prompt(
    targets: &NutritionTargets,
    catalog: &[FoodCatalogEntry],
    catalog_limit: usize,
) -> MealPlanPrompt {
    let slots: Vec<&str> = targets
        .meal_slots
        .iter()
        .map(|slot| slot.display_name())
        .collect();

    let foods: Vec<String> = catalog_subset(catalog, catalog_limit)
        .into_iter()
        .map(|food| {
            json!({
                "foodId": food.id,
                "foodName": food.name,
                "calories": food.calories,
                "protein": food.protein_g,
                "carbs": food.carbs_g,
                "fat": food.fat_g,
            })
            .to_string()
        })
        .collect();

    let daily = targets.daily;
    let per_meal = targets.per_meal;

    let user = format!(
        "Daily targets: {calories:.0} kcal, {protein:.1} g protein, {carbs:.1} g carbohydrates, {fat:.1} g fat.\n\
         Per meal: about {meal_calories:.0} kcal.\n\
         Meals: exactly {count}, in this order: {slots}.\n\
         \n\
         Food catalog (values per 100 g, {shown} foods):\n\
         {foods}\n\
         \n\
         Return the plan as JSON with a \"meals\" array. Each meal has \"mealType\", \"mealName\" and \"foods\"; \
         each food has \"foodId\", \"foodName\" and \"quantity\".",
        calories = daily.calories,
        protein = daily.protein_g,
        carbs = daily.carbs_g,
        fat = daily.fat_g,
        meal_calories = per_meal.calories,
        count = targets.meal_count,
        slots = slots.join(", "),
        shown = foods.len(),
        foods = foods.join("\n"),
    );

    MealPlanPrompt {
        system: get_meal_planner_system_prompt().to_owned(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutritionValues;
    use crate::planning::calculate_targets;

    fn food(id: &str) -> FoodCatalogEntry {
        FoodCatalogEntry::new(id, format!("Food {id}"), NutritionValues::new(100.0, 1.0, 2.0, 3.0))
    }

    #[test]
    fn test_catalog_limited_by_id_order() {
        let catalog = vec![food("c"), food("a"), food("b")];
        let prompt = build_meal_plan_prompt(&calculate_targets(1800.0), &catalog, 2);

        assert!(prompt.user.contains("\"foodId\":\"a\""));
        assert!(prompt.user.contains("\"foodId\":\"b\""));
        assert!(!prompt.user.contains("\"foodId\":\"c\""));
    }

    #[test]
    fn test_slots_and_targets_rendered() {
        let prompt = build_meal_plan_prompt(&calculate_targets(2600.0), &[], 10);

        assert!(prompt.user.contains("2600 kcal"));
        assert!(prompt
            .user
            .contains("exactly 4, in this order: Breakfast, Lunch, Afternoon Snack, Dinner"));
        assert_eq!(prompt.into_messages().len(), 2);
    }
}
