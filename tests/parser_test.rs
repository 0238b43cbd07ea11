// ABOUTME: Integration tests for the candidate plan parser
// ABOUTME: Validates fence stripping, payload extraction, array wrapping and lenient field handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealplan_engine::errors::{AppError, ErrorCode, PlanGenerationError};
use mealplan_engine::planning::{extract_json_payload, parse_candidate_plan, strip_code_fences};

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_fenced_payload_with_prose() {
    let raw = "Here is your plan:\n```json\n{\"meals\":[{\"mealType\":\"Breakfast\",\"foods\":[]}]}\n```\nEnjoy!";

    let cleaned = strip_code_fences(raw);
    let payload = extract_json_payload(&cleaned).unwrap();

    assert_eq!(
        payload,
        "{\"meals\":[{\"mealType\":\"Breakfast\",\"foods\":[]}]}"
    );
}

#[test]
fn test_stray_backticks_removed() {
    assert_eq!(strip_code_fences("`{}` and ```"), "{} and ");
}

#[test]
fn test_first_region_wins() {
    let raw = r#"{"meals":[{"mealType":"Lunch","foods":[]}]} and later {"meals":[]}"#;

    let plan = parse_candidate_plan(raw).unwrap();

    assert_eq!(plan.meals.len(), 1);
    assert_eq!(plan.meals[0].meal_type, "Lunch");
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_bare_array_wrapped_as_meals() {
    let plan = parse_candidate_plan(r#"[{"mealType":"Breakfast","foods":[]}]"#).unwrap();

    assert_eq!(plan.meals.len(), 1);
    assert_eq!(plan.meals[0].meal_type, "Breakfast");
    assert!(plan.meals[0].foods.is_empty());
}

#[test]
fn test_full_shape_parsed() {
    let raw = r#"
    {
      "meals": [
        {
          "mealType": "Breakfast",
          "mealName": "Oats and banana",
          "foods": [
            { "foodId": "oats", "foodName": "Rolled oats", "quantity": 0.8 },
            { "foodId": "banana", "foodName": "Banana", "quantity": 1.2 }
          ]
        },
        {
          "mealType": "Dinner",
          "foods": [{ "foodName": "Atlantic salmon" }]
        }
      ]
    }"#;

    let plan = parse_candidate_plan(raw).unwrap();

    assert_eq!(plan.meals.len(), 2);
    let breakfast = &plan.meals[0];
    assert_eq!(breakfast.meal_name.as_deref(), Some("Oats and banana"));
    assert_eq!(breakfast.foods.len(), 2);
    assert_eq!(breakfast.foods[1].food_id.as_deref(), Some("banana"));
    assert_eq!(breakfast.foods[1].quantity, Some(1.2));

    let dinner_food = &plan.meals[1].foods[0];
    assert_eq!(dinner_food.food_id, None);
    assert_eq!(dinner_food.food_name.as_deref(), Some("Atlantic salmon"));
    assert_eq!(dinner_food.quantity, None);
}

#[test]
fn test_keys_case_insensitive() {
    let raw = r#"{"MEALS":[{"Meal_Type":"lunch","MealName":"Bowl","FOODS":[{"FOOD_ID":"brown-rice","food-name":"Rice","Quantity":1}]}]}"#;

    let plan = parse_candidate_plan(raw).unwrap();

    let meal = &plan.meals[0];
    assert_eq!(meal.meal_type, "lunch");
    assert_eq!(meal.meal_name.as_deref(), Some("Bowl"));
    assert_eq!(meal.foods[0].food_id.as_deref(), Some("brown-rice"));
    assert_eq!(meal.foods[0].food_name.as_deref(), Some("Rice"));
    assert_eq!(meal.foods[0].quantity, Some(1.0));
}

#[test]
fn test_numeric_strings_accepted() {
    let raw = r#"{"meals":[{"mealType":"Dinner","foods":[{"foodId":42,"quantity":"1.5"},{"foodId":"", "foodName":"Banana","quantity":null}]}]}"#;

    let plan = parse_candidate_plan(raw).unwrap();

    let foods = &plan.meals[0].foods;
    assert_eq!(foods[0].food_id.as_deref(), Some("42"));
    assert_eq!(foods[0].quantity, Some(1.5));
    assert_eq!(foods[1].food_id, None);
    assert_eq!(foods[1].quantity, None);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_no_payload() {
    assert_eq!(
        parse_candidate_plan("Sorry, I cannot help with that."),
        Err(PlanGenerationError::NoPayloadFound)
    );
    assert_eq!(
        parse_candidate_plan("```json\n```"),
        Err(PlanGenerationError::NoPayloadFound)
    );
}

#[test]
fn test_malformed_payloads() {
    let cases = [
        r#"{"meals": []}"#,
        r#"{"plan": "rest day"}"#,
        r#"{"meals": 5}"#,
        r#"{meals: [1]}"#,
        r#"{"meals": [{"mealType": "Lunch", "foods": [{"quantity": "lots"}]}]}"#,
        "[]",
    ];

    for raw in cases {
        let err = parse_candidate_plan(raw).unwrap_err();
        assert!(
            matches!(err, PlanGenerationError::MalformedPayload { .. }),
            "{raw} gave {err:?}"
        );
        assert_eq!(err.kind(), "malformed_payload");
    }
}

#[test]
fn test_failures_surface_as_retryable_plan_generation_error() {
    for err in [
        PlanGenerationError::NoPayloadFound,
        PlanGenerationError::malformed("plan contains no meals"),
    ] {
        let app_error = AppError::from(err);
        assert_eq!(app_error.code, ErrorCode::PlanGenerationFailed);
        assert!(app_error.is_retryable());
    }
}
