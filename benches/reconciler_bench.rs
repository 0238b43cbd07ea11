// ABOUTME: Criterion benchmarks for the planning pipeline
// ABOUTME: Measures reconciliation alone and parse-resolve-reconcile across meal counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the planning pipeline.
//!
//! Plans are built for the three meal-count tiers so the cost of each pass
//! can be compared as the number of meals grows.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mealplan_engine::catalog::InMemoryFoodCatalog;
use mealplan_engine::models::{
    FoodCatalogEntry, FoodResolution, Meal, MealPlan, NutritionValues, ResolvedFoodItem,
};
use mealplan_engine::planning::{calculate_targets, parse_candidate_plan, reconcile, resolve_plan};
use serde_json::json;
use tokio::runtime::Runtime;

const CALORIE_TIERS: [f64; 3] = [1800.0, 2600.0, 3200.0];

fn bench_foods() -> Vec<FoodCatalogEntry> {
    (0_u32..120)
        .map(|i| {
            let offset = f64::from(i);
            FoodCatalogEntry::new(
                format!("food-{i:03}"),
                format!("Bench food {i}"),
                NutritionValues::new(
                    80.0 + offset * 3.0,
                    2.0 + offset % 30.0,
                    5.0 + offset % 60.0,
                    1.0 + offset % 20.0,
                ),
            )
        })
        .collect()
}

/// Plan with every meal well above its target so all passes apply
fn overshooting_plan(daily_calories: f64) -> MealPlan {
    let targets = calculate_targets(daily_calories);
    let meals = targets
        .meal_slots
        .iter()
        .map(|&slot| {
            let items = (0..4)
                .map(|n| {
                    ResolvedFoodItem::new(
                        format!("food-{n}"),
                        format!("Bench food {n}"),
                        FoodResolution::ById,
                        NutritionValues::new(250.0, 30.0, 10.0, 12.0),
                        Some(1.5),
                    )
                })
                .collect();
            Meal::new(slot, slot.display_name(), targets.per_meal.calories, items)
        })
        .collect();
    MealPlan::new(meals, targets.daily)
}

fn producer_output(daily_calories: f64) -> String {
    let targets = calculate_targets(daily_calories);
    let meals: Vec<_> = targets
        .meal_slots
        .iter()
        .enumerate()
        .map(|(m, slot)| {
            json!({
                "mealType": slot.display_name(),
                "mealName": format!("Bench meal {m}"),
                "foods": (0..4)
                    .map(|n| json!({ "foodId": format!("food-{:03}", m * 10 + n), "quantity": 1.5 }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    format!(
        "Here is the plan:\n```json\n{}\n```",
        json!({ "meals": meals })
    )
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for calories in CALORIE_TIERS {
        let plan = overshooting_plan(calories);
        group.bench_with_input(
            BenchmarkId::from_parameter(calories),
            &plan,
            |b, plan| {
                b.iter(|| {
                    let mut plan = plan.clone();
                    black_box(reconcile(&mut plan).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let catalog = InMemoryFoodCatalog::new(bench_foods());
    let mut group = c.benchmark_group("parse_resolve_reconcile");

    for calories in CALORIE_TIERS {
        let raw = producer_output(calories);
        let targets = calculate_targets(calories);
        group.bench_with_input(BenchmarkId::from_parameter(calories), &raw, |b, raw| {
            b.to_async(&rt).iter(|| async {
                let candidate = parse_candidate_plan(raw).unwrap();
                let mut plan = resolve_plan(&catalog, candidate, &targets).await.unwrap();
                black_box(reconcile(&mut plan).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile, bench_pipeline);
criterion_main!(benches);
