// ABOUTME: Candidate plan parser that extracts a JSON meal plan from free-form producer text
// ABOUTME: Strips code fences, finds the first balanced bracket region, and deserializes leniently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Candidate Plan Parser
//!
//! Producer output is untrusted. Parsing happens in two explicit steps:
//!
//! 1. **Extract**: strip code fences, then find the first balanced `{...}` or
//!    `[...]` region. No region means [`PlanGenerationError::NoPayloadFound`].
//! 2. **Validate**: deserialize the region with case-insensitive keys and
//!    numeric strings accepted. Invalid JSON, a wrong shape, or zero meals
//!    means [`PlanGenerationError::MalformedPayload`].

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::errors::PlanGenerationError;
use crate::models::{CandidatePlan, ProposedFoodItem, ProposedMeal};

/// Opening code fence with an optional language tag
static CODE_FENCE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").ok());

/// Remove code-fence markers and stray backticks
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    let without_fences = CODE_FENCE_PATTERN.as_ref().map_or_else(
        || raw.to_owned(),
        |re| re.replace_all(raw, "").into_owned(),
    );
    without_fences.replace('`', "")
}

/// Find the first balanced `{...}` or `[...]` region.
///
/// Single left-to-right pass tracking bracket depth. Brackets inside JSON
/// string literals are ignored. An opening bracket that never balances is
/// skipped; a closer of the wrong kind abandons every open bracket and depth
/// tracking restarts after it. Of all regions that close, the one starting
/// first wins.
///
/// # Errors
///
/// Returns `NoPayloadFound` if no balanced region exists
pub fn extract_json_payload(text: &str) -> Result<&str, PlanGenerationError> {
    let mut open: Vec<(usize, char)> = Vec::new();
    let mut best: Option<(usize, usize)> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push((i, '}')),
            '[' => open.push((i, ']')),
            '}' | ']' => match open.pop() {
                Some((start, closer)) if closer == c => {
                    if best.map_or(true, |(best_start, _)| start < best_start) {
                        best = Some((start, i + c.len_utf8()));
                    }
                    if open.is_empty() {
                        break;
                    }
                }
                _ => open.clear(),
            },
            _ => {}
        }
    }

    best.map(|(start, end)| &text[start..end])
        .ok_or(PlanGenerationError::NoPayloadFound)
}

/// Parse producer output into a candidate plan
///
/// # Errors
///
/// Returns `NoPayloadFound` when no bracketed region exists, and
/// `MalformedPayload` when the region is not a plan with at least one meal
pub fn parse_candidate_plan(raw: &str) -> Result<CandidatePlan, PlanGenerationError> {
    let cleaned = strip_code_fences(raw);
    let payload = extract_json_payload(&cleaned)?;

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| PlanGenerationError::malformed(format!("invalid JSON: {e}")))?;

    let value = match value {
        Value::Array(meals) => {
            let mut wrapped = Map::new();
            wrapped.insert("meals".to_owned(), Value::Array(meals));
            Value::Object(wrapped)
        }
        other => other,
    };

    let raw_plan: RawPlan = serde_json::from_value(normalize_keys(value))
        .map_err(|e| PlanGenerationError::malformed(format!("unexpected plan shape: {e}")))?;

    if raw_plan.meals.is_empty() {
        return Err(PlanGenerationError::malformed("plan contains no meals"));
    }

    Ok(raw_plan.into())
}

/// Lowercase object keys and drop `_`, `-` and spaces, recursively
fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (normalize_key(&k), normalize_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Lenient wire shape (keys already normalized)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    meals: Vec<RawMeal>,
}

#[derive(Debug, Deserialize)]
struct RawMeal {
    #[serde(default, deserialize_with = "lenient_string")]
    mealtype: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    mealname: Option<String>,
    #[serde(default)]
    foods: Vec<RawFood>,
}

#[derive(Debug, Deserialize)]
struct RawFood {
    #[serde(default, deserialize_with = "lenient_string")]
    foodid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    foodname: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    quantity: Option<f64>,
}

impl From<RawPlan> for CandidatePlan {
    fn from(raw: RawPlan) -> Self {
        Self {
            meals: raw
                .meals
                .into_iter()
                .map(|meal| ProposedMeal {
                    meal_type: meal.mealtype.unwrap_or_default(),
                    meal_name: meal.mealname,
                    foods: meal
                        .foods
                        .into_iter()
                        .map(|food| ProposedFoodItem {
                            food_id: food.foodid,
                            food_name: food.foodname,
                            quantity: food.quantity,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Accept strings and numbers; empty strings and null become `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_owned()))
        }
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, got {other}"
        ))),
    }
}

/// Accept numbers and numeric strings; null becomes `None`
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got \"{s}\""))),
        other => Err(serde::de::Error::custom(format!(
            "expected a number, got {other}"
        ))),
    }
}
