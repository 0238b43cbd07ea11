// ABOUTME: Error types for turning producer output into a candidate meal plan
// ABOUTME: Distinguishes "no JSON found" from "JSON found but shape invalid"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Failure to extract a usable candidate plan from producer output.
///
/// Both variants surface to callers as `ErrorCode::PlanGenerationFailed`,
/// which is retryable: the caller is expected to re-prompt the producer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanGenerationError {
    /// The text contained no balanced `{...}` or `[...]` region
    #[error("no JSON payload found in producer output")]
    NoPayloadFound,
    /// A bracketed region was found but did not describe any meals
    #[error("malformed plan payload: {reason}")]
    MalformedPayload {
        /// What was wrong with the payload
        reason: String,
    },
}

impl PlanGenerationError {
    /// Create a "malformed payload" error
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// Stable snake_case identifier for logs and error details
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoPayloadFound => "no_payload_found",
            Self::MalformedPayload { .. } => "malformed_payload",
        }
    }
}
