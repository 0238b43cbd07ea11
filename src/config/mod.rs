// ABOUTME: Environment-driven configuration for the producer, database, and prompt builder
// ABOUTME: EngineConfig loads defaults, applies MEALPLAN_* overrides, and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration
//!
//! All values come from the environment; there is no configuration file.
//! Every variable is optional and falls back to the defaults below.
//!
//! | Variable | Default |
//! |---|---|
//! | `MEALPLAN_LLM_BASE_URL` | `http://localhost:11434/v1` |
//! | `MEALPLAN_LLM_MODEL` | `qwen2.5:14b-instruct` |
//! | `MEALPLAN_LLM_API_KEY` | unset |
//! | `MEALPLAN_LLM_TEMPERATURE` | `0.3` |
//! | `MEALPLAN_LLM_MAX_TOKENS` | `4096` |
//! | `MEALPLAN_LLM_TIMEOUT_SECS` | `120` |
//! | `MEALPLAN_DATABASE_URL` | `sqlite:mealplan.db?mode=rwc` |
//! | `MEALPLAN_PROMPT_CATALOG_LIMIT` | `200` |

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use mealplan_core::constants::prompt::DEFAULT_CATALOG_LIMIT;

/// Default producer endpoint (local Ollama)
pub const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434/v1";
/// Default producer model
pub const DEFAULT_LLM_MODEL: &str = "qwen2.5:14b-instruct";
/// Default meal-log database
pub const DEFAULT_DATABASE_URL: &str = "sqlite:mealplan.db?mode=rwc";

/// Top-level configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Text producer endpoint settings
    pub llm: LlmConfig,
    /// Meal-log store settings
    pub database: DatabaseConfig,
    /// Prompt construction settings
    pub prompt: PromptConfig,
}

/// Text producer endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an `OpenAI`-compatible API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Bearer token, if the endpoint needs one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_owned(),
            model: DEFAULT_LLM_MODEL.to_owned(),
            api_key: None,
            temperature: 0.3,
            max_tokens: 4096,
            timeout_secs: 120,
        }
    }
}

/// Meal-log store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
        }
    }
}

/// Prompt construction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Number of catalog entries embedded into the prompt
    pub catalog_limit: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            catalog_limit: DEFAULT_CATALOG_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("llm.base_url"));
        }
        if !self.llm.base_url.starts_with("http://") && !self.llm.base_url.starts_with("https://")
        {
            return Err(ConfigError::Parse(format!(
                "llm.base_url must be an http(s) URL, got {}",
                self.llm.base_url
            )));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::MissingField("llm.model"));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidRange(
                "llm.temperature must be between 0.0 and 2.0",
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::ValueOutOfRange("llm.max_tokens must be > 0"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::ValueOutOfRange("llm.timeout_secs must be > 0"));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField("database.url"));
        }
        if self.prompt.catalog_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "prompt.catalog_limit must be > 0",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Producer
        Self::apply_env_var("MEALPLAN_LLM_BASE_URL", &mut self.llm.base_url)?;
        Self::apply_env_var("MEALPLAN_LLM_MODEL", &mut self.llm.model)?;
        Self::apply_env_var("MEALPLAN_LLM_TEMPERATURE", &mut self.llm.temperature)?;
        Self::apply_env_var("MEALPLAN_LLM_MAX_TOKENS", &mut self.llm.max_tokens)?;
        Self::apply_env_var("MEALPLAN_LLM_TIMEOUT_SECS", &mut self.llm.timeout_secs)?;
        if let Ok(key) = env::var("MEALPLAN_LLM_API_KEY") {
            self.llm.api_key = Some(key).filter(|k| !k.is_empty());
        }

        // Storage
        Self::apply_env_var("MEALPLAN_DATABASE_URL", &mut self.database.url)?;

        // Prompt
        Self::apply_env_var(
            "MEALPLAN_PROMPT_CATALOG_LIMIT",
            &mut self.prompt.catalog_limit,
        )?;

        Ok(self)
    }
}
