// ABOUTME: OpenAI-compatible text producer adapter for local and cloud chat endpoints
// ABOUTME: Sends chat completions over reqwest and maps HTTP failures onto AppError codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Works with any endpoint that implements `POST {base_url}/chat/completions`:
//! Ollama (<http://localhost:11434/v1>), vLLM, `LocalAI`, or a hosted API.
//! Configured from [`LlmConfig`](crate::config::LlmConfig).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, field, instrument, warn, Span};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::errors::{AppError, ErrorCode};

/// Service label used in external-service errors
const SERVICE_NAME: &str = "TextProducer";

/// Connection timeout for the producer endpoint
const CONNECT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAiResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAiResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for logging
    pub provider_name: String,
    /// Provider display name
    pub display_name: String,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl OpenAiCompatibleConfig {
    /// Build provider configuration from engine settings
    ///
    /// The provider name is inferred from well-known local ports.
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider_name, display_name, capabilities) = if config.base_url.contains(":11434") {
            ("ollama", "Ollama (Local)", LlmCapabilities::text_only() | LlmCapabilities::JSON_MODE)
        } else if config.base_url.contains(":8000") {
            ("vllm", "vLLM (Local)", LlmCapabilities::text_only() | LlmCapabilities::JSON_MODE)
        } else if config.base_url.contains(":8080") {
            ("localai", "LocalAI", LlmCapabilities::text_only())
        } else {
            ("openai-compatible", "OpenAI-compatible API", LlmCapabilities::text_only())
        };

        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            provider_name: provider_name.to_owned(),
            display_name: display_name.to_owned(),
            capabilities,
            request_timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self::from_llm_config(&LlmConfig::default())
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible text producer
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a provider from engine settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_llm_config(config: &LlmConfig) -> Result<Self, AppError> {
        Self::new(OpenAiCompatibleConfig::from_llm_config(config))
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Add authorization header if API key is configured
    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    fn send_error(&self, e: &reqwest::Error) -> AppError {
        error!(
            "Failed to send request to {}: {}",
            self.config.provider_name, e
        );
        if e.is_connect() || e.is_timeout() {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!(
                    "Cannot reach {} at {}",
                    self.config.display_name, self.config.base_url
                ),
            )
        } else {
            AppError::external_service(SERVICE_NAME, format!("Failed to connect: {e}"))
        }
    }

    /// Parse error response from API
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let message = error_response.error.message;
            match status.as_u16() {
                401 | 403 => AppError::external_auth(format!("API authentication failed: {message}")),
                429 => AppError::new(
                    ErrorCode::ExternalRateLimited,
                    Self::extract_rate_limit_message(&message),
                ),
                400 => AppError::invalid_input(format!("API validation error: {message}")),
                404 => AppError::not_found(format!("Model or endpoint ({message})")),
                502..=504 => AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("{SERVICE_NAME} unavailable: {message}"),
                ),
                _ => {
                    let error_type = error_response
                        .error
                        .error_type
                        .unwrap_or_else(|| "unknown".to_owned());
                    AppError::external_service(SERVICE_NAME, format!("{error_type} - {message}"))
                }
            }
        } else {
            // Local servers often answer with plain text or HTML
            match status.as_u16() {
                401 | 403 => AppError::external_auth(format!("API authentication failed ({status})")),
                429 => AppError::new(
                    ErrorCode::ExternalRateLimited,
                    Self::extract_rate_limit_message(body),
                ),
                502..=504 => AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("{SERVICE_NAME} is not responding ({status})"),
                ),
                _ => AppError::external_service(
                    SERVICE_NAME,
                    format!(
                        "API error ({}): {}",
                        status,
                        body.chars().take(200).collect::<String>()
                    ),
                ),
            }
        }
    }

    /// Extract a user-friendly rate limit message
    fn extract_rate_limit_message(message: &str) -> String {
        let lower = message.to_lowercase();
        if let Some(retry_pos) = lower.find("try again in ") {
            let after_prefix = &lower[retry_pos + "try again in ".len()..];
            let end_pos = after_prefix
                .find(|c: char| !c.is_ascii_digit() && c != '.')
                .unwrap_or(after_prefix.len());
            if let Ok(seconds) = after_prefix[..end_pos].parse::<f64>() {
                let seconds_int = seconds.ceil() as u64;
                return format!("LLM rate limit reached. Please try again in {seconds_int} seconds.");
            }
        }
        "LLM rate limit reached. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.config.provider_name
    }

    fn display_name(&self) -> &str {
        &self.config.display_name
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = %self.config.provider_name, model = field::Empty))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);
        Span::current().record("model", model);

        let response_format = (request.json_mode && self.config.capabilities.supports_json_mode())
            .then_some(OpenAiResponseFormat {
                format_type: "json_object",
            });

        let openai_request = OpenAiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
            response_format,
        };

        debug!(
            messages = openai_request.messages.len(),
            json_mode = openai_request.response_format.is_some(),
            "Sending chat completion request"
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {}", e);
            AppError::external_service(SERVICE_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!(status = %status, "Text producer returned an error status");
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {}", e);
            AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE_NAME, "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received response from {}: {} chars, finish_reason: {:?}",
            self.config.provider_name,
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: if openai_response.model.is_empty() {
                model.to_owned()
            } else {
                openai_response.model
            },
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let http_request = self.client.get(self.api_url("models"));

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!(
                "{} health check failed with status: {}",
                self.config.provider_name,
                response.status()
            );
        }
        Ok(healthy)
    }
}
