// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text polish adapter backed by an OpenAI-compatible Chat Completions API.
//!
//! The style directive travels as the system message and the raw note as
//! the user message. Failures are returned as [`ShiftlogError::Polish`];
//! the composer decides what to do with them.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use shiftlog_config::model::PolishConfig;
use shiftlog_core::{
    AdapterType, HealthStatus, PluginAdapter, PolishAdapter, PolishRequest, ShiftlogError,
};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ChatCompletionRequest, ChatMessage};

/// Chat-completions polisher implementing [`PolishAdapter`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiPolisher {
    client: OpenAiClient,
}

impl OpenAiPolisher {
    /// Creates a polisher from the `[polish]` config section.
    pub fn new(config: &PolishConfig) -> Result<Self, ShiftlogError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = OpenAiClient::new(
            &api_key,
            &config.base_url,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(model = %config.model, base_url = %config.base_url, "OpenAI polisher initialized");
        Ok(Self { client })
    }

    /// Builds a polisher only when an API key can be resolved.
    pub fn from_config(config: &PolishConfig) -> Option<Self> {
        match Self::new(config) {
            Ok(polisher) => Some(polisher),
            Err(e) => {
                info!(reason = %e, "remote polishing disabled");
                None
            }
        }
    }

    /// Creates a polisher with an existing client.
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }

    fn to_chat_request(&self, request: &PolishRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.client.model().to_string(),
            messages: vec![
                ChatMessage::system(&request.directive),
                ChatMessage::user(&request.text),
            ],
            max_tokens: Some(max_tokens_for(request.max_chars)),
            temperature: Some(0.3),
        }
    }
}

/// Rough token budget for a reply of `max_chars` characters.
fn max_tokens_for(max_chars: usize) -> u32 {
    u32::try_from(max_chars / 3 + 32).unwrap_or(u32::MAX)
}

#[async_trait]
impl PluginAdapter for OpenAiPolisher {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Polish
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftlogError> {
        // No request is made; a polish round trip costs tokens.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl PolishAdapter for OpenAiPolisher {
    async fn polish(&self, request: PolishRequest) -> Result<String, ShiftlogError> {
        let chat = self.to_chat_request(&request);
        let response = self.client.complete(&chat).await?;
        let text = response.first_text().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(ShiftlogError::Polish {
                message: "completion contained no text".into(),
                source: None,
            });
        }
        debug!(chars = text.chars().count(), "note polished");
        Ok(text.to_string())
    }
}

/// Resolves the API key from config, falling back to the environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, ShiftlogError> {
    if let Some(key) = config_key.as_ref().filter(|k| !k.trim().is_empty()) {
        return Ok(key.clone());
    }

    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            ShiftlogError::Config(
                "OpenAI API key not found. Set polish.api_key in config or OPENAI_API_KEY environment variable.".into(),
            )
        })
}
