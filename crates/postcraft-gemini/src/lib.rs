// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter.
//!
//! Implements [`ProviderAdapter`] on top of the `generateContent` endpoint.
//! Each [`ProviderRequest`] becomes one call with the instruction text as
//! `systemInstruction` and the user text as a single user turn.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use postcraft_config::model::GeminiConfig;
use postcraft_core::error::PostcraftError;
use postcraft_core::traits::{PluginAdapter, ProviderAdapter};
use postcraft_core::types::{AdapterType, HealthStatus, ProviderRequest, ProviderResponse};
use tracing::{debug, info, warn};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig};

/// Gemini provider implementing [`ProviderAdapter`].
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
}

impl GeminiProvider {
    /// Creates a provider from the `[gemini]` config section.
    ///
    /// Fails with [`PostcraftError::Config`] when no API key is configured.
    pub fn new(config: &GeminiConfig) -> Result<Self, PostcraftError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PostcraftError::Config(
                    "Gemini API key not found. Set gemini.api_key in config or the GOOGLE_API_KEY environment variable.".into(),
                )
            })?;

        let client = GeminiClient::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(model = config.model, "Gemini provider initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_api_request(request: &ProviderRequest) -> GenerateContentRequest {
        let system_instruction = (!request.system_prompt.trim().is_empty())
            .then(|| Content::text(None, request.system_prompt.clone()));
        GenerateContentRequest {
            system_instruction,
            contents: vec![Content::text(Some("user"), request.user_prompt.clone())],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, PostcraftError> {
        // Avoid spending quota on health checks.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PostcraftError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, PostcraftError> {
        let api_request = Self::to_api_request(&request);
        let response = self.client.generate(&self.model, &api_request).await?;

        let Some(content) = response.first_text() else {
            let reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            warn!(model = %self.model, reason = %reason, "backend returned no text");
            return Err(PostcraftError::provider(format!(
                "backend returned no text ({reason})"
            )));
        };

        Ok(ProviderResponse {
            content,
            model: response.model_version.unwrap_or_else(|| self.model.clone()),
        })
    }
}
