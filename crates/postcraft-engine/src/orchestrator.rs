// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sequences workers into the first-draft and refinement pipelines.

use std::sync::Arc;

use async_trait::async_trait;
use postcraft_core::traits::{PostStore, ProviderAdapter};
use postcraft_core::types::{
    ContentRequest, ContentResponse, GeneratedContent, NewPost, PostStatus,
};
use postcraft_core::PostcraftError;
use tracing::{debug, error, info};

use crate::stage::GenerationStage;
use crate::workers::{
    AdvisoryWorker, DraftingWorker, OptimizationWorker, RefineRequest, RefinementWorker,
    SuggestionsWorker,
};

/// The content pipelines as seen by the conversation layer.
#[async_trait]
pub trait ContentPipeline: Send + Sync {
    /// Draft, optimize, advise, then persist. Nothing is persisted unless
    /// all three stages complete.
    async fn create(&self, request: &ContentRequest) -> Result<ContentResponse, PostcraftError>;

    /// Rewrite an existing draft. Persisting the result is up to the caller.
    async fn refine(&self, request: &RefineRequest) -> Result<GeneratedContent, PostcraftError>;

    /// Five post topics for an industry.
    async fn suggest_topics(&self, industry: &str) -> Result<Vec<String>, PostcraftError>;
}

/// Runs the pipelines against a text-generation backend and a post store.
pub struct Orchestrator {
    drafting: DraftingWorker,
    optimization: OptimizationWorker,
    advisory: AdvisoryWorker,
    refinement: RefinementWorker,
    suggestions: SuggestionsWorker,
    store: Arc<dyn PostStore>,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        store: Arc<dyn PostStore>,
        temperature: f32,
    ) -> Self {
        let stage = GenerationStage::new(provider, temperature);
        Self {
            drafting: DraftingWorker::new(stage.clone()),
            optimization: OptimizationWorker::new(stage.clone()),
            advisory: AdvisoryWorker::new(stage.clone()),
            refinement: RefinementWorker::new(stage.clone()),
            suggestions: SuggestionsWorker::new(stage),
            store,
        }
    }

    async fn run_create(
        &self,
        request: &ContentRequest,
    ) -> Result<ContentResponse, PostcraftError> {
        let draft = self.drafting.run(request).await?.into_value();
        let optimized = self.optimization.run(&draft, request).await?.into_value();
        let tips = self.advisory.run(&optimized, request).await?.into_value();

        let post_id = self
            .store
            .save_post(NewPost {
                user_id: request.user_id(),
                content: optimized.content.clone(),
                post_type: request.content_type().to_string(),
                status: PostStatus::Draft,
                ai_generated: true,
                topic: request.topic().to_string(),
                industry: request.industry().to_string(),
                tone: request.tone().to_string(),
                hashtags: optimized.hashtags.clone(),
                engagement_tips: tips.as_slice().to_vec(),
                linkedin_tips: optimized.linkedin_tips.clone(),
                suggested_time: optimized.suggested_time.clone(),
            })
            .await?;

        Ok(ContentResponse {
            generated: optimized,
            engagement_tips: tips,
            post_id,
        })
    }
}

#[async_trait]
impl ContentPipeline for Orchestrator {
    async fn create(&self, request: &ContentRequest) -> Result<ContentResponse, PostcraftError> {
        debug!(user_id = %request.user_id(), topic = request.topic(), "content creation started");
        match self.run_create(request).await {
            Ok(response) => {
                info!(
                    user_id = %request.user_id(),
                    post_id = %response.post_id,
                    tips = response.engagement_tips.len(),
                    "content created"
                );
                Ok(response)
            }
            Err(e) => {
                error!(user_id = %request.user_id(), error = %e, "content creation failed");
                Err(e)
            }
        }
    }

    async fn refine(&self, request: &RefineRequest) -> Result<GeneratedContent, PostcraftError> {
        debug!(tone = %request.tone, length = %request.length, "refining content");
        Ok(self.refinement.run(request).await?.into_value())
    }

    async fn suggest_topics(&self, industry: &str) -> Result<Vec<String>, PostcraftError> {
        Ok(self.suggestions.run(industry).await?.into_value())
    }
}
