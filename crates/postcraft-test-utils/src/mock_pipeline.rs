// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content pipeline that records calls instead of generating.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use postcraft_core::PostcraftError;
use postcraft_core::types::{ContentRequest, ContentResponse, EngagementTips, GeneratedContent};
use postcraft_engine::{ContentPipeline, RefineRequest};

/// One call the router made into the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineCall {
    Create(ContentRequest),
    Refine(RefineRequest),
    SuggestTopics(String),
}

/// Answers every call with predictable content derived from its input and
/// remembers the call. Can be switched to fail like an unreachable backend.
#[derive(Clone, Default)]
pub struct RecordingPipeline {
    calls: Arc<Mutex<Vec<PipelineCall>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<PipelineCall> {
        self.calls.lock().await.clone()
    }

    /// The most recent call, if any.
    pub async fn last_call(&self) -> Option<PipelineCall> {
        self.calls.lock().await.last().cloned()
    }

    async fn record(&self, call: PipelineCall) -> Result<(), PostcraftError> {
        self.calls.lock().await.push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(PostcraftError::provider("recording pipeline set to fail"));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentPipeline for RecordingPipeline {
    async fn create(&self, request: &ContentRequest) -> Result<ContentResponse, PostcraftError> {
        self.record(PipelineCall::Create(request.clone())).await?;
        Ok(ContentResponse {
            generated: GeneratedContent {
                content: format!("Draft about {}", request.topic()),
                hashtags: vec!["career".to_string(), request.industry().to_string()],
                suggested_time: "Wednesday 8 AM".to_string(),
                linkedin_tips: vec!["Tag a colleague".to_string()],
            },
            engagement_tips: EngagementTips::from_text("Reply to comments\nAsk a question"),
            post_id: uuid::Uuid::new_v4().to_string(),
        })
    }

    async fn refine(&self, request: &RefineRequest) -> Result<GeneratedContent, PostcraftError> {
        self.record(PipelineCall::Refine(request.clone())).await?;
        Ok(GeneratedContent {
            content: format!("Refined ({}): {}", request.instruction, request.previous_content),
            hashtags: vec!["rewrite".to_string()],
            suggested_time: "Thursday 10 AM".to_string(),
            linkedin_tips: vec!["Keep it short".to_string()],
        })
    }

    async fn suggest_topics(&self, industry: &str) -> Result<Vec<String>, PostcraftError> {
        self.record(PipelineCall::SuggestTopics(industry.to_string()))
            .await?;
        Ok((1..=5).map(|i| format!("{industry} topic {i}")).collect())
    }
}
