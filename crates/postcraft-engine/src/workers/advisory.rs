// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engagement-advisory worker. Free-form answer, one tip per line.

use postcraft_core::types::{ContentRequest, EngagementTips, GeneratedContent};
use postcraft_core::PostcraftError;
use tracing::warn;

use crate::output::StageOutput;
use crate::stage::{GenerationStage, Variables};
use crate::templates::TemplateId;

pub struct AdvisoryWorker {
    stage: GenerationStage,
}

impl AdvisoryWorker {
    pub fn new(stage: GenerationStage) -> Self {
        Self { stage }
    }

    pub fn variables(content: &GeneratedContent, request: &ContentRequest) -> Variables {
        Variables::from([
            ("content", content.content.clone()),
            ("topic", request.topic().to_string()),
            ("industry", request.industry().to_string()),
            ("content_type", request.content_type().to_string()),
        ])
    }

    pub fn resolve(raw: &str) -> StageOutput<EngagementTips> {
        let tips = EngagementTips::from_text(raw);
        if tips.is_empty() {
            StageOutput::Degraded {
                value: tips,
                reason: "empty advisory answer".to_string(),
            }
        } else {
            StageOutput::Structured(tips)
        }
    }

    pub async fn run(
        &self,
        content: &GeneratedContent,
        request: &ContentRequest,
    ) -> Result<StageOutput<EngagementTips>, PostcraftError> {
        let raw = self
            .stage
            .run(TemplateId::Advise, &Self::variables(content, request))
            .await?;
        let output = Self::resolve(&raw);
        if output.is_degraded() {
            warn!(user_id = %request.user_id(), stage = "advise", "no engagement tips produced");
        }
        Ok(output)
    }
}
