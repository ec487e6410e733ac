// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drafting worker: first draft from a content request.

use postcraft_core::types::{ContentRequest, GeneratedContent};
use postcraft_core::PostcraftError;
use tracing::warn;

use crate::output::StageOutput;
use crate::parse::{ParsedOutput, parse_generated_content};
use crate::stage::{GenerationStage, Variables, yes_no};
use crate::templates::TemplateId;
use crate::workers::raw_fallback;

/// Platform tips attached when the draft could not be parsed.
pub const DRAFT_FALLBACK_TIPS: [&str; 2] = ["Post during business hours", "Engage with comments"];

pub struct DraftingWorker {
    stage: GenerationStage,
}

impl DraftingWorker {
    pub fn new(stage: GenerationStage) -> Self {
        Self { stage }
    }

    pub fn variables(request: &ContentRequest) -> Variables {
        let (min_words, max_words) = request.length().word_range();
        Variables::from([
            ("industry", request.industry().to_string()),
            ("tone", request.tone().to_string()),
            ("topic", request.topic().to_string()),
            ("content_type", request.content_type().to_string()),
            ("length", request.length().to_string()),
            ("min_words", min_words.to_string()),
            ("max_words", max_words.to_string()),
            ("hashtags", yes_no(request.hashtags())),
            ("emoji", yes_no(request.emoji())),
            ("call_to_action", yes_no(request.call_to_action())),
        ])
    }

    /// A structured answer is used as-is; anything else becomes the raw text
    /// with the default slot and generic tips.
    pub fn resolve(parsed: ParsedOutput) -> StageOutput<GeneratedContent> {
        match parsed {
            ParsedOutput::Structured(content) => StageOutput::Structured(content),
            ParsedOutput::Unstructured { raw, reason } => StageOutput::Degraded {
                value: raw_fallback(&raw, &DRAFT_FALLBACK_TIPS),
                reason,
            },
        }
    }

    pub async fn run(
        &self,
        request: &ContentRequest,
    ) -> Result<StageOutput<GeneratedContent>, PostcraftError> {
        let raw = self
            .stage
            .run(TemplateId::Draft, &Self::variables(request))
            .await?;
        let output = Self::resolve(parse_generated_content(&raw));
        if let Some(reason) = output.reason() {
            warn!(user_id = %request.user_id(), stage = "draft", reason, "draft fell back to raw text");
        }
        Ok(output)
    }
}
