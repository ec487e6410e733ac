// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Refinement worker: rewrites an existing draft per a free-text instruction.

use postcraft_core::types::{GeneratedContent, Length, Tone};
use postcraft_core::PostcraftError;
use tracing::warn;

use crate::output::StageOutput;
use crate::parse::{ParsedOutput, parse_generated_content};
use crate::stage::{GenerationStage, Variables};
use crate::templates::TemplateId;
use crate::workers::raw_fallback;

/// Platform tips attached when the rewrite could not be parsed.
pub const REFINE_FALLBACK_TIPS: [&str; 2] = ["Ask a question at the end", "Use a relevant visual"];

/// Input of one refinement call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineRequest {
    pub previous_content: String,
    pub instruction: String,
    pub industry: String,
    pub tone: Tone,
    pub length: Length,
}

pub struct RefinementWorker {
    stage: GenerationStage,
}

impl RefinementWorker {
    pub fn new(stage: GenerationStage) -> Self {
        Self { stage }
    }

    pub fn variables(request: &RefineRequest) -> Variables {
        Variables::from([
            ("original_content", request.previous_content.clone()),
            ("instruction", request.instruction.clone()),
            ("industry", request.industry.clone()),
            ("tone", request.tone.to_string()),
            ("length", request.length.to_string()),
            ("approx_words", request.length.approx_words().to_string()),
        ])
    }

    pub fn resolve(parsed: ParsedOutput) -> StageOutput<GeneratedContent> {
        match parsed {
            ParsedOutput::Structured(content) => StageOutput::Structured(content),
            ParsedOutput::Unstructured { raw, reason } => StageOutput::Degraded {
                value: raw_fallback(&raw, &REFINE_FALLBACK_TIPS),
                reason,
            },
        }
    }

    pub async fn run(
        &self,
        request: &RefineRequest,
    ) -> Result<StageOutput<GeneratedContent>, PostcraftError> {
        let raw = self
            .stage
            .run(TemplateId::Refine, &Self::variables(request))
            .await?;
        let output = Self::resolve(parse_generated_content(&raw));
        if let Some(reason) = output.reason() {
            warn!(stage = "refine", reason, "rewrite fell back to raw text");
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::PromptRenderer;

    fn request(length: Length) -> RefineRequest {
        RefineRequest {
            previous_content: "We shipped v2.".into(),
            instruction: "make it shorter".into(),
            industry: "technology".into(),
            tone: Tone::Casual,
            length,
        }
    }

    #[test]
    fn user_turn_carries_draft_instruction_and_length_hint() {
        let user = PromptRenderer::new().render(
            TemplateId::Refine.template().user,
            &RefinementWorker::variables(&request(Length::Short)),
        )
        .unwrap();
        assert!(user.contains("We shipped v2."));
        assert!(user.contains("make it shorter"));
        assert!(user.contains("Tone: casual"));
        assert!(user.contains("Length: short (about 150 words)"));
    }

    #[test]
    fn fallback_uses_refinement_tips() {
        let value = RefinementWorker::resolve(parse_generated_content("Shorter post.")).into_value();
        assert_eq!(value.content, "Shorter post.");
        assert_eq!(value.suggested_time, "Tuesday 9 AM");
        assert_eq!(
            value.linkedin_tips,
            ["Ask a question at the end", "Use a relevant visual"]
        );
    }
}
