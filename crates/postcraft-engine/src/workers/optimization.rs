// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-optimization worker.

use postcraft_core::types::{ContentRequest, GeneratedContent};
use postcraft_core::PostcraftError;
use tracing::warn;

use crate::output::StageOutput;
use crate::parse::{ParsedOutput, parse_generated_content};
use crate::stage::{GenerationStage, Variables};
use crate::templates::TemplateId;

pub struct OptimizationWorker {
    stage: GenerationStage,
}

impl OptimizationWorker {
    pub fn new(stage: GenerationStage) -> Self {
        Self { stage }
    }

    pub fn variables(draft: &GeneratedContent, request: &ContentRequest) -> Variables {
        let hashtags = if draft.hashtags.is_empty() {
            "none".to_string()
        } else {
            draft
                .hashtags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ")
        };
        Variables::from([
            ("content", draft.content.clone()),
            ("hashtags", hashtags),
            ("industry", request.industry().to_string()),
            ("tone", request.tone().to_string()),
        ])
    }

    /// An unusable answer leaves the draft untouched.
    pub fn resolve(parsed: ParsedOutput, draft: &GeneratedContent) -> StageOutput<GeneratedContent> {
        match parsed {
            ParsedOutput::Structured(content) => StageOutput::Structured(content),
            ParsedOutput::Unstructured { reason, .. } => StageOutput::Degraded {
                value: draft.clone(),
                reason,
            },
        }
    }

    pub async fn run(
        &self,
        draft: &GeneratedContent,
        request: &ContentRequest,
    ) -> Result<StageOutput<GeneratedContent>, PostcraftError> {
        let raw = self
            .stage
            .run(TemplateId::Optimize, &Self::variables(draft, request))
            .await?;
        let output = Self::resolve(parse_generated_content(&raw), draft);
        if let Some(reason) = output.reason() {
            warn!(user_id = %request.user_id(), stage = "optimize", reason, "keeping unoptimized draft");
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcraft_core::types::UserId;

    fn draft() -> GeneratedContent {
        GeneratedContent {
            content: "Original draft".into(),
            hashtags: vec!["Rust".into()],
            suggested_time: "Monday 10 AM".into(),
            linkedin_tips: vec!["Keep it short".into()],
        }
    }

    #[test]
    fn unparseable_answer_returns_input_unchanged() {
        let output = OptimizationWorker::resolve(parse_generated_content("I improved it!"), &draft());
        assert!(output.is_degraded());
        assert_eq!(output.into_value(), draft());
    }

    #[test]
    fn structured_answer_replaces_draft() {
        let output = OptimizationWorker::resolve(
            parse_generated_content(r#"{"content": "Better", "hashtags": ["Rust", "Dev"]}"#),
            &draft(),
        );
        assert!(!output.is_degraded());
        assert_eq!(output.value().content, "Better");
    }

    #[test]
    fn hashtags_are_listed_for_the_backend() {
        let request = ContentRequest::builder(UserId(1), "t").build();
        let vars = OptimizationWorker::variables(&draft(), &request);
        assert_eq!(vars["hashtags"], "#Rust");

        let bare = GeneratedContent {
            hashtags: vec![],
            ..draft()
        };
        assert_eq!(OptimizationWorker::variables(&bare, &request)["hashtags"], "none");
    }
}
