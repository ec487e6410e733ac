// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Topic suggestions for an industry.

use postcraft_core::PostcraftError;
use tracing::warn;

use crate::output::StageOutput;
use crate::parse::parse_string_list;
use crate::stage::{GenerationStage, Variables};
use crate::templates::TemplateId;

/// Number of topics offered.
pub const SUGGESTION_COUNT: usize = 5;

pub struct SuggestionsWorker {
    stage: GenerationStage,
}

impl SuggestionsWorker {
    pub fn new(stage: GenerationStage) -> Self {
        Self { stage }
    }

    /// Deterministic topics used when the backend answer is not a list.
    pub fn fallback(industry: &str) -> Vec<String> {
        vec![
            format!("Key trends in {industry} for 2024"),
            format!("Lessons learned from my {industry} journey"),
            format!("Common mistakes in {industry} and how to avoid them"),
            format!("The future of {industry}"),
            format!("Building relationships in {industry}"),
        ]
    }

    pub fn resolve(raw: &str, industry: &str) -> StageOutput<Vec<String>> {
        match parse_string_list(raw) {
            Some(mut topics) => {
                topics.truncate(SUGGESTION_COUNT);
                StageOutput::Structured(topics)
            }
            None => StageOutput::Degraded {
                value: Self::fallback(industry),
                reason: "no JSON array of topics".to_string(),
            },
        }
    }

    pub async fn run(&self, industry: &str) -> Result<StageOutput<Vec<String>>, PostcraftError> {
        let variables = Variables::from([("industry", industry.to_string())]);
        let raw = self.stage.run(TemplateId::SuggestTopics, &variables).await?;
        let output = Self::resolve(&raw, industry);
        if let Some(reason) = output.reason() {
            warn!(industry, reason, "using templated topic suggestions");
        }
        Ok(output)
    }
}
