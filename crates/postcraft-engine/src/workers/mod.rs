// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline workers: one [`GenerationStage`](crate::stage::GenerationStage)
//! call each, with a stage-specific template and fallback.
//!
//! Every worker splits into three parts so the fallback logic can be tested
//! without a backend: `variables` (request to template bindings), `resolve`
//! (parsed answer to [`StageOutput`](crate::output::StageOutput)), and `run`.

pub mod advisory;
pub mod drafting;
pub mod optimization;
pub mod refinement;
pub mod suggestions;

pub use advisory::AdvisoryWorker;
pub use drafting::DraftingWorker;
pub use optimization::OptimizationWorker;
pub use refinement::{RefineRequest, RefinementWorker};
pub use suggestions::SuggestionsWorker;

use postcraft_core::types::GeneratedContent;

/// Posting slot used when the backend answer carried none.
pub const FALLBACK_SUGGESTED_TIME: &str = "Tuesday 9 AM";

/// Raw answer wrapped as content, with fixed slot and tips.
pub(crate) fn raw_fallback(raw: &str, tips: &[&str]) -> GeneratedContent {
    GeneratedContent {
        content: raw.to_string(),
        hashtags: Vec::new(),
        suggested_time: FALLBACK_SUGGESTED_TIME.to_string(),
        linkedin_tips: tips.iter().map(|t| t.to_string()).collect(),
    }
}
