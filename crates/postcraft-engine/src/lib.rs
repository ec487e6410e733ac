// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content generation for Postcraft.
//!
//! A [`GenerationStage`] binds variables into a prompt template and calls the
//! text-generation backend once. Four workers specialize it (drafting,
//! platform optimization, engagement advice, refinement) and the
//! [`Orchestrator`] chains them into the first-draft and refinement
//! pipelines.

pub mod catalog;
pub mod orchestrator;
pub mod output;
pub mod parse;
pub mod stage;
pub mod templates;
pub mod workers;

pub use catalog::ContentTemplates;
pub use orchestrator::{ContentPipeline, Orchestrator};
pub use output::StageOutput;
pub use parse::ParsedOutput;
pub use stage::{GenerationStage, PromptRenderer, Variables};
pub use templates::TemplateId;
pub use workers::RefineRequest;
