// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generation stage: one templated call to the text-generation backend.

use std::collections::BTreeMap;
use std::sync::Arc;

use handlebars::Handlebars;
use postcraft_core::traits::ProviderAdapter;
use postcraft_core::types::ProviderRequest;
use postcraft_core::PostcraftError;
use tracing::debug;

use crate::templates::TemplateId;

/// Values bound into a template's `{{name}}` placeholders.
pub type Variables = BTreeMap<&'static str, String>;

/// Renders prompt templates through a strict Handlebars registry.
///
/// A placeholder without a binding is an internal error: templates and
/// workers ship together, so this only happens on a programming mistake.
/// Output is not HTML-escaped and substituted values are never re-rendered.
#[derive(Clone)]
pub struct PromptRenderer {
    hbs: Arc<Handlebars<'static>>,
}

impl PromptRenderer {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs: Arc::new(hbs) }
    }

    pub fn render(&self, template: &str, variables: &Variables) -> Result<String, PostcraftError> {
        self.hbs
            .render_template(template, variables)
            .map_err(|e| PostcraftError::Internal(format!("failed to render prompt template: {e}")))
    }
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A single prompt-templated call to the text-generation backend.
///
/// Cheap to clone; every worker holds its own handle. The stage never
/// retries: backend failures go straight back to the caller.
#[derive(Clone)]
pub struct GenerationStage {
    provider: Arc<dyn ProviderAdapter>,
    prompts: PromptRenderer,
    temperature: f32,
}

impl GenerationStage {
    pub fn new(provider: Arc<dyn ProviderAdapter>, temperature: f32) -> Self {
        Self {
            provider,
            prompts: PromptRenderer::new(),
            temperature,
        }
    }

    /// Bind `variables` into the template pair without calling the backend.
    pub fn prepare(
        &self,
        template: TemplateId,
        variables: &Variables,
    ) -> Result<ProviderRequest, PostcraftError> {
        let prompt = template.template();
        Ok(ProviderRequest {
            system_prompt: self.prompts.render(prompt.system, variables)?,
            user_prompt: self.prompts.render(prompt.user, variables)?,
            temperature: self.temperature,
        })
    }

    /// Run `template` with `variables` and return the backend's raw text.
    pub async fn run(
        &self,
        template: TemplateId,
        variables: &Variables,
    ) -> Result<String, PostcraftError> {
        let request = self.prepare(template, variables)?;
        debug!(stage = %template, "generation stage started");
        let response = self.provider.complete(request).await?;
        debug!(stage = %template, chars = response.content.len(), "generation stage finished");
        Ok(response.content)
    }
}

/// "Yes"/"No" rendering for boolean toggles.
pub(crate) fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn vars(pairs: &[(&'static str, &str)]) -> Variables {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn render(template: &str, variables: &Variables) -> Result<String, PostcraftError> {
        PromptRenderer::new().render(template, variables)
    }

    #[test]
    fn render_binds_placeholders() {
        let out = render(
            "Hello {{name}}, welcome to {{place}}.",
            &vars(&[("name", "Ada"), ("place", "Rust")]),
        )
        .unwrap();
        assert_eq!(out, "Hello Ada, welcome to Rust.");
    }

    #[test]
    fn render_keeps_single_braces() {
        let out = render(r#"{"content": "x"} and {topic} and {}"#, &Variables::new()).unwrap();
        assert_eq!(out, r#"{"content": "x"} and {topic} and {}"#);
    }

    #[test]
    fn render_does_not_rescan_substituted_values() {
        let out = render("{{a}}", &vars(&[("a", "{{b}}")])).unwrap();
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn render_does_not_escape_html() {
        let out = render("{{draft}}", &vars(&[("draft", "R&D <teams> \"ship\" it's")])).unwrap();
        assert_eq!(out, "R&D <teams> \"ship\" it's");
    }

    #[test]
    fn unbound_placeholder_is_an_error() {
        let err = render("Topic: {{topic}}", &Variables::new()).unwrap_err();
        assert!(matches!(err, PostcraftError::Internal(msg) if msg.contains("topic")));
    }

    #[test]
    fn every_template_renders_with_a_full_binding() {
        let all = vars(&[
            ("industry", "technology"),
            ("tone", "casual"),
            ("topic", "t"),
            ("length", "short"),
            ("min_words", "100"),
            ("max_words", "200"),
            ("approx_words", "150"),
            ("content_type", "post"),
            ("hashtags", "Yes"),
            ("emoji", "Yes"),
            ("call_to_action", "Yes"),
            ("content", "c"),
            ("original_content", "o"),
            ("instruction", "i"),
        ]);
        let prompts = PromptRenderer::new();
        for id in TemplateId::iter() {
            let prompt = id.template();
            let system = prompts.render(prompt.system, &all);
            let user = prompts.render(prompt.user, &all);
            assert!(system.is_ok(), "{id} system: {system:?}");
            assert!(user.is_ok(), "{id} user: {user:?}");
            assert!(!system.unwrap().contains("{{"), "{id} system left a placeholder");
        }
    }
}
