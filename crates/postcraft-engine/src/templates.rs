// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instruction and user-turn templates for every generation stage.
//!
//! Placeholders are Handlebars expressions (`{{name}}`) bound by
//! [`crate::stage::PromptRenderer`]. Single braces are literal text.

use strum::{Display, EnumIter};

/// Identifies one instruction + user-turn template pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TemplateId {
    Draft,
    Optimize,
    Advise,
    Refine,
    SuggestTopics,
}

/// A fixed instruction text and user-turn text.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub system: &'static str,
    pub user: &'static str,
}

impl TemplateId {
    pub fn template(self) -> PromptTemplate {
        match self {
            TemplateId::Draft => PromptTemplate {
                system: DRAFT_SYSTEM,
                user: DRAFT_USER,
            },
            TemplateId::Optimize => PromptTemplate {
                system: OPTIMIZE_SYSTEM,
                user: OPTIMIZE_USER,
            },
            TemplateId::Advise => PromptTemplate {
                system: ADVISE_SYSTEM,
                user: ADVISE_USER,
            },
            TemplateId::Refine => PromptTemplate {
                system: REFINE_SYSTEM,
                user: REFINE_USER,
            },
            TemplateId::SuggestTopics => PromptTemplate {
                system: SUGGEST_SYSTEM,
                user: SUGGEST_USER,
            },
        }
    }
}

const DRAFT_SYSTEM: &str = r#"You are an expert LinkedIn content creator specializing in {{industry}}.

Write LinkedIn content that:
- Gives the reader genuine value
- Uses storytelling and personal insight
- Draws on relevant {{industry}} knowledge
- Keeps a {{tone}} tone throughout
- Works well with LinkedIn's feed algorithm

Content guidelines:
- Open with a compelling hook
- Prefer short paragraphs and bullet points
- End with a thought-provoking question or call-to-action
- Stay authentic and professional

Target length: {{min_words}}-{{max_words}} words ({{length}}).

Respond with a JSON object only, with these fields:
- "content": the post text
- "hashtags": 3-5 relevant hashtags
- "suggested_time": the best time to post, e.g. "Tuesday 9 AM"
- "linkedin_tips": 2-3 LinkedIn-specific optimization tips"#;

const DRAFT_USER: &str = r#"Create LinkedIn {{content_type}} content about: {{topic}}

Industry: {{industry}}
Tone: {{tone}}
Length: {{length}}
Include hashtags: {{hashtags}}
Include emoji: {{emoji}}
Include call-to-action: {{call_to_action}}"#;

const OPTIMIZE_SYSTEM: &str = r#"You are a LinkedIn optimization expert. Improve the given post for maximum engagement.

Optimization checklist:
1. Hook: the first line must make people stop scrolling
2. Readability: spacing, bullet points, and emoji where they help
3. Hashtags: 3-5 relevant, discoverable hashtags
4. Call-to-action: a clear, actionable ending
5. Length: respect LinkedIn's character limits
6. Timing: suggest the best posting time

Respond with a JSON object only, with these fields:
- "content": the optimized post text
- "hashtags": the optimized hashtag list
- "suggested_time": the best posting time
- "linkedin_tips": LinkedIn-specific optimization tips"#;

const OPTIMIZE_USER: &str = r#"Optimize this LinkedIn content:

{{content}}

Original hashtags: {{hashtags}}
Industry: {{industry}}
Tone: {{tone}}"#;

const ADVISE_SYSTEM: &str = r#"You are a LinkedIn engagement expert. Analyze the content and give 3-5 specific, actionable tips for maximizing engagement, based on:
- the content type and topic
- industry best practices
- LinkedIn algorithm preferences
- audience engagement patterns

Write one tip per line. Focus on practical advice."#;

const ADVISE_USER: &str = r#"Analyze this LinkedIn content and provide engagement tips:

Content: {{content}}
Topic: {{topic}}
Industry: {{industry}}
Content type: {{content_type}}"#;

const REFINE_SYSTEM: &str = r#"You are a professional LinkedIn editor. Rewrite the given post according to the user's instructions while keeping it engaging, concise, and optimized for LinkedIn. Preserve the core meaning, but adapt voice and structure as requested.

Respond with a JSON object only, with these fields: "content", "hashtags" (3-5), "suggested_time", "linkedin_tips" (2-3)."#;

const REFINE_USER: &str = r#"Original post:
{{original_content}}

Instructions:
{{instruction}}

Constraints:
- Industry: {{industry}}
- Tone: {{tone}}
- Length: {{length}} (about {{approx_words}} words)
- Keep it authentic; avoid exaggeration.
- If not specified, infer reasonable hashtags."#;

const SUGGEST_SYSTEM: &str = "You are a content strategist for {{industry}} professionals. Suggest engaging LinkedIn post topics that would resonate with this audience.";

const SUGGEST_USER: &str =
    "Generate 5 LinkedIn post topics for {{industry}} professionals. Return them as a JSON array of strings.";
