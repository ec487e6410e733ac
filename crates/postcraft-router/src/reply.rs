// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound replies and post rendering.

use postcraft_core::types::GeneratedContent;

use crate::action::Action;

/// Engagement tips shown under a post.
pub const SHOWN_ENGAGEMENT_TIPS: usize = 3;
/// Platform tips shown under a post.
pub const SHOWN_PLATFORM_TIPS: usize = 2;

pub const FOLLOW_UP_HINT: &str = "If you'd like a different version, reply \"regenerate\" or refine with follow-ups like \"shorter\", \"more casual\", or specific instructions (e.g., \"from a student perspective\").";

/// An inline button under a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    Action { label: String, action: Action },
    Link { label: String, url: String },
}

impl Button {
    pub fn action(label: impl Into<String>, action: Action) -> Self {
        Button::Action {
            label: label.into(),
            action,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Button::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Button::Action { label, .. } | Button::Link { label, .. } => label,
        }
    }
}

/// One message to send back to the user, with optional button rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Vec<Button>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// Appends a row holding a single button.
    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(vec![button]);
        self
    }

    /// Every button, row by row.
    pub fn all_buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter().flatten()
    }

    pub fn has_action(&self, action: &Action) -> bool {
        self.all_buttons()
            .any(|b| matches!(b, Button::Action { action: a, .. } if a == action))
    }
}

/// `#tag #tag` line for a hashtag list.
pub fn hashtag_line(hashtags: &[String]) -> String {
    hashtags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a generated post with its posting slot and capped tip lists.
pub fn render_post(
    header: &str,
    content: &GeneratedContent,
    engagement_tips: &[String],
    note: Option<&str>,
) -> String {
    let mut out = format!("{header}\n\n{}\n", content.content.trim());

    let tags = hashtag_line(&content.hashtags);
    if !tags.is_empty() {
        out.push_str(&format!("\n{tags}\n"));
    }
    if !content.suggested_time.is_empty() {
        out.push_str(&format!("\n⏰ Best time to post: {}\n", content.suggested_time));
    }
    push_numbered(
        &mut out,
        "💡 Engagement tips:",
        engagement_tips,
        SHOWN_ENGAGEMENT_TIPS,
    );
    push_numbered(
        &mut out,
        "🔧 LinkedIn tips:",
        &content.linkedin_tips,
        SHOWN_PLATFORM_TIPS,
    );
    if let Some(note) = note {
        out.push_str(&format!("\n{note}\n"));
    }
    out.push('\n');
    out.push_str(FOLLOW_UP_HINT);
    out
}

fn push_numbered(out: &mut String, title: &str, items: &[String], cap: usize) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}\n"));
    for (i, item) in items.iter().take(cap).enumerate() {
        out.push_str(&format!("{}. {item}\n", i + 1));
    }
}
