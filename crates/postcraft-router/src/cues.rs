// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text classification.
//!
//! Cue phrases are matched as case-insensitive substrings. Rules are checked
//! in table order and the first rule whose precondition holds wins, so a
//! message carrying both a regenerate cue and a refine cue regenerates.

use postcraft_core::types::{Length, Tone};

use crate::session::SessionState;

/// Phrases asking for a fresh version of the last request.
pub const REGENERATE_CUES: &[&str] = &["regenerate", "recreate", "again", "another version"];

/// Phrases asking to edit the last draft.
pub const REFINE_CUES: &[&str] = &[
    "from a student perspective",
    "student perspective",
    "shorter",
    "more casual",
    "more professional",
    "enthusiastic",
    "longer",
    "change tone",
    "rewrite",
    "refine",
    "adjust",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueAction {
    Regenerate,
    Refine,
}

/// One row of the classification table.
#[derive(Debug)]
pub struct CueRule {
    pub action: CueAction,
    pub phrases: &'static [&'static str],
}

impl CueRule {
    fn matches(&self, lowered: &str) -> bool {
        self.phrases.iter().any(|phrase| lowered.contains(phrase))
    }

    /// Whether the session holds what this action needs.
    fn applies_to(&self, session: &SessionState) -> bool {
        match self.action {
            CueAction::Regenerate => session.last_request.is_some(),
            CueAction::Refine => session.last_draft.is_some(),
        }
    }
}

/// Ordered rule table. Regenerate precedes refine.
pub const CUE_RULES: &[CueRule] = &[
    CueRule {
        action: CueAction::Regenerate,
        phrases: REGENERATE_CUES,
    },
    CueRule {
        action: CueAction::Refine,
        phrases: REFINE_CUES,
    },
];

/// What a free-text message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Re-run the first-draft pipeline with the last request.
    Regenerate,
    /// Rewrite the last draft with the message as instruction.
    Refine,
    /// Generate from the message as a new topic.
    NewTopic,
    /// A bare regenerate command with nothing to regenerate.
    NothingToRegenerate,
    /// Blank message.
    Empty,
}

pub fn classify(text: &str, session: &SessionState) -> Intent {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Intent::Empty;
    }
    let lowered = trimmed.to_lowercase();

    for rule in CUE_RULES {
        if rule.matches(&lowered) && rule.applies_to(session) {
            return match rule.action {
                CueAction::Regenerate => Intent::Regenerate,
                CueAction::Refine => Intent::Refine,
            };
        }
    }

    if is_bare_regenerate(&lowered) {
        Intent::NothingToRegenerate
    } else {
        Intent::NewTopic
    }
}

/// True when the whole message is one regenerate phrase, ignoring
/// punctuation and surrounding whitespace.
fn is_bare_regenerate(lowered: &str) -> bool {
    let bare = lowered.trim_matches(|c: char| !c.is_alphanumeric());
    REGENERATE_CUES.contains(&bare)
}

/// A parameter change implied by a refine phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override {
    Length(Length),
    Tone(Tone),
}

pub const OVERRIDES: &[(&str, Override)] = &[
    ("shorter", Override::Length(Length::Short)),
    ("longer", Override::Length(Length::Long)),
    ("more casual", Override::Tone(Tone::Casual)),
    ("more professional", Override::Tone(Tone::Professional)),
    ("enthusiastic", Override::Tone(Tone::Enthusiastic)),
    ("more thoughtful", Override::Tone(Tone::Thoughtful)),
];

/// Applies every override phrase found in `text` on top of `tone` and
/// `length`, in the order the phrases appear. The last one in the text wins.
pub fn apply_overrides(text: &str, tone: Tone, length: Length) -> (Tone, Length) {
    let lowered = text.to_lowercase();
    let mut hits: Vec<(usize, Override)> = OVERRIDES
        .iter()
        .flat_map(|(phrase, change)| {
            lowered
                .match_indices(phrase)
                .map(move |(position, _)| (position, *change))
        })
        .collect();
    hits.sort_by_key(|(position, _)| *position);

    hits.into_iter()
        .fold((tone, length), |(tone, length), (_, change)| match change {
            Override::Length(l) => (tone, l),
            Override::Tone(t) => (t, length),
        })
}
