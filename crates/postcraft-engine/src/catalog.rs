// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Industries and tones offered by the configuration wizard.

use postcraft_core::types::Tone;

const INDUSTRIES: &[(&str, &str)] = &[
    ("technology", "Tech innovation insights and industry trends"),
    ("marketing", "Digital marketing strategies and brand building"),
    ("finance", "Financial insights and investment strategies"),
    ("healthcare", "Healthcare innovation and patient care"),
    ("education", "Learning strategies and educational insights"),
    ("consulting", "Business strategy and consulting insights"),
    ("startup", "Entrepreneurship and startup growth"),
    ("general", "Professional development and career insights"),
];

const TONES: &[(Tone, &str)] = &[
    (Tone::Professional, "Formal, authoritative, industry expert tone"),
    (Tone::Casual, "Friendly, approachable, conversational tone"),
    (Tone::Enthusiastic, "Energetic, passionate, motivational tone"),
    (Tone::Thoughtful, "Reflective, analytical, insightful tone"),
];

/// Static catalog of audience industries and content tones.
pub struct ContentTemplates;

impl ContentTemplates {
    /// `(industry, description)` pairs in display order.
    pub fn industries() -> &'static [(&'static str, &'static str)] {
        INDUSTRIES
    }

    pub fn tones() -> &'static [(Tone, &'static str)] {
        TONES
    }

    pub fn industry_description(industry: &str) -> Option<&'static str> {
        INDUSTRIES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(industry))
            .map(|(_, description)| *description)
    }

    pub fn tone_description(tone: Tone) -> &'static str {
        TONES
            .iter()
            .find(|(t, _)| *t == tone)
            .map(|(_, description)| *description)
            .unwrap_or_default()
    }

    pub fn is_known_industry(industry: &str) -> bool {
        Self::industry_description(industry).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn eight_industries_including_general() {
        assert_eq!(ContentTemplates::industries().len(), 8);
        assert!(ContentTemplates::is_known_industry("General"));
        assert!(!ContentTemplates::is_known_industry("mining"));
    }

    #[test]
    fn every_tone_has_a_description() {
        for tone in Tone::iter() {
            assert!(!ContentTemplates::tone_description(tone).is_empty(), "{tone}");
        }
    }
}
