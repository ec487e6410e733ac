// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discrete button actions and their callback encoding.

use std::fmt;
use std::str::FromStr;

use postcraft_core::types::{Length, Tone};

/// A button press delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MainMenu,
    ConnectAccount,
    CheckStatus,
    ViewDrafts,
    Help,
    /// Open the configuration wizard at the industry step.
    StartWizard,
    SelectIndustry(String),
    SelectTone(Tone),
    SelectLength(Length),
    /// Generate with the wizard's choices.
    Generate,
    /// List topic ideas for the chosen industry.
    SuggestTopics,
}

const INDUSTRY_PREFIX: &str = "wizard_industry:";
const TONE_PREFIX: &str = "wizard_tone:";
const LENGTH_PREFIX: &str = "wizard_length:";

impl Action {
    /// Decodes callback data. Unknown data yields `None`.
    pub fn parse(data: &str) -> Option<Self> {
        let action = match data {
            "main_menu" => Action::MainMenu,
            "connect_account" => Action::ConnectAccount,
            "check_status" => Action::CheckStatus,
            "view_drafts" => Action::ViewDrafts,
            "help" => Action::Help,
            "wizard_start" => Action::StartWizard,
            "wizard_generate" => Action::Generate,
            "wizard_topics" => Action::SuggestTopics,
            other => {
                if let Some(industry) = other.strip_prefix(INDUSTRY_PREFIX) {
                    let industry = industry.trim();
                    if industry.is_empty() {
                        return None;
                    }
                    Action::SelectIndustry(industry.to_lowercase())
                } else if let Some(tone) = other.strip_prefix(TONE_PREFIX) {
                    Action::SelectTone(Tone::from_str(tone).ok()?)
                } else if let Some(length) = other.strip_prefix(LENGTH_PREFIX) {
                    Action::SelectLength(Length::from_str(length).ok()?)
                } else {
                    return None;
                }
            }
        };
        Some(action)
    }

    pub fn callback_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MainMenu => f.write_str("main_menu"),
            Action::ConnectAccount => f.write_str("connect_account"),
            Action::CheckStatus => f.write_str("check_status"),
            Action::ViewDrafts => f.write_str("view_drafts"),
            Action::Help => f.write_str("help"),
            Action::StartWizard => f.write_str("wizard_start"),
            Action::Generate => f.write_str("wizard_generate"),
            Action::SuggestTopics => f.write_str("wizard_topics"),
            Action::SelectIndustry(industry) => write!(f, "{INDUSTRY_PREFIX}{industry}"),
            Action::SelectTone(tone) => write!(f, "{TONE_PREFIX}{tone}"),
            Action::SelectLength(length) => write!(f, "{LENGTH_PREFIX}{length}"),
        }
    }
}
