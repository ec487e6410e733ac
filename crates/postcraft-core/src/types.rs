// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the pipeline, the router, and the adapters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Industry used when the user has not chosen one.
pub const DEFAULT_INDUSTRY: &str = "general";

/// Maximum number of engagement tips attached to a response.
pub const MAX_ENGAGEMENT_TIPS: usize = 5;

/// Identity of a chat user (the presentation layer's numeric user id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Provider,
    Storage,
    Connection,
}

/// Kind of social-media content being produced.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Post,
    Comment,
    Article,
    Carousel,
}

/// Voice of the generated content.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Enthusiastic,
    Thoughtful,
}

/// Target length band of the generated content.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    /// Word-count band requested from the drafting stage.
    pub fn word_range(self) -> (u32, u32) {
        match self {
            Length::Short => (100, 200),
            Length::Medium => (200, 400),
            Length::Long => (400, 600),
        }
    }

    /// Approximate word target used when rewriting an existing draft.
    pub fn approx_words(self) -> u32 {
        match self {
            Length::Short => 150,
            Length::Medium => 300,
            Length::Long => 500,
        }
    }
}

/// A fully specified generation request.
///
/// Built once per generation or refinement call through
/// [`ContentRequest::builder`]; the pipeline only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    user_id: UserId,
    content_type: ContentType,
    topic: String,
    industry: String,
    tone: Tone,
    length: Length,
    hashtags: bool,
    emoji: bool,
    call_to_action: bool,
}

impl ContentRequest {
    /// Starts a request for `topic` with every other field at its default.
    pub fn builder(user_id: UserId, topic: impl Into<String>) -> ContentRequestBuilder {
        ContentRequestBuilder {
            request: ContentRequest {
                user_id,
                content_type: ContentType::default(),
                topic: topic.into(),
                industry: DEFAULT_INDUSTRY.to_string(),
                tone: Tone::default(),
                length: Length::default(),
                hashtags: true,
                emoji: true,
                call_to_action: true,
            },
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn hashtags(&self) -> bool {
        self.hashtags
    }

    pub fn emoji(&self) -> bool {
        self.emoji
    }

    pub fn call_to_action(&self) -> bool {
        self.call_to_action
    }
}

/// Builder for [`ContentRequest`].
#[derive(Debug, Clone)]
pub struct ContentRequestBuilder {
    request: ContentRequest,
}

impl ContentRequestBuilder {
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.request.content_type = content_type;
        self
    }

    /// Sets the audience industry. Blank values keep the default industry.
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        let industry = industry.into();
        if !industry.trim().is_empty() {
            self.request.industry = industry.trim().to_lowercase();
        }
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.request.tone = tone;
        self
    }

    pub fn length(mut self, length: Length) -> Self {
        self.request.length = length;
        self
    }

    pub fn hashtags(mut self, enabled: bool) -> Self {
        self.request.hashtags = enabled;
        self
    }

    pub fn emoji(mut self, enabled: bool) -> Self {
        self.request.emoji = enabled;
        self
    }

    pub fn call_to_action(mut self, enabled: bool) -> Self {
        self.request.call_to_action = enabled;
        self
    }

    pub fn build(self) -> ContentRequest {
        self.request
    }
}

/// Structured output of the drafting, optimization, and refinement stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// The post body.
    pub content: String,
    /// Hashtags without the leading `#`, in display order.
    pub hashtags: Vec<String>,
    /// Suggested posting slot, e.g. "Tuesday 9 AM".
    pub suggested_time: String,
    /// Platform-specific optimization tips.
    pub linkedin_tips: Vec<String>,
}

/// Advisory tips produced by the engagement stage (at most five, in order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementTips(Vec<String>);

impl EngagementTips {
    /// Splits free-form backend text into tips: one per non-empty line,
    /// trimmed, truncated to [`MAX_ENGAGEMENT_TIPS`].
    pub fn from_text(text: &str) -> Self {
        Self(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .take(MAX_ENGAGEMENT_TIPS)
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Result of the first-draft pipeline: final content plus advisory tips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentResponse {
    /// Output of the optimization stage (platform tips included).
    pub generated: GeneratedContent,
    /// Output of the advisory stage.
    pub engagement_tips: EngagementTips,
    /// Identifier of the persisted draft.
    pub post_id: String,
}

/// Lifecycle status of a persisted post.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

/// A post about to be written to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: UserId,
    pub content: String,
    pub post_type: String,
    pub status: PostStatus,
    pub ai_generated: bool,
    pub topic: String,
    pub industry: String,
    pub tone: String,
    pub hashtags: Vec<String>,
    pub engagement_tips: Vec<String>,
    pub linkedin_tips: Vec<String>,
    pub suggested_time: String,
}

/// A persisted post record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: UserId,
    pub content: String,
    pub post_type: String,
    pub status: PostStatus,
    pub ai_generated: bool,
    pub topic: String,
    pub industry: String,
    pub tone: String,
    pub hashtags: Vec<String>,
    pub engagement_tips: Vec<String>,
    pub linkedin_tips: Vec<String>,
    pub suggested_time: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Chat-side profile of a user, as delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    /// Set once the post-connection greeting has been delivered.
    pub welcomed_after_connect: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Profile data returned by the identity provider for a connected account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl ConnectionProfile {
    /// Full display name: `name`, else `given_name family_name`, else `None`.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            return Some(name.to_string());
        }
        let joined = [self.given_name.as_deref(), self.family_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }
}

/// A platform account connection owned by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConnection {
    pub user_id: UserId,
    pub profile: ConnectionProfile,
    pub connected_at: String,
    pub expires_at: Option<String>,
}

/// A request to the text-generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Instruction (system) text.
    pub system_prompt: String,
    /// User-turn text.
    pub user_prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Raw textual answer of the text-generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub content: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn builder_defaults_match_conversation_defaults() {
        let request = ContentRequest::builder(UserId(1), "launch day").build();
        assert_eq!(request.industry(), "general");
        assert_eq!(request.tone(), Tone::Professional);
        assert_eq!(request.length(), Length::Medium);
        assert_eq!(request.content_type(), ContentType::Post);
        assert!(request.hashtags() && request.emoji() && request.call_to_action());
    }

    #[test]
    fn builder_ignores_blank_industry() {
        let request = ContentRequest::builder(UserId(1), "x")
            .industry("   ")
            .build();
        assert_eq!(request.industry(), "general");

        let request = ContentRequest::builder(UserId(1), "x")
            .industry(" Technology ")
            .build();
        assert_eq!(request.industry(), "technology");
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(Tone::from_str("Casual").unwrap(), Tone::Casual);
        assert_eq!(Length::from_str("LONG").unwrap(), Length::Long);
        assert_eq!(ContentType::from_str("carousel").unwrap(), ContentType::Carousel);
        assert!(Tone::from_str("sarcastic").is_err());
        assert_eq!(Tone::Thoughtful.to_string(), "thoughtful");
    }

    #[test]
    fn length_bands() {
        assert_eq!(Length::Short.word_range(), (100, 200));
        assert_eq!(Length::Medium.word_range(), (200, 400));
        assert_eq!(Length::Long.word_range(), (400, 600));
        assert_eq!(Length::Medium.approx_words(), 300);
    }

    #[test]
    fn engagement_tips_skip_blank_lines_and_truncate() {
        let tips = EngagementTips::from_text("one\n\n  two  \nthree\nfour\n\nfive\nsix\nseven");
        assert_eq!(tips.as_slice(), ["one", "two", "three", "four", "five"]);
        assert!(EngagementTips::from_text("  \n \n").is_empty());
    }

    #[test]
    fn connection_display_name_fallbacks() {
        let profile = ConnectionProfile {
            name: Some("Ada Lovelace".into()),
            ..Default::default()
        };
        assert_eq!(profile.display_name().as_deref(), Some("Ada Lovelace"));

        let profile = ConnectionProfile {
            given_name: Some("Ada".into()),
            family_name: Some("Lovelace".into()),
            ..Default::default()
        };
        assert_eq!(profile.display_name().as_deref(), Some("Ada Lovelace"));

        assert_eq!(ConnectionProfile::default().display_name(), None);
    }

    #[test]
    fn post_status_serializes_lowercase() {
        assert_eq!(PostStatus::Draft.to_string(), "draft");
        let json = serde_json::to_string(&PostStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
    }
}
