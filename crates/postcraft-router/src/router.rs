// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation state machine.
//!
//! Two input channels feed the router. Free text (and photo captions) is
//! classified by [`classify`] and dispatched to the first-draft or refinement
//! pipeline. Button presses move the configuration wizard through
//! industry, tone, and length, and only the explicit generate action turns
//! the wizard's choices into content.

use std::sync::Arc;

use chrono::Timelike;
use tracing::{debug, info, warn};

use postcraft_config::model::LinkedInConfig;
use postcraft_core::types::{
    ContentRequest, ContentType, NewPost, PlatformConnection, PostStatus, UserId, UserProfile,
};
use postcraft_core::{ConnectionAdapter, PostStore, PostcraftError, UserStore};
use postcraft_engine::{ContentPipeline, ContentTemplates, RefineRequest};

use crate::action::Action;
use crate::cues::{Intent, apply_overrides, classify};
use crate::greeting::connect_greeting;
use crate::menus;
use crate::reply::{Reply, render_post};
use crate::session::{LastRequest, SessionState, SessionStore, WizardStep};

/// Topic used by the wizard's generate action.
pub const WIZARD_DEFAULT_TOPIC: &str = "Professional insights and industry trends";

pub const GENERATION_FAILED: &str = "❌ Content Generation Failed\n\nSorry, I couldn't generate content right now. Please try again later.";
pub const NOTHING_TO_REGENERATE: &str =
    "I don't have your last request yet. Please describe what you'd like me to write.";
pub const EMPTY_MESSAGE: &str =
    "Please describe what you'd like me to write for your LinkedIn post.";
pub const PHOTO_WITHOUT_CAPTION: &str = "Got the photo! Please add a caption describing the event or key details, and I'll craft a post.";
pub const UNKNOWN_ACTION: &str = "❌ Unknown button pressed";
pub const DRAFTS_UNAVAILABLE: &str =
    "❌ Couldn't load your drafts right now. Please try again later.";

const DRAFT_HEADER: &str = "🤖 Draft based on your request:";
const WIZARD_HEADER: &str = "🤖 AI-Generated LinkedIn Post";
const REFINED_HEADER: &str = "✏️ Refined draft:";
const REGENERATED_NOTE: &str = "(🔄 Regenerated)";

/// One event from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// The start command.
    Start,
    Text(String),
    Photo { caption: Option<String> },
    /// Raw callback data of a pressed button.
    Callback(String),
}

/// Routes chat events for every user. Holds no per-user state itself; all
/// of it goes through the [`SessionStore`].
pub struct ConversationRouter {
    pipeline: Arc<dyn ContentPipeline>,
    sessions: Arc<dyn SessionStore>,
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
    connections: Arc<dyn ConnectionAdapter>,
    linkedin: LinkedInConfig,
}

impl ConversationRouter {
    pub fn new(
        pipeline: Arc<dyn ContentPipeline>,
        sessions: Arc<dyn SessionStore>,
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserStore>,
        connections: Arc<dyn ConnectionAdapter>,
        linkedin: LinkedInConfig,
    ) -> Self {
        Self {
            pipeline,
            sessions,
            posts,
            users,
            connections,
            linkedin,
        }
    }

    /// Handles one event and returns the replies to send, in order.
    pub async fn handle(&self, profile: &UserProfile, inbound: Inbound) -> Vec<Reply> {
        let user_id = profile.user_id;
        debug!(user_id = %user_id, event = ?inbound, "inbound event");
        match inbound {
            Inbound::Start => {
                if let Err(e) = self.users.save_user(profile).await {
                    warn!(user_id = %user_id, error = %e, "failed to save user");
                }
                let connected = self.is_connected(user_id).await;
                let mut replies = vec![menus::main_menu(&profile.first_name, connected)];
                replies.extend(self.greet_once(profile).await);
                replies
            }
            Inbound::Text(text) => {
                let mut replies: Vec<Reply> = self.greet_once(profile).await.into_iter().collect();
                replies.push(self.handle_text(user_id, &text).await);
                replies
            }
            Inbound::Photo { caption } => {
                let mut replies: Vec<Reply> = self.greet_once(profile).await.into_iter().collect();
                let caption = caption.as_deref().map(str::trim).unwrap_or_default();
                if caption.is_empty() {
                    replies.push(Reply::text(PHOTO_WITHOUT_CAPTION));
                } else {
                    let text = format!("Photo attached. Context: {caption}");
                    replies.push(self.handle_text(user_id, &text).await);
                }
                replies
            }
            Inbound::Callback(data) => match Action::parse(&data) {
                Some(action) => vec![self.handle_action(profile, action).await],
                None => {
                    warn!(user_id = %user_id, data = %data, "unknown callback data");
                    vec![Reply::text(UNKNOWN_ACTION)]
                }
            },
        }
    }

    fn session(&self, user_id: UserId) -> SessionState {
        self.sessions.get(user_id).unwrap_or_default()
    }

    /// Free-text classification and dispatch.
    async fn handle_text(&self, user_id: UserId, text: &str) -> Reply {
        let session = self.session(user_id);
        let intent = classify(text, &session);
        debug!(user_id = %user_id, intent = ?intent, "classified message");

        match intent {
            Intent::Empty => Reply::text(EMPTY_MESSAGE),
            Intent::NothingToRegenerate => Reply::text(NOTHING_TO_REGENERATE),
            Intent::Regenerate => match session.last_request.clone() {
                Some(last) => {
                    self.create_and_record(user_id, session, last, DRAFT_HEADER, Some(REGENERATED_NOTE))
                        .await
                }
                None => Reply::text(NOTHING_TO_REGENERATE),
            },
            Intent::Refine => self.refine_and_record(user_id, session, text.trim()).await,
            Intent::NewTopic => {
                let (industry, tone, length) = session.preferences();
                let last = LastRequest {
                    topic: text.trim().to_string(),
                    industry,
                    tone,
                    length,
                };
                self.create_and_record(user_id, session, last, DRAFT_HEADER, None)
                    .await
            }
        }
    }

    /// Runs the first-draft pipeline. On success the session's last request
    /// and draft are overwritten; on failure nothing changes.
    async fn create_and_record(
        &self,
        user_id: UserId,
        mut session: SessionState,
        last: LastRequest,
        header: &str,
        note: Option<&str>,
    ) -> Reply {
        let request = last.to_request(user_id);
        match self.pipeline.create(&request).await {
            Ok(response) => {
                let text = render_post(
                    header,
                    &response.generated,
                    response.engagement_tips.as_slice(),
                    note,
                );
                session.record_delivery(last, response.generated.content);
                self.sessions.put(user_id, session);
                Reply::text(text)
            }
            Err(e) => generation_failed(user_id, &e),
        }
    }

    /// Runs the refinement pipeline on the last draft with keyword overrides
    /// applied, then persists the rewrite as a new draft.
    async fn refine_and_record(
        &self,
        user_id: UserId,
        mut session: SessionState,
        instruction: &str,
    ) -> Reply {
        let Some((request, last)) = plan_refinement(&session, instruction) else {
            debug!(user_id = %user_id, "refine intent without a previous draft");
            return Reply::text(GENERATION_FAILED);
        };
        let refined = match self.pipeline.refine(&request).await {
            Ok(refined) => refined,
            Err(e) => return generation_failed(user_id, &e),
        };

        let saved = self
            .posts
            .save_post(NewPost {
                user_id,
                content: refined.content.clone(),
                post_type: ContentType::Post.to_string(),
                status: PostStatus::Draft,
                ai_generated: true,
                topic: last.topic.clone(),
                industry: last.industry.clone(),
                tone: last.tone.to_string(),
                hashtags: refined.hashtags.clone(),
                engagement_tips: Vec::new(),
                linkedin_tips: refined.linkedin_tips.clone(),
                suggested_time: refined.suggested_time.clone(),
            })
            .await;
        match saved {
            Ok(post_id) => {
                info!(
                    user_id = %user_id,
                    post_id = %post_id,
                    tone = %last.tone,
                    length = %last.length,
                    "refined draft saved"
                );
            }
            Err(e) => return generation_failed(user_id, &e),
        }

        let text = render_post(REFINED_HEADER, &refined, &[], None);
        session.record_delivery(last, refined.content);
        self.sessions.put(user_id, session);
        Reply::text(text)
    }

    async fn handle_action(&self, profile: &UserProfile, action: Action) -> Reply {
        let user_id = profile.user_id;
        match action {
            Action::MainMenu => {
                let connected = self.is_connected(user_id).await;
                menus::main_menu(&profile.first_name, connected)
            }
            Action::Help => menus::help(),
            Action::ConnectAccount => {
                let (connection, connected) = self.connection(user_id).await;
                let url = menus::authorization_url(&self.linkedin, user_id);
                menus::connect(url, connection.as_ref(), connected)
            }
            Action::CheckStatus => {
                let (connection, connected) = self.connection(user_id).await;
                menus::status(connection.as_ref(), connected)
            }
            Action::ViewDrafts => match self.drafts_view(user_id).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "failed to list drafts");
                    Reply::text(DRAFTS_UNAVAILABLE)
                }
            },
            Action::StartWizard => {
                let mut session = self.session(user_id);
                session.start_wizard();
                self.sessions.put(user_id, session);
                menus::wizard_industries()
            }
            Action::SelectIndustry(industry) => {
                if !ContentTemplates::is_known_industry(&industry) {
                    warn!(user_id = %user_id, industry = %industry, "unknown industry selected");
                    return Reply::text(UNKNOWN_ACTION);
                }
                self.wizard_step(user_id, |session| {
                    session.pending.industry = Some(industry.clone());
                    session.wizard_step = WizardStep::Tone;
                    menus::wizard_tones(&industry)
                })
            }
            Action::SelectTone(tone) => self.wizard_step(user_id, |session| {
                session.pending.tone = Some(tone);
                session.wizard_step = WizardStep::Length;
                let (industry, _, _) = session.preferences();
                let industry = session.pending.industry.clone().unwrap_or(industry);
                menus::wizard_lengths(&industry, tone)
            }),
            Action::SelectLength(length) => self.wizard_step(user_id, |session| {
                session.pending.length = Some(length);
                session.wizard_step = WizardStep::Ready;
                let (industry, tone, length) = session.preferences();
                menus::wizard_ready(&session.pending, (&industry, tone, length))
            }),
            Action::Generate => self.wizard_generate(user_id).await,
            Action::SuggestTopics => {
                let session = self.session(user_id);
                let (industry, _, _) = session.preferences();
                let industry = session.pending.industry.unwrap_or(industry);
                match self.pipeline.suggest_topics(&industry).await {
                    Ok(topics) => menus::topic_ideas(&industry, &topics),
                    Err(e) => generation_failed(user_id, &e),
                }
            }
        }
    }

    /// Applies a wizard selection to an active session. Without one the
    /// selection refers to state that no longer exists.
    fn wizard_step(
        &self,
        user_id: UserId,
        apply: impl FnOnce(&mut SessionState) -> Reply,
    ) -> Reply {
        match self.sessions.get(user_id) {
            Some(mut session) if session.wizard_active() => {
                let reply = apply(&mut session);
                debug!(user_id = %user_id, step = %session.wizard_step, "wizard advanced");
                self.sessions.put(user_id, session);
                reply
            }
            _ => session_expired(user_id),
        }
    }

    async fn wizard_generate(&self, user_id: UserId) -> Reply {
        let mut session = match self.sessions.get(user_id) {
            Some(session) if session.wizard_active() => session,
            _ => return session_expired(user_id),
        };

        let (industry, tone, length) = session.preferences();
        let last = LastRequest {
            topic: WIZARD_DEFAULT_TOPIC.to_string(),
            industry: session.pending.industry.clone().unwrap_or(industry),
            tone: session.pending.tone.unwrap_or(tone),
            length: session.pending.length.unwrap_or(length),
        };
        let request: ContentRequest = last.to_request(user_id);

        match self.pipeline.create(&request).await {
            Ok(response) => {
                let text = render_post(
                    WIZARD_HEADER,
                    &response.generated,
                    response.engagement_tips.as_slice(),
                    None,
                );
                session.finish_wizard();
                session.record_delivery(last, response.generated.content);
                self.sessions.put(user_id, session);
                Reply::text(text)
            }
            Err(e) => generation_failed(user_id, &e),
        }
    }

    /// Newest drafts plus the total, so the view never loads full history.
    async fn drafts_view(&self, user_id: UserId) -> Result<Reply, PostcraftError> {
        let drafts = self
            .posts
            .list_posts(user_id, PostStatus::Draft, menus::DRAFTS_SHOWN)
            .await?;
        let total = self.posts.count_posts(user_id, PostStatus::Draft).await?;
        Ok(menus::drafts(&drafts, total))
    }

    async fn connection(&self, user_id: UserId) -> (Option<PlatformConnection>, bool) {
        let connection = match self.connections.get_connection(user_id).await {
            Ok(connection) => connection,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "connection lookup failed");
                None
            }
        };
        let connected = self.is_connected(user_id).await;
        (connection, connected)
    }

    async fn is_connected(&self, user_id: UserId) -> bool {
        self.connections
            .is_connected(user_id)
            .await
            .unwrap_or_else(|e| {
                warn!(user_id = %user_id, error = %e, "connection check failed");
                false
            })
    }

    /// The post-connection greeting, at most once per user.
    async fn greet_once(&self, profile: &UserProfile) -> Option<Reply> {
        let user_id = profile.user_id;
        if !self.is_connected(user_id).await {
            return None;
        }
        let record = match self.users.get_user(user_id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "user lookup failed");
                return None;
            }
        };
        match record {
            Some(record) if record.welcomed_after_connect => return None,
            Some(_) => {}
            None => {
                if let Err(e) = self.users.save_user(profile).await {
                    warn!(user_id = %user_id, error = %e, "failed to save user");
                    return None;
                }
            }
        }
        if let Err(e) = self.users.mark_welcomed(user_id).await {
            warn!(user_id = %user_id, error = %e, "failed to mark user welcomed");
        }
        info!(user_id = %user_id, "sent connect greeting");
        let hour = chrono::Local::now().hour();
        Some(Reply::text(connect_greeting(&profile.first_name, hour)))
    }
}

/// Builds the refinement call for the session's last draft, with keyword
/// overrides applied, and the request the rewrite will be recorded under.
/// `None` when there is no draft to refine.
fn plan_refinement(session: &SessionState, instruction: &str) -> Option<(RefineRequest, LastRequest)> {
    let previous = session.last_draft.clone()?;
    let (industry, tone, length) = session.preferences();
    let (tone, length) = apply_overrides(instruction, tone, length);
    let topic = session
        .last_request
        .as_ref()
        .map(|last| last.topic.clone())
        .unwrap_or_else(|| instruction.to_string());

    let request = RefineRequest {
        previous_content: previous,
        instruction: instruction.to_string(),
        industry: industry.clone(),
        tone,
        length,
    };
    let last = LastRequest {
        topic,
        industry,
        tone,
        length,
    };
    Some((request, last))
}

fn generation_failed(user_id: UserId, error: &PostcraftError) -> Reply {
    warn!(user_id = %user_id, error = %error, "generation failed");
    Reply::text(GENERATION_FAILED)
}

fn session_expired(user_id: UserId) -> Reply {
    let error = PostcraftError::SessionExpired { user_id: user_id.0 };
    debug!(error = %error, "wizard action without an active session");
    menus::session_expired()
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcraft_core::types::{Length, Tone};

    fn with_draft() -> SessionState {
        let mut session = SessionState::default();
        session.record_delivery(
            LastRequest {
                topic: "remote work".into(),
                industry: "technology".into(),
                tone: Tone::Professional,
                length: Length::Medium,
            },
            "Previous draft".into(),
        );
        session
    }

    #[test]
    fn refinement_needs_a_previous_draft() {
        assert!(plan_refinement(&SessionState::default(), "make it shorter").is_none());

        let mut session = with_draft();
        session.last_draft = None;
        assert!(plan_refinement(&session, "make it shorter").is_none());
    }

    #[test]
    fn refinement_applies_overrides_and_keeps_topic() {
        let (request, last) = plan_refinement(&with_draft(), "shorter and more casual").unwrap();
        assert_eq!(request.previous_content, "Previous draft");
        assert_eq!(request.instruction, "shorter and more casual");
        assert_eq!(request.industry, "technology");
        assert_eq!((request.tone, request.length), (Tone::Casual, Length::Short));
        assert_eq!(last.topic, "remote work");
        assert_eq!((last.tone, last.length), (Tone::Casual, Length::Short));
    }
}
