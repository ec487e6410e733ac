// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation context and the store that holds it.
//!
//! Session state is a cache: it lives for the process lifetime only and its
//! loss costs the user one more wizard pass.

use dashmap::DashMap;
use strum::Display;

use postcraft_core::types::{ContentRequest, DEFAULT_INDUSTRY, Length, Tone, UserId};

/// Where the user is in the configuration wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum WizardStep {
    /// No wizard in progress.
    #[default]
    Idle,
    /// Waiting for an industry choice.
    Industry,
    /// Industry chosen, waiting for a tone.
    Tone,
    /// Tone chosen, waiting for a length.
    Length,
    /// All choices made, waiting for the generate action.
    Ready,
}

/// Wizard choices collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRequest {
    pub industry: Option<String>,
    pub tone: Option<Tone>,
    pub length: Option<Length>,
}

/// Parameters of the most recently delivered generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastRequest {
    pub topic: String,
    pub industry: String,
    pub tone: Tone,
    pub length: Length,
}

impl LastRequest {
    pub fn to_request(&self, user_id: UserId) -> ContentRequest {
        ContentRequest::builder(user_id, self.topic.clone())
            .industry(self.industry.clone())
            .tone(self.tone)
            .length(self.length)
            .build()
    }
}

/// Conversation context of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub wizard_step: WizardStep,
    pub pending: PendingRequest,
    pub last_request: Option<LastRequest>,
    pub last_draft: Option<String>,
}

impl SessionState {
    pub fn wizard_active(&self) -> bool {
        self.wizard_step != WizardStep::Idle
    }

    /// Industry, tone, and length of the last delivery, or the conversation
    /// defaults when nothing has been delivered yet.
    pub fn preferences(&self) -> (String, Tone, Length) {
        match &self.last_request {
            Some(last) => (last.industry.clone(), last.tone, last.length),
            None => (
                DEFAULT_INDUSTRY.to_string(),
                Tone::default(),
                Length::default(),
            ),
        }
    }

    pub fn start_wizard(&mut self) {
        self.wizard_step = WizardStep::Industry;
        self.pending = PendingRequest::default();
    }

    pub fn finish_wizard(&mut self) {
        self.wizard_step = WizardStep::Idle;
        self.pending = PendingRequest::default();
    }

    /// Overwrites the last request and draft after a successful generation.
    pub fn record_delivery(&mut self, request: LastRequest, draft: String) {
        self.last_request = Some(request);
        self.last_draft = Some(draft);
    }
}

/// Keyed storage of [`SessionState`]. Implementations must make `get` and
/// `put` atomic per key; concurrent writes for one user resolve last-write-wins.
pub trait SessionStore: Send + Sync {
    fn get(&self, user_id: UserId) -> Option<SessionState>;

    fn put(&self, user_id: UserId, state: SessionState);
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<UserId, SessionState>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user_id: UserId) -> Option<SessionState> {
        self.sessions.get(&user_id).map(|entry| entry.value().clone())
    }

    fn put(&self, user_id: UserId, state: SessionState) {
        self.sessions.insert(user_id, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_default_without_history() {
        let state = SessionState::default();
        assert_eq!(
            state.preferences(),
            ("general".to_string(), Tone::Professional, Length::Medium)
        );
    }

    #[test]
    fn preferences_follow_last_request() {
        let mut state = SessionState::default();
        state.record_delivery(
            LastRequest {
                topic: "X".into(),
                industry: "technology".into(),
                tone: Tone::Casual,
                length: Length::Short,
            },
            "draft".into(),
        );
        assert_eq!(
            state.preferences(),
            ("technology".to_string(), Tone::Casual, Length::Short)
        );
        assert_eq!(state.last_draft.as_deref(), Some("draft"));
    }

    #[test]
    fn wizard_start_resets_pending_choices() {
        let mut state = SessionState {
            wizard_step: WizardStep::Ready,
            pending: PendingRequest {
                industry: Some("finance".into()),
                tone: Some(Tone::Thoughtful),
                length: Some(Length::Long),
            },
            ..SessionState::default()
        };
        state.start_wizard();
        assert_eq!(state.wizard_step, WizardStep::Industry);
        assert_eq!(state.pending, PendingRequest::default());
        assert!(state.wizard_active());
        state.finish_wizard();
        assert!(!state.wizard_active());
    }

    #[test]
    fn store_is_keyed_by_user() {
        let store = InMemorySessionStore::new();
        assert!(store.get(UserId(1)).is_none());

        let mut state = SessionState::default();
        state.start_wizard();
        store.put(UserId(1), state.clone());

        assert_eq!(store.get(UserId(1)), Some(state));
        assert!(store.get(UserId(2)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn last_request_rebuilds_content_request() {
        let last = LastRequest {
            topic: "X".into(),
            industry: "tech".into(),
            tone: Tone::Casual,
            length: Length::Short,
        };
        let request = last.to_request(UserId(9));
        assert_eq!(request.topic(), "X");
        assert_eq!(request.industry(), "tech");
        assert_eq!(request.tone(), Tone::Casual);
        assert_eq!(request.length(), Length::Short);
        assert_eq!(request.user_id(), UserId(9));
    }
}
