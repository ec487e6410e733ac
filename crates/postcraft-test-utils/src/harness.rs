// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full conversation stack (router, orchestrator,
//! SQLite storage in a temp directory) around a [`MockProvider`] and
//! [`StaticConnections`]. Provides `send()` to drive the router in tests.

use std::sync::Arc;

use postcraft_config::model::{LinkedInConfig, StorageConfig};
use postcraft_core::types::{ConnectionProfile, UserId, UserProfile};
use postcraft_core::{PostcraftError, StorageAdapter};
use postcraft_engine::Orchestrator;
use postcraft_router::{ConversationRouter, InMemorySessionStore, Inbound, Reply};
use postcraft_storage::SqliteStorage;

use crate::mock_connections::StaticConnections;
use crate::mock_provider::{MockProvider, MockReply};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<MockReply>,
    linkedin: LinkedInConfig,
    connected: Option<ConnectionProfile>,
    temperature: f32,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            linkedin: LinkedInConfig::default(),
            connected: None,
            temperature: 0.7,
        }
    }

    /// Set mock provider text replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.replies = responses.into_iter().map(MockReply::Text).collect();
        self
    }

    /// Set mock provider replies, failures included.
    pub fn with_mock_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies = replies;
        self
    }

    pub fn with_linkedin(mut self, linkedin: LinkedInConfig) -> Self {
        self.linkedin = linkedin;
        self
    }

    /// Start with the test user already connected.
    pub fn connected_as(mut self, profile: ConnectionProfile) -> Self {
        self.connected = Some(profile);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, PostcraftError> {
        // Create temp directory for SQLite
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| PostcraftError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        storage.initialize().await?;
        let storage = Arc::new(storage);

        let mock_provider = MockProvider::with_replies(self.replies);
        let connections = StaticConnections::new();
        let profile = UserProfile {
            user_id: UserId(1001),
            username: Some("tester".to_string()),
            first_name: "Tess".to_string(),
            last_name: None,
        };
        if let Some(connection) = self.connected {
            connections.connect(profile.user_id, connection);
        }

        let orchestrator = Orchestrator::new(
            Arc::new(mock_provider.clone()),
            storage.clone(),
            self.temperature,
        );
        let sessions = Arc::new(InMemorySessionStore::new());
        let router = ConversationRouter::new(
            Arc::new(orchestrator),
            sessions.clone(),
            storage.clone(),
            storage.clone(),
            Arc::new(connections.clone()),
            self.linkedin,
        );

        Ok(TestHarness {
            mock_provider,
            connections,
            storage,
            sessions,
            router,
            profile,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock adapters and temp storage.
pub struct TestHarness {
    /// The mock text-generation backend.
    pub mock_provider: MockProvider,
    /// Platform connections, editable during a test.
    pub connections: StaticConnections,
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    pub sessions: Arc<InMemorySessionStore>,
    pub router: ConversationRouter,
    /// The user every `send` speaks as.
    pub profile: UserProfile,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Send one event as the test user.
    pub async fn send(&self, inbound: Inbound) -> Vec<Reply> {
        self.router.handle(&self.profile, inbound).await
    }

    /// Send free text and return the text of the last reply.
    pub async fn send_text(&self, text: &str) -> String {
        self.send(Inbound::Text(text.to_string()))
            .await
            .pop()
            .map(|reply| reply.text)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcraft_core::PostStore;
    use postcraft_core::types::PostStatus;

    #[tokio::test]
    async fn harness_drives_router_end_to_end() {
        let harness = TestHarness::builder()
            .with_mock_responses(vec![
                r#"{"content": "Hello LinkedIn", "hashtags": ["hello"], "suggested_time": "Monday 9 AM", "linkedin_tips": ["Be brief"]}"#.to_string(),
                "not json".to_string(),
                "Reply to comments".to_string(),
            ])
            .build()
            .await
            .unwrap();

        let text = harness.send_text("saying hello").await;
        assert!(text.contains("Hello LinkedIn"));
        assert!(text.contains("#hello"));

        let posts = harness
            .storage
            .list_posts(harness.profile.user_id, PostStatus::Draft, 10)
            .await
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(harness.mock_provider.call_count().await, 3);
    }
}
