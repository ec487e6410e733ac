// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory post and user store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use postcraft_core::types::{NewPost, Post, PostStatus, UserId, UserProfile, UserRecord};
use postcraft_core::{PostStore, PostcraftError, UserStore};

/// Keeps posts and users in memory. Writes can be switched to fail to
/// simulate an unreachable persistence backend.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    posts: Arc<Mutex<Vec<Post>>>,
    users: Arc<Mutex<HashMap<UserId, UserRecord>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of stored posts in insertion order.
    pub async fn posts(&self) -> Vec<Post> {
        self.posts.lock().await.clone()
    }

    pub async fn post_count(&self) -> usize {
        self.posts.lock().await.len()
    }

    fn check(&self) -> Result<(), PostcraftError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PostcraftError::Storage {
                source: "in-memory store set to fail".into(),
            });
        }
        Ok(())
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn save_post(&self, post: NewPost) -> Result<String, PostcraftError> {
        self.check()?;
        let id = uuid::Uuid::new_v4().to_string();
        let ts = now();
        self.posts.lock().await.push(Post {
            id: id.clone(),
            user_id: post.user_id,
            content: post.content,
            post_type: post.post_type,
            status: post.status,
            ai_generated: post.ai_generated,
            topic: post.topic,
            industry: post.industry,
            tone: post.tone,
            hashtags: post.hashtags,
            engagement_tips: post.engagement_tips,
            linkedin_tips: post.linkedin_tips,
            suggested_time: post.suggested_time,
            created_at: ts.clone(),
            updated_at: ts,
        });
        Ok(id)
    }

    async fn list_posts(
        &self,
        user_id: UserId,
        status: PostStatus,
        limit: usize,
    ) -> Result<Vec<Post>, PostcraftError> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id && p.status == status)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_posts(
        &self,
        user_id: UserId,
        status: PostStatus,
    ) -> Result<usize, PostcraftError> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .filter(|p| p.user_id == user_id && p.status == status)
            .count())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn save_user(&self, profile: &UserProfile) -> Result<(), PostcraftError> {
        self.check()?;
        let mut users = self.users.lock().await;
        let ts = now();
        users
            .entry(profile.user_id)
            .and_modify(|record| {
                record.username = profile.username.clone();
                record.first_name = profile.first_name.clone();
                record.last_name = profile.last_name.clone();
                record.updated_at = ts.clone();
            })
            .or_insert_with(|| UserRecord {
                user_id: profile.user_id,
                username: profile.username.clone(),
                first_name: profile.first_name.clone(),
                last_name: profile.last_name.clone(),
                welcomed_after_connect: false,
                created_at: ts.clone(),
                updated_at: ts.clone(),
            });
        Ok(())
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<UserRecord>, PostcraftError> {
        self.check()?;
        Ok(self.users.lock().await.get(&user_id).cloned())
    }

    async fn mark_welcomed(&self, user_id: UserId) -> Result<(), PostcraftError> {
        self.check()?;
        if let Some(record) = self.users.lock().await.get_mut(&user_id) {
            record.welcomed_after_connect = true;
            record.updated_at = now();
        }
        Ok(())
    }
}
