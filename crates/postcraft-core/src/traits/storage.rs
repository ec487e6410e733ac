// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence traits for drafts and user records.

use async_trait::async_trait;

use crate::error::PostcraftError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewPost, Post, PostStatus, UserId, UserProfile, UserRecord};

/// Store for generated drafts.
///
/// Kept separate from [`StorageAdapter`] so the pipeline can depend on the
/// narrow persistence surface it actually uses.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persists a post and returns its identifier.
    async fn save_post(&self, post: NewPost) -> Result<String, PostcraftError>;

    /// Lists a user's posts with the given status, newest first, at most
    /// `limit` of them.
    async fn list_posts(
        &self,
        user_id: UserId,
        status: PostStatus,
        limit: usize,
    ) -> Result<Vec<Post>, PostcraftError>;

    /// Counts a user's posts with the given status.
    async fn count_posts(&self, user_id: UserId, status: PostStatus)
    -> Result<usize, PostcraftError>;
}

/// Store for chat user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts or updates a user. Never clears the welcomed flag.
    async fn save_user(&self, profile: &UserProfile) -> Result<(), PostcraftError>;

    async fn get_user(&self, user_id: UserId) -> Result<Option<UserRecord>, PostcraftError>;

    /// Records that the post-connection greeting was delivered.
    async fn mark_welcomed(&self, user_id: UserId) -> Result<(), PostcraftError>;
}

/// Adapter for storage and persistence backends.
#[async_trait]
pub trait StorageAdapter: PluginAdapter + PostStore + UserStore {
    /// Initializes the storage backend (migrations, pragmas).
    async fn initialize(&self) -> Result<(), PostcraftError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), PostcraftError>;
}
