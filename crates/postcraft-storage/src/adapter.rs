// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage and connection traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use postcraft_config::model::StorageConfig;
use postcraft_core::types::{
    NewPost, PlatformConnection, Post, PostStatus, UserId, UserProfile, UserRecord,
};
use postcraft_core::{
    AdapterType, ConnectionAdapter, HealthStatus, PluginAdapter, PostStore, PostcraftError,
    StorageAdapter, UserStore,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed storage adapter.
///
/// The database is opened on [`StorageAdapter::initialize`]; every other
/// call fails with a storage error until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, PostcraftError> {
        self.db.get().ok_or_else(|| PostcraftError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Record a platform connection. Used by the account connection flow.
    pub async fn save_connection(
        &self,
        connection: &PlatformConnection,
    ) -> Result<(), PostcraftError> {
        queries::connections::save_connection(self.db()?, connection).await
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PostcraftError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> { conn.execute_batch("SELECT 1;") })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PostcraftError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PostStore for SqliteStorage {
    async fn save_post(&self, post: NewPost) -> Result<String, PostcraftError> {
        let user_id = post.user_id;
        let id = queries::posts::save_post(self.db()?, post).await?;
        debug!(user_id = %user_id, post_id = %id, "post saved");
        Ok(id)
    }

    async fn list_posts(
        &self,
        user_id: UserId,
        status: PostStatus,
        limit: usize,
    ) -> Result<Vec<Post>, PostcraftError> {
        queries::posts::get_user_posts(self.db()?, user_id, status, limit).await
    }

    async fn count_posts(
        &self,
        user_id: UserId,
        status: PostStatus,
    ) -> Result<usize, PostcraftError> {
        queries::posts::count_user_posts(self.db()?, user_id, status).await
    }
}

#[async_trait]
impl UserStore for SqliteStorage {
    async fn save_user(&self, profile: &UserProfile) -> Result<(), PostcraftError> {
        queries::users::save_user(self.db()?, profile).await
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<UserRecord>, PostcraftError> {
        queries::users::get_user(self.db()?, user_id).await
    }

    async fn mark_welcomed(&self, user_id: UserId) -> Result<(), PostcraftError> {
        queries::users::mark_welcomed(self.db()?, user_id).await
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), PostcraftError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| PostcraftError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), PostcraftError> {
        self.db()?.checkpoint().await
    }
}

#[async_trait]
impl ConnectionAdapter for SqliteStorage {
    async fn get_connection(
        &self,
        user_id: UserId,
    ) -> Result<Option<PlatformConnection>, PostcraftError> {
        queries::connections::get_connection(self.db()?, user_id).await
    }
}
