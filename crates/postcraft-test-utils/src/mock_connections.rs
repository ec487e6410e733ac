// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed platform connections for router tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use postcraft_core::types::{ConnectionProfile, PlatformConnection, UserId};
use postcraft_core::{ConnectionAdapter, PostcraftError};

/// Connection adapter backed by a map that tests fill in directly.
#[derive(Clone, Default)]
pub struct StaticConnections {
    connections: Arc<RwLock<HashMap<UserId, PlatformConnection>>>,
}

impl StaticConnections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user as connected with a non-expiring connection.
    pub fn connect(&self, user_id: UserId, profile: ConnectionProfile) {
        self.insert(PlatformConnection {
            user_id,
            profile,
            connected_at: chrono::Utc::now().to_rfc3339(),
            expires_at: None,
        });
    }

    pub fn insert(&self, connection: PlatformConnection) {
        if let Ok(mut map) = self.connections.write() {
            map.insert(connection.user_id, connection);
        }
    }
}

#[async_trait]
impl ConnectionAdapter for StaticConnections {
    async fn get_connection(
        &self,
        user_id: UserId,
    ) -> Result<Option<PlatformConnection>, PostcraftError> {
        let map = self
            .connections
            .read()
            .map_err(|e| PostcraftError::Internal(e.to_string()))?;
        Ok(map.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn expired_connection_is_not_connected() {
        let connections = StaticConnections::new();
        connections.insert(PlatformConnection {
            user_id: UserId(3),
            profile: ConnectionProfile::default(),
            connected_at: "2020-01-01T00:00:00Z".into(),
            expires_at: Some("2020-02-01T00:00:00Z".into()),
        });
        connections.connect(UserId(4), ConnectionProfile::default());

        assert!(!connections.is_connected(UserId(3)).await.unwrap());
        assert!(connections.is_connected(UserId(4)).await.unwrap());
        assert!(!connections.is_connected(UserId(5)).await.unwrap());
    }
}
