// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity collaborator: platform account connections.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::PostcraftError;
use crate::types::{PlatformConnection, UserId};

/// Read access to a user's platform account connection.
#[async_trait]
pub trait ConnectionAdapter: Send + Sync {
    async fn get_connection(
        &self,
        user_id: UserId,
    ) -> Result<Option<PlatformConnection>, PostcraftError>;

    /// A user is connected when a connection exists and has not expired.
    async fn is_connected(&self, user_id: UserId) -> Result<bool, PostcraftError> {
        let connection = self.get_connection(user_id).await?;
        Ok(connection.is_some_and(|c| connection_is_live(&c, Utc::now())))
    }
}

/// Returns true when `connection` is still valid at `now`.
///
/// A connection without an expiry never expires; an unparseable expiry
/// counts as expired.
pub fn connection_is_live(connection: &PlatformConnection, now: DateTime<Utc>) -> bool {
    match connection.expires_at.as_deref() {
        None => true,
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .is_ok_and(|expires| expires.with_timezone(&Utc) > now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConnectionProfile;

    fn connection(expires_at: Option<&str>) -> PlatformConnection {
        PlatformConnection {
            user_id: UserId(1),
            profile: ConnectionProfile::default(),
            connected_at: "2026-01-01T00:00:00Z".into(),
            expires_at: expires_at.map(str::to_string),
        }
    }

    #[test]
    fn expiry_is_compared_against_now() {
        let now = DateTime::parse_from_rfc3339("2026-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(connection_is_live(&connection(Some("2026-07-01T00:00:00Z")), now));
        assert!(!connection_is_live(&connection(Some("2026-05-01T00:00:00Z")), now));
        assert!(!connection_is_live(&connection(Some("not a date")), now));
        assert!(connection_is_live(&connection(None), now));
    }

    struct Fixed(Option<PlatformConnection>);

    #[async_trait]
    impl ConnectionAdapter for Fixed {
        async fn get_connection(
            &self,
            _user_id: UserId,
        ) -> Result<Option<PlatformConnection>, PostcraftError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn is_connected_requires_a_connection() {
        assert!(!Fixed(None).is_connected(UserId(1)).await.unwrap());
        let live = Fixed(Some(connection(Some("2999-01-01T00:00:00Z"))));
        assert!(live.is_connected(UserId(1)).await.unwrap());
    }
}
