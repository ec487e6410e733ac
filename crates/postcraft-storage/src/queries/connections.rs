// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform account connections.
//!
//! Rows are produced by the account connection flow; the bot reads them.

use postcraft_core::types::{ConnectionProfile, PlatformConnection, UserId};
use postcraft_core::PostcraftError;
use rusqlite::params;

use crate::database::{Database, map_tr_err};

pub async fn get_connection(
    db: &Database,
    user_id: UserId,
) -> Result<Option<PlatformConnection>, PostcraftError> {
    db.connection()
        .call(move |conn| -> Result<Option<PlatformConnection>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT user_id, profile, connected_at, expires_at
                 FROM platform_connections WHERE user_id = ?1",
                params![user_id.0],
                |row| {
                    let raw: String = row.get(1)?;
                    // A malformed profile still counts as a connection.
                    let profile: ConnectionProfile =
                        serde_json::from_str(&raw).unwrap_or_default();
                    Ok(PlatformConnection {
                        user_id: UserId(row.get(0)?),
                        profile,
                        connected_at: row.get(2)?,
                        expires_at: row.get(3)?,
                    })
                },
            );
            match result {
                Ok(connection) => Ok(Some(connection)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace a connection row.
pub async fn save_connection(
    db: &Database,
    connection: &PlatformConnection,
) -> Result<(), PostcraftError> {
    let connection = connection.clone();
    let profile = serde_json::to_string(&connection.profile).map_err(|e| {
        PostcraftError::Storage {
            source: Box::new(e),
        }
    })?;
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT OR REPLACE INTO platform_connections (user_id, profile, connected_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    connection.user_id.0,
                    profile,
                    connection.connected_at,
                    connection.expires_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn connection_round_trip() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("conn.db").to_str().unwrap(), true)
            .await
            .unwrap();

        assert!(get_connection(&db, UserId(5)).await.unwrap().is_none());

        let connection = PlatformConnection {
            user_id: UserId(5),
            profile: ConnectionProfile {
                given_name: Some("Grace".into()),
                family_name: Some("Hopper".into()),
                email: Some("grace@example.org".into()),
                ..Default::default()
            },
            connected_at: "2026-01-01T00:00:00Z".into(),
            expires_at: Some("2026-03-01T00:00:00Z".into()),
        };
        save_connection(&db, &connection).await.unwrap();

        let loaded = get_connection(&db, UserId(5)).await.unwrap().unwrap();
        assert_eq!(loaded, connection);
        assert_eq!(loaded.profile.display_name().as_deref(), Some("Grace Hopper"));
    }
}
