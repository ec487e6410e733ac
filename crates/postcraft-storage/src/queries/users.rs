// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat user records.

use postcraft_core::types::{UserId, UserProfile, UserRecord};
use postcraft_core::PostcraftError;
use rusqlite::params;

use crate::database::{Database, map_tr_err, now_timestamp};

/// Insert or update a user's chat profile.
///
/// The welcomed flag is left untouched on update.
pub async fn save_user(db: &Database, profile: &UserProfile) -> Result<(), PostcraftError> {
    let profile = profile.clone();
    let now = now_timestamp();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (user_id, username, first_name, last_name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET
                     username = excluded.username,
                     first_name = excluded.first_name,
                     last_name = excluded.last_name,
                     updated_at = excluded.updated_at",
                params![
                    profile.user_id.0,
                    profile.username,
                    profile.first_name,
                    profile.last_name,
                    now,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_user(db: &Database, user_id: UserId) -> Result<Option<UserRecord>, PostcraftError> {
    db.connection()
        .call(move |conn| -> Result<Option<UserRecord>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT user_id, username, first_name, last_name, welcomed_after_connect, created_at, updated_at
                 FROM users WHERE user_id = ?1",
                params![user_id.0],
                |row| {
                    Ok(UserRecord {
                        user_id: UserId(row.get(0)?),
                        username: row.get(1)?,
                        first_name: row.get(2)?,
                        last_name: row.get(3)?,
                        welcomed_after_connect: row.get(4)?,
                        created_at: row.get(5)?,
                        updated_at: row.get(6)?,
                    })
                },
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Set the welcomed flag. A user without a record is a no-op.
pub async fn mark_welcomed(db: &Database, user_id: UserId) -> Result<(), PostcraftError> {
    let now = now_timestamp();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "UPDATE users SET welcomed_after_connect = 1, updated_at = ?2 WHERE user_id = ?1",
                params![user_id.0, now],
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

    fn profile(first_name: &str) -> UserProfile {
        UserProfile {
            user_id: UserId(11),
            username: Some("ada".into()),
            first_name: first_name.into(),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn upsert_preserves_welcomed_flag() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("users.db").to_str().unwrap(), true)
            .await
            .unwrap();

        assert!(get_user(&db, UserId(11)).await.unwrap().is_none());

        save_user(&db, &profile("Ada")).await.unwrap();
        let user = get_user(&db, UserId(11)).await.unwrap().unwrap();
        assert!(!user.welcomed_after_connect);

        mark_welcomed(&db, UserId(11)).await.unwrap();
        save_user(&db, &profile("Augusta")).await.unwrap();

        let user = get_user(&db, UserId(11)).await.unwrap().unwrap();
        assert_eq!(user.first_name, "Augusta");
        assert!(user.welcomed_after_connect);
    }
}
