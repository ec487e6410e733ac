// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft persistence.

use std::str::FromStr;

use postcraft_core::types::{NewPost, Post, PostStatus, UserId};
use postcraft_core::PostcraftError;
use rusqlite::params;

use crate::database::{Database, map_tr_err, now_timestamp};
use crate::queries::{json_list, to_json};

const POST_COLUMNS: &str = "id, user_id, content, post_type, status, ai_generated, topic, industry, tone, \
     hashtags, engagement_tips, linkedin_tips, suggested_time, created_at, updated_at";

/// Insert a post and return its generated id.
pub async fn save_post(db: &Database, post: NewPost) -> Result<String, PostcraftError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = now_timestamp();
    let row_id = id.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                &format!(
                    "INSERT INTO posts ({POST_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)"
                ),
                params![
                    row_id,
                    post.user_id.0,
                    post.content,
                    post.post_type,
                    post.status.to_string(),
                    post.ai_generated,
                    post.topic,
                    post.industry,
                    post.tone,
                    to_json(&post.hashtags),
                    to_json(&post.engagement_tips),
                    to_json(&post.linkedin_tips),
                    post.suggested_time,
                    now,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    Ok(id)
}

/// A user's posts in `status`, newest first, at most `limit` of them.
pub async fn get_user_posts(
    db: &Database,
    user_id: UserId,
    status: PostStatus,
    limit: usize,
) -> Result<Vec<Post>, PostcraftError> {
    let status_text = status.to_string();
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| -> Result<Vec<Post>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {POST_COLUMNS} FROM posts WHERE user_id = ?1 AND status = ?2
                 ORDER BY created_at DESC, rowid DESC LIMIT ?3"
            ))?;
            let rows = stmt.query_map(params![user_id.0, status_text, limit], |row| {
                let status: String = row.get(4)?;
                Ok(Post {
                    id: row.get(0)?,
                    user_id: UserId(row.get(1)?),
                    content: row.get(2)?,
                    post_type: row.get(3)?,
                    status: PostStatus::from_str(&status).unwrap_or_default(),
                    ai_generated: row.get(5)?,
                    topic: row.get(6)?,
                    industry: row.get(7)?,
                    tone: row.get(8)?,
                    hashtags: json_list(row, 9)?,
                    engagement_tips: json_list(row, 10)?,
                    linkedin_tips: json_list(row, 11)?,
                    suggested_time: row.get(12)?,
                    created_at: row.get(13)?,
                    updated_at: row.get(14)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Number of posts a user has in `status`.
pub async fn count_user_posts(
    db: &Database,
    user_id: UserId,
    status: PostStatus,
) -> Result<usize, PostcraftError> {
    let status_text = status.to_string();
    let count = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.query_row(
                "SELECT COUNT(*) FROM posts WHERE user_id = ?1 AND status = ?2",
                params![user_id.0, status_text],
                |row| row.get(0),
            )
        })
        .await
        .map_err(map_tr_err)?;
    Ok(usize::try_from(count).unwrap_or_default())
}
