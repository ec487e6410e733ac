// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `postcraft generate` and `postcraft drafts` command implementations.

use std::str::FromStr;

use colored::Colorize;
use postcraft_config::PostcraftConfig;
use postcraft_core::types::{ContentRequest, Length, PostStatus, Tone, UserId};
use postcraft_core::{PostStore, PostcraftError, StorageAdapter};
use postcraft_engine::ContentPipeline;
use postcraft_router::menus;
use postcraft_router::reply::render_post;
use postcraft_storage::SqliteStorage;

use crate::serve::open_orchestrator;

/// Arguments of `postcraft generate`, as typed on the command line.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub topic: String,
    pub industry: String,
    pub tone: String,
    pub length: String,
    pub user: i64,
}

impl GenerateArgs {
    fn to_request(&self) -> Result<ContentRequest, PostcraftError> {
        let tone = Tone::from_str(&self.tone).map_err(|_| {
            PostcraftError::Config(format!(
                "unknown tone '{}', expected professional, casual, enthusiastic or thoughtful",
                self.tone
            ))
        })?;
        let length = Length::from_str(&self.length).map_err(|_| {
            PostcraftError::Config(format!(
                "unknown length '{}', expected short, medium or long",
                self.length
            ))
        })?;
        if self.topic.trim().is_empty() {
            return Err(PostcraftError::Config("--topic cannot be empty".into()));
        }

        Ok(ContentRequest::builder(UserId(self.user), self.topic.trim())
            .industry(self.industry.to_lowercase())
            .tone(tone)
            .length(length)
            .build())
    }
}

/// Runs the first-draft pipeline once and prints the result.
pub async fn run_generate(config: PostcraftConfig, args: GenerateArgs) -> Result<(), PostcraftError> {
    let request = args.to_request()?;
    let (storage, orchestrator) = open_orchestrator(&config).await?;

    eprintln!("{}", "drafting...".dimmed());
    let response = orchestrator.create(&request).await?;
    println!(
        "{}",
        render_post(
            "🤖 AI-Generated LinkedIn Post",
            &response.generated,
            response.engagement_tips.as_slice(),
            None,
        )
    );
    println!("{}", format!("saved draft {}", response.post_id).dimmed());

    storage.close().await
}

/// Prints a user's saved drafts.
pub async fn run_drafts(config: PostcraftConfig, user: i64) -> Result<(), PostcraftError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;

    let user_id = UserId(user);
    let drafts = storage
        .list_posts(user_id, PostStatus::Draft, menus::DRAFTS_SHOWN)
        .await?;
    let total = storage.count_posts(user_id, PostStatus::Draft).await?;
    println!("{}", menus::drafts(&drafts, total).text);

    storage.close().await
}
