// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram presentation adapter for Postcraft.
//!
//! Long-polls the Telegram Bot API via teloxide, turns messages and button
//! presses into router events, and sends the router's replies back with
//! inline keyboards.

pub mod handler;
pub mod outbound;

use std::sync::Arc;

use async_trait::async_trait;
use postcraft_config::model::TelegramConfig;
use postcraft_core::types::{AdapterType, HealthStatus};
use postcraft_core::{PluginAdapter, PostcraftError};
use postcraft_router::{ConversationRouter, Inbound, Reply};
use teloxide::prelude::*;
use teloxide::types::ChatAction;
use tracing::{debug, info, warn};

/// Shared state handed to every update handler.
struct BotState {
    router: Arc<ConversationRouter>,
    allowed_users: Vec<String>,
}

/// Telegram channel adapter.
pub struct TelegramChannel {
    bot: Bot,
    config: TelegramConfig,
    router: Arc<ConversationRouter>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(
        config: TelegramConfig,
        router: Arc<ConversationRouter>,
    ) -> Result<Self, PostcraftError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            PostcraftError::Config("telegram.bot_token is required for the Telegram bot".into())
        })?;

        if token.trim().is_empty() {
            return Err(PostcraftError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
            config,
            router,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Polls for updates until Ctrl-C.
    pub async fn run(&self) -> Result<(), PostcraftError> {
        let state = Arc::new(BotState {
            router: self.router.clone(),
            allowed_users: self.config.allowed_users.clone(),
        });

        if state.allowed_users.is_empty() {
            warn!("telegram.allowed_users is empty, the bot answers everyone");
        }
        info!("starting Telegram long polling");

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(on_message))
            .branch(Update::filter_callback_query().endpoint(on_callback));

        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![state])
            .default_handler(|_| async {}) // Silently ignore other updates
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram polling stopped");
        Ok(())
    }
}

async fn on_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    if !handler::is_dm(&msg) {
        debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
        return Ok(());
    }
    if !handler::is_authorized(&msg, &state.allowed_users) {
        debug!(chat_id = msg.chat.id.0, "ignoring unauthorized user");
        return Ok(());
    }
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(inbound) = handler::to_inbound(&msg) else {
        return Ok(());
    };

    if matches!(inbound, Inbound::Text(_) | Inbound::Photo { .. }) {
        // Generation takes a while; best effort only.
        if let Err(e) = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await {
            debug!(error = %e, "failed to send typing indicator");
        }
    }

    let profile = handler::to_profile(user);
    let replies = state.router.handle(&profile, inbound).await;
    send_replies(&bot, msg.chat.id, &replies).await
}

async fn on_callback(bot: Bot, q: CallbackQuery, state: Arc<BotState>) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    if !handler::is_authorized_user(&q.from, &state.allowed_users) {
        debug!(user_id = q.from.id.0, "ignoring unauthorized callback");
        return Ok(());
    }
    let Some(data) = q.data.clone() else {
        return Ok(());
    };

    let profile = handler::to_profile(&q.from);
    let replies = state
        .router
        .handle(&profile, Inbound::Callback(data))
        .await;
    // Buttons are only offered in private chats, where the chat id is the user id.
    send_replies(&bot, ChatId(profile.user_id.0), &replies).await
}

async fn send_replies(bot: &Bot, chat_id: ChatId, replies: &[Reply]) -> ResponseResult<()> {
    for reply in replies {
        let chunks = outbound::split_text(&reply.text, outbound::MAX_MESSAGE_LEN);
        let last = chunks.len().saturating_sub(1);
        for (i, chunk) in chunks.into_iter().enumerate() {
            let request = bot.send_message(chat_id, chunk);
            match outbound::to_markup(reply) {
                Some(markup) if i == last => request.reply_markup(markup).await?,
                _ => request.await?,
            };
        }
    }
    Ok(())
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, PostcraftError> {
        // Check if the bot token is valid by calling getMe.
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), PostcraftError> {
        debug!("Telegram channel shutting down");
        Ok(())
    }
}
