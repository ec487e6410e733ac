// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authorization filtering and mapping of Telegram updates to router events.

use postcraft_core::types::{UserId, UserProfile};
use postcraft_router::{Action, Inbound};
use teloxide::types::{ChatKind, Message, User};
use tracing::debug;

/// Checks whether a Telegram user may use the bot.
///
/// An empty `allowed_users` list makes the bot public. Otherwise the user's
/// numeric id or username (with or without `@`, case-insensitive) must be
/// listed.
pub fn is_authorized_user(user: &User, allowed_users: &[String]) -> bool {
    if allowed_users.is_empty() {
        return true;
    }

    let user_id_str = user.id.0.to_string();
    allowed_users.iter().any(|allowed| {
        if *allowed == user_id_str {
            return true;
        }
        let allowed_clean = allowed.strip_prefix('@').unwrap_or(allowed);
        user.username
            .as_deref()
            .is_some_and(|username| username.eq_ignore_ascii_case(allowed_clean))
    })
}

/// Message variant of [`is_authorized_user`]. Messages without a sender
/// (e.g., channel posts) are never authorized.
pub fn is_authorized(msg: &Message, allowed_users: &[String]) -> bool {
    msg.from
        .as_ref()
        .is_some_and(|user| is_authorized_user(user, allowed_users))
}

/// Checks whether the message is from a private (DM) chat.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

pub fn to_profile(user: &User) -> UserProfile {
    UserProfile {
        user_id: UserId(user.id.0 as i64),
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    }
}

/// Maps a slash command to a router event. Unknown commands are `None`.
fn command_event(text: &str) -> Option<Inbound> {
    let command = text.split_whitespace().next()?;
    // Commands may carry the bot name: /start@postcraft_bot
    let command = command.split('@').next().unwrap_or(command);
    let action = match command {
        "/start" => return Some(Inbound::Start),
        "/create" => Action::StartWizard,
        "/drafts" => Action::ViewDrafts,
        "/status" => Action::CheckStatus,
        "/help" => Action::Help,
        _ => return None,
    };
    Some(Inbound::Callback(action.callback_data()))
}

/// Converts a message into a router event.
///
/// Returns `None` for unsupported message types (stickers, locations, etc.)
/// and unknown commands.
pub fn to_inbound(msg: &Message) -> Option<Inbound> {
    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return command_event(text);
        }
        return Some(Inbound::Text(text.to_string()));
    }

    if msg.photo().is_some() {
        return Some(Inbound::Photo {
            caption: msg.caption().map(str::to_string),
        });
    }

    debug!(msg_id = msg.id.0, "ignoring unsupported message type");
    None
}
