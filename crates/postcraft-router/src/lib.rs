// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation layer for Postcraft.
//!
//! The [`ConversationRouter`] turns chat events into pipeline calls. Free text
//! is classified against an ordered cue table (regenerate before refine before
//! new topic); button presses drive the configuration wizard and menus.
//! Per-user context lives behind the [`SessionStore`] abstraction.

pub mod action;
pub mod cues;
pub mod greeting;
pub mod menus;
pub mod reply;
pub mod router;
pub mod session;

pub use action::Action;
pub use cues::{Intent, classify};
pub use reply::{Button, Reply};
pub use router::{ConversationRouter, Inbound};
pub use session::{
    InMemorySessionStore, LastRequest, PendingRequest, SessionState, SessionStore, WizardStep,
};
