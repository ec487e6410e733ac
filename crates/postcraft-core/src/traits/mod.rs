// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Backend adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod connection;
pub mod provider;
pub mod storage;

pub use adapter::PluginAdapter;
pub use connection::{ConnectionAdapter, connection_is_live};
pub use provider::ProviderAdapter;
pub use storage::{PostStore, StorageAdapter, UserStore};
