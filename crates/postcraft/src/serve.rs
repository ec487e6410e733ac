// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `postcraft serve` command implementation.
//!
//! Wires storage, the Gemini backend, the orchestrator and the conversation
//! router together and runs the Telegram channel until Ctrl-C.

use std::sync::Arc;

use postcraft_config::PostcraftConfig;
use postcraft_core::{PluginAdapter, PostcraftError, ProviderAdapter, StorageAdapter};
use postcraft_engine::Orchestrator;
use postcraft_gemini::GeminiProvider;
use postcraft_router::{ConversationRouter, InMemorySessionStore};
use postcraft_storage::SqliteStorage;
use postcraft_telegram::TelegramChannel;
use tracing::{error, info, warn};

/// Opens the database and builds the generation pipeline on top of it.
pub(crate) async fn open_orchestrator(
    config: &PostcraftConfig,
) -> Result<(Arc<SqliteStorage>, Arc<Orchestrator>), PostcraftError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let storage = Arc::new(storage);

    let provider: Arc<dyn ProviderAdapter> = Arc::new(GeminiProvider::new(&config.gemini)?);
    let orchestrator = Arc::new(Orchestrator::new(
        provider,
        storage.clone(),
        config.gemini.temperature,
    ));
    Ok((storage, orchestrator))
}

/// Builds the conversation router with SQLite as every store.
pub(crate) async fn open_router(
    config: &PostcraftConfig,
) -> Result<(Arc<SqliteStorage>, Arc<ConversationRouter>), PostcraftError> {
    let (storage, orchestrator) = open_orchestrator(config).await?;
    let router = ConversationRouter::new(
        orchestrator,
        Arc::new(InMemorySessionStore::new()),
        storage.clone(),
        storage.clone(),
        storage.clone(),
        config.linkedin.clone(),
    );
    Ok((storage, Arc::new(router)))
}

/// Runs the `postcraft serve` command.
pub async fn run_serve(config: PostcraftConfig) -> Result<(), PostcraftError> {
    info!(name = %config.agent.name, model = %config.gemini.model, "starting postcraft");

    let (storage, router) = open_router(&config).await?;
    if config.linkedin.client_id.is_none() {
        warn!("linkedin.client_id is not set, account connection is disabled");
    }

    let channel = TelegramChannel::new(config.telegram.clone(), router)?;
    let result = channel.run().await;

    if let Err(e) = channel.shutdown().await {
        warn!(error = %e, "channel shutdown failed");
    }
    if let Err(e) = storage.close().await {
        error!(error = %e, "failed to checkpoint database");
    }
    info!("postcraft stopped");
    result
}
