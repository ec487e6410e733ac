// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Postcraft integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock text-generation backend with scripted replies and failures
//! - [`InMemoryStore`] - Post and user store with a failure switch
//! - [`StaticConnections`] - Fixed platform connections per user
//! - [`RecordingPipeline`] - Content pipeline that records what the router asked for
//! - [`TestHarness`] - Router wired to mocks and a temp SQLite database

pub mod harness;
pub mod mock_connections;
pub mod mock_pipeline;
pub mod mock_provider;
pub mod mock_store;

pub use harness::TestHarness;
pub use mock_connections::StaticConnections;
pub use mock_pipeline::{PipelineCall, RecordingPipeline};
pub use mock_provider::{MockProvider, MockReply};
pub use mock_store::InMemoryStore;
