// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Postcraft crate.

use thiserror::Error;

/// The primary error type used across adapter traits and pipeline operations.
///
/// Structured-output parse failures never appear here: they are absorbed by
/// each worker's fallback and surface as a degraded stage output instead.
#[derive(Debug, Error)]
pub enum PostcraftError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Persistence backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Presentation channel errors (Telegram API failure, message delivery).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The text-generation backend is unreachable or returned an error.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The text-generation backend did not answer in time.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// A wizard action referenced session state that no longer exists.
    #[error("session expired for user {user_id}")]
    SessionExpired { user_id: i64 },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PostcraftError {
    /// Returns true when the error means a backend (generation or persistence)
    /// failed and the current pipeline run must be aborted.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            PostcraftError::Provider { .. }
                | PostcraftError::Timeout { .. }
                | PostcraftError::Storage { .. }
        )
    }

    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        PostcraftError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
