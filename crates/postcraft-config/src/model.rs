// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every struct uses `#[serde(deny_unknown_fields)]` so typos are rejected at
//! startup with a suggestion instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Postcraft configuration.
///
/// All sections are optional and default to working values, except for the
/// credentials, which must come from a file or the environment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PostcraftConfig {
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub linkedin: LinkedInConfig,
}

/// Bot identity and logging.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in greetings and logs.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "postcraft".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token. Falls back to `TELEGRAM_BOT_TOKEN`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Telegram user IDs or usernames allowed to talk to the bot.
    /// An empty list makes the bot public.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

/// Text-generation backend settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. Falls back to `GOOGLE_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature applied to every stage.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("postcraft").join("postcraft.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("postcraft.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// LinkedIn account connection settings, used to build the authorization URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LinkedInConfig {
    /// OAuth client id. `None` hides the connect flow.
    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            redirect_uri: default_redirect_uri(),
            scope: default_scope(),
        }
    }
}

fn default_redirect_uri() -> String {
    "http://localhost:8000/linkedin/callback".to_string()
}

fn default_scope() -> String {
    "openid profile email".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PostcraftConfig::default();
        assert_eq!(config.agent.name, "postcraft");
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert!((config.gemini.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.gemini.timeout_secs, 60);
        assert!(config.telegram.allowed_users.is_empty());
        assert_eq!(
            config.linkedin.redirect_uri,
            "http://localhost:8000/linkedin/callback"
        );
        assert_eq!(config.linkedin.scope, "openid profile email");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: PostcraftConfig = toml::from_str(
            r#"
[gemini]
temperature = 0.2
"#,
        )
        .unwrap();
        assert!((config.gemini.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert!(config.storage.wal_mode);
    }

    #[test]
    fn unknown_linkedin_key_is_rejected() {
        let result = toml::from_str::<PostcraftConfig>(
            r#"
[linkedin]
client_secret = "nope"
"#,
        );
        assert!(result.is_err());
    }
}
