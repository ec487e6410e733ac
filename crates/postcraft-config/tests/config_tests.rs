// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the configuration system.

use postcraft_config::diagnostic::ConfigError;
use postcraft_config::model::PostcraftConfig;
use postcraft_config::{load_and_validate_str, load_config, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[agent]
name = "drafts-bot"
log_level = "debug"

[telegram]
bot_token = "123:ABC"
allowed_users = ["42", "alice"]

[gemini]
api_key = "g-123"
model = "gemini-1.5-pro"
temperature = 0.4
timeout_secs = 15

[storage]
database_path = "/tmp/postcraft-test.db"
wal_mode = false

[linkedin]
client_id = "li-client"
redirect_uri = "https://example.org/callback"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "drafts-bot");
    assert_eq!(config.telegram.allowed_users, vec!["42", "alice"]);
    assert_eq!(config.gemini.api_key.as_deref(), Some("g-123"));
    assert_eq!(config.gemini.model, "gemini-1.5-pro");
    assert_eq!(config.gemini.timeout_secs, 15);
    assert!(!config.storage.wal_mode);
    assert_eq!(config.linkedin.client_id.as_deref(), Some("li-client"));
    assert_eq!(config.linkedin.scope, "openid profile email");
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.gemini.api_key.is_none());
    assert_eq!(config.gemini.base_url, "https://generativelanguage.googleapis.com");
}

#[test]
fn typo_produces_unknown_key_with_suggestion() {
    let toml = r#"
[gemini]
temprature = 0.5
"#;

    let errors = load_and_validate_str(toml).expect_err("typo should be rejected");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key,
                suggestion,
                ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("should report an unknown key");

    assert_eq!(unknown.0, "temprature");
    assert_eq!(unknown.1.as_deref(), Some("temperature"));
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[gemini]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("string is not a number");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. }))
    );
}

#[test]
fn semantic_validation_runs_after_parsing() {
    let errors = load_and_validate_str("[gemini]\ntemperature = 3.0\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("temperature")));
}

#[test]
fn env_overrides_map_onto_sections() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "postcraft.toml",
            r#"
[gemini]
model = "from-file"
"#,
        )?;
        jail.set_env("POSTCRAFT_GEMINI_MODEL", "from-env");
        jail.set_env("POSTCRAFT_TELEGRAM_BOT_TOKEN", "999:xyz");
        jail.set_env("POSTCRAFT_STORAGE_DATABASE_PATH", "/tmp/env.db");

        let config: PostcraftConfig = load_config()?;
        assert_eq!(config.gemini.model, "from-env");
        assert_eq!(config.telegram.bot_token.as_deref(), Some("999:xyz"));
        assert_eq!(config.storage.database_path, "/tmp/env.db");
        Ok(())
    });
}

#[test]
fn google_api_key_is_a_fallback() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("GOOGLE_API_KEY", "fallback-key");
        let config = load_config()?;
        assert_eq!(config.gemini.api_key.as_deref(), Some("fallback-key"));

        jail.set_env("POSTCRAFT_GEMINI_API_KEY", "explicit-key");
        let config = load_config()?;
        assert_eq!(config.gemini.api_key.as_deref(), Some("explicit-key"));
        Ok(())
    });
}
