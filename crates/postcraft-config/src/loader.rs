// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading.
//!
//! Merge order, later wins: compiled defaults, `/etc/postcraft/postcraft.toml`,
//! `~/.config/postcraft/postcraft.toml`, `./postcraft.toml`, `POSTCRAFT_*`
//! environment variables. Credentials left unset afterwards fall back to the
//! conventional `GOOGLE_API_KEY` and `TELEGRAM_BOT_TOKEN` variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use tracing::debug;

use crate::model::PostcraftConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/postcraft/postcraft.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "postcraft.toml";

/// Config sections that `POSTCRAFT_<SECTION>_<KEY>` variables map onto.
const ENV_SECTIONS: &[&str] = &["agent", "telegram", "gemini", "storage", "linkedin"];

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<PostcraftConfig, figment::Error> {
    let figment = build_figment();
    for layer in figment.metadata() {
        debug!(provider = %layer.name, source = ?layer.source, "config layer");
    }
    let mut config: PostcraftConfig = figment.extract()?;
    apply_credential_fallbacks(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Load configuration from an explicit TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PostcraftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PostcraftConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PostcraftConfig, figment::Error> {
    let mut config: PostcraftConfig = Figment::new()
        .merge(Serialized::defaults(PostcraftConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()?;
    apply_credential_fallbacks(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PostcraftConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `$XDG_CONFIG_HOME/postcraft/postcraft.toml`, when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("postcraft").join(LOCAL_CONFIG_FILE))
}

/// Fill unset credentials from well-known environment variables.
///
/// `lookup` is injected so the fallback can be exercised without touching the
/// process environment.
pub fn apply_credential_fallbacks<F>(config: &mut PostcraftConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if config.gemini.api_key.is_none() {
        config.gemini.api_key = non_empty("GOOGLE_API_KEY");
    }
    if config.telegram.bot_token.is_none() {
        config.telegram.bot_token = non_empty("TELEGRAM_BOT_TOKEN");
    }
}

/// Map `POSTCRAFT_GEMINI_API_KEY` to `gemini.api_key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// keys that contain underscores themselves stay intact.
fn env_provider() -> Env {
    Env::prefixed("POSTCRAFT_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key_str)
            .into()
    })
}
