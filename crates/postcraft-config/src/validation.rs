// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::PostcraftConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &PostcraftConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::validation(format!(
            "agent.log_level `{}` must be one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let temperature = config.gemini.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::validation(format!(
            "gemini.temperature must be between 0.0 and 2.0, got {temperature}"
        )));
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::validation("gemini.model must not be empty"));
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "gemini.timeout_secs must be greater than 0",
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &PostcraftConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&PostcraftConfig::default()).is_ok());
    }

    #[test]
    fn out_of_range_temperature_fails() {
        let mut config = PostcraftConfig::default();
        config.gemini.temperature = 2.5;
        assert!(messages(&config)[0].contains("gemini.temperature"));
    }

    #[test]
    fn all_problems_are_reported_together() {
        let mut config = PostcraftConfig::default();
        config.gemini.model = " ".into();
        config.gemini.timeout_secs = 0;
        config.storage.database_path = String::new();
        config.agent.log_level = "loud".into();

        let messages = messages(&config);
        assert_eq!(messages.len(), 4);
        assert!(messages.iter().any(|m| m.contains("gemini.model")));
        assert!(messages.iter().any(|m| m.contains("timeout_secs")));
        assert!(messages.iter().any(|m| m.contains("database_path")));
        assert!(messages.iter().any(|m| m.contains("log_level")));
    }
}
