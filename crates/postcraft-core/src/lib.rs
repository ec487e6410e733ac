// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Postcraft.
//!
//! This crate provides the trait definitions, error types, and domain types
//! used throughout the Postcraft workspace. Backend adapters implement the
//! traits defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::PostcraftError;
pub use types::{
    AdapterType, ConnectionProfile, ContentRequest, ContentRequestBuilder, ContentResponse,
    ContentType, EngagementTips, GeneratedContent, HealthStatus, Length, NewPost,
    PlatformConnection, Post, PostStatus, ProviderRequest, ProviderResponse, Tone, UserId,
    UserProfile, UserRecord,
};

pub use traits::{
    ConnectionAdapter, PluginAdapter, PostStore, ProviderAdapter, StorageAdapter, UserStore,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        for variant in [
            AdapterType::Channel,
            AdapterType::Provider,
            AdapterType::Storage,
            AdapterType::Connection,
        ] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        assert_ne!(HealthStatus::Degraded("slow".into()), healthy);
        assert_ne!(HealthStatus::Unhealthy("down".into()), healthy);
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_provider_adapter<T: ProviderAdapter>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
        fn _assert_post_store<T: PostStore>() {}
        fn _assert_user_store<T: UserStore>() {}
        fn _assert_connection_adapter<T: ConnectionAdapter>() {}
    }
}
