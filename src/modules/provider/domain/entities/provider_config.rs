use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::shared::domain::value_objects::ProviderId;

/// Connection settings for one catalog provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: ProviderId,
    pub base_url: String,
    pub timeout_seconds: u32,
}

impl ProviderConfig {
    pub fn new(provider: ProviderId) -> Self {
        let (base_url, timeout) = match provider {
            ProviderId::AniList => ("https://graphql.anilist.co".to_string(), 10),
            ProviderId::Jikan => ("https://api.jikan.moe/v4".to_string(), 10),
            ProviderId::Kitsu => ("https://kitsu.io/api/edge".to_string(), 10),
            ProviderId::Fallback => (String::new(), 0),
        };

        Self {
            provider,
            base_url,
            timeout_seconds: timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u32) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds as u64)
    }
}
