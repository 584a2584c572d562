//! Kitsu provider adapter
//!
//! Name-indexed fuzzy search; only the first search result is considered.

use async_trait::async_trait;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use super::models::*;
use crate::{
    modules::provider::{
        domain::{
            entities::{AnimeRef, ProviderConfig, QueryKey},
            errors::{ProviderError, ProviderResult},
        },
        infrastructure::{
            adapters::common::{check_status, decode_json},
            http_client::{HttpRequest, RetryPolicy, RetryingTransport, TransportError},
        },
        traits::{require_name, MetadataProvider},
    },
    shared::{domain::value_objects::ProviderId, utils::logger::LogContext},
};

const PROVIDER: ProviderId = ProviderId::Kitsu;

pub struct KitsuAdapter {
    transport: RetryingTransport,
    base_url: String,
}

impl KitsuAdapter {
    pub fn new(
        config: &ProviderConfig,
        policy: RetryPolicy,
        user_agent: &str,
    ) -> Result<Self, TransportError> {
        let transport =
            RetryingTransport::with_timeout(PROVIDER, policy, config.timeout(), user_agent)?;
        Ok(Self::with_transport(transport, &config.base_url))
    }

    /// Create adapter with a custom transport (for testing)
    pub fn with_transport(transport: RetryingTransport, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn first_match(&self, name: &str, cancel: &CancellationToken) -> ProviderResult<KitsuAnime> {
        let url = format!(
            "{}/anime?filter[text]={}",
            self.base_url,
            urlencoding::encode(name)
        );

        LogContext::api_call("Kitsu", &url, "start", None);
        let started = Instant::now();

        let response = self.transport.execute(&HttpRequest::get(&url), cancel).await?;
        let status = response.status();
        LogContext::api_call(
            "Kitsu",
            &url,
            status.as_str(),
            Some(started.elapsed().as_millis() as u64),
        );
        check_status(PROVIDER, status, name)?;

        let list: KitsuList<KitsuAnime> = decode_json(PROVIDER, response, cancel).await?;
        list.data
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::no_match(PROVIDER, name))
    }
}

#[async_trait]
impl MetadataProvider for KitsuAdapter {
    fn provider_id(&self) -> ProviderId {
        PROVIDER
    }

    fn query_key(&self) -> QueryKey {
        QueryKey::Name
    }

    async fn fetch_image(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> ProviderResult<String> {
        let name = require_name(PROVIDER, anime)?;
        self.first_match(name, cancel)
            .await?
            .poster_url()
            .ok_or_else(|| ProviderError::no_match(PROVIDER, format!("poster of '{}'", name)))
    }

    async fn fetch_name(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> ProviderResult<String> {
        let name = require_name(PROVIDER, anime)?;
        self.first_match(name, cancel)
            .await?
            .canonical_title()
            .ok_or_else(|| ProviderError::no_match(PROVIDER, format!("title of '{}'", name)))
    }
}
