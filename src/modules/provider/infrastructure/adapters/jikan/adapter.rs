//! Jikan (MyAnimeList) provider adapter
//!
//! Id-indexed: a single `GET /anime/{id}` serves both resolution tasks.

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
        traits::{require_id, MetadataProvider},
    },
    shared::{domain::value_objects::ProviderId, utils::logger::LogContext},
};

const PROVIDER: ProviderId = ProviderId::Jikan;

/// Jikan (MyAnimeList) provider adapter with REST API
pub struct JikanAdapter {
    transport: RetryingTransport,
    base_url: String,
}

impl JikanAdapter {
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

    async fn get_anime(&self, id: MalId, cancel: &CancellationToken) -> ProviderResult<Anime> {
        let url = format!("{}/anime/{}", self.base_url, id);

        LogContext::api_call("Jikan", &url, "start", None);
        let started = Instant::now();

        let response = self.transport.execute(&HttpRequest::get(&url), cancel).await?;
        let status = response.status();
        LogContext::api_call(
            "Jikan",
            &url,
            status.as_str(),
            Some(started.elapsed().as_millis() as u64),
        );
        check_status(PROVIDER, status, &format!("MAL id {}", id))?;

        let item: JikanItem<Anime> = decode_json(PROVIDER, response, cancel).await?;
        Ok(item.data)
    }
}

#[async_trait]
impl MetadataProvider for JikanAdapter {
    fn provider_id(&self) -> ProviderId {
        PROVIDER
    }

    fn query_key(&self) -> QueryKey {
        QueryKey::Id
    }

    async fn fetch_image(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> ProviderResult<String> {
        let id = require_id(PROVIDER, anime)?;
        self.get_anime(id, cancel)
            .await?
            .poster_url()
            .ok_or_else(|| ProviderError::no_match(PROVIDER, format!("poster of MAL id {}", id)))
    }

    async fn fetch_name(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> ProviderResult<String> {
        let id = require_id(PROVIDER, anime)?;
        self.get_anime(id, cancel)
            .await?
            .canonical_title()
            .ok_or_else(|| ProviderError::no_match(PROVIDER, format!("title of MAL id {}", id)))
    }
}
