//! AniList provider adapter
//!
//! Name-indexed: both tasks run the same `Media(search:)` GraphQL query and
//! read the best match AniList returns.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use super::{models::*, queries::MEDIA_SEARCH_QUERY};
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

const PROVIDER: ProviderId = ProviderId::AniList;

/// AniList provider adapter with GraphQL API
pub struct AniListAdapter {
    transport: RetryingTransport,
    base_url: String,
}

impl AniListAdapter {
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

    async fn search_media(&self, name: &str, cancel: &CancellationToken) -> ProviderResult<Media> {
        let body = json!({
            "query": MEDIA_SEARCH_QUERY,
            "variables": { "search": name }
        });

        LogContext::api_call("AniList", "Media(search)", "start", None);
        let started = Instant::now();

        let response = self
            .transport
            .execute(&HttpRequest::post_json(&self.base_url, body), cancel)
            .await?;
        let status = response.status();
        LogContext::api_call(
            "AniList",
            "Media(search)",
            status.as_str(),
            Some(started.elapsed().as_millis() as u64),
        );
        check_status(PROVIDER, status, name)?;

        let payload: GraphQlResponse<MediaSearchData> =
            decode_json(PROVIDER, response, cancel).await?;

        if let Some(media) = payload.data.and_then(|data| data.media) {
            return Ok(media);
        }

        match payload.errors.first() {
            Some(error) if error.status != Some(StatusCode::NOT_FOUND.as_u16()) => {
                log::error!("AniList: GraphQL errors for '{}': {:?}", name, payload.errors);
                Err(ProviderError::invalid_response(PROVIDER, error.message.clone()))
            }
            _ => Err(ProviderError::no_match(PROVIDER, name)),
        }
    }
}

#[async_trait]
impl MetadataProvider for AniListAdapter {
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
        let media = self.search_media(name, cancel).await?;

        media
            .cover_image
            .and_then(|cover| cover.best())
            .ok_or_else(|| ProviderError::no_match(PROVIDER, format!("cover image of '{}'", name)))
    }

    async fn fetch_name(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> ProviderResult<String> {
        let name = require_name(PROVIDER, anime)?;
        let media = self.search_media(name, cancel).await?;

        media
            .title
            .and_then(|title| title.preferred())
            .ok_or_else(|| ProviderError::no_match(PROVIDER, format!("title of '{}'", name)))
    }
}
