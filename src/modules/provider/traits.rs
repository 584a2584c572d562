use crate::modules::provider::domain::entities::{AnimeRef, QueryKey};
use crate::modules::provider::domain::errors::{ProviderError, ProviderResult};
use crate::shared::domain::value_objects::ProviderId;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A catalog service that can turn an [`AnimeRef`] into candidate metadata.
///
/// Candidates are unvalidated: name similarity is checked by the chain, not here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Which catalog this adapter talks to
    fn provider_id(&self) -> ProviderId;

    /// The `AnimeRef` field this provider queries by
    fn query_key(&self) -> QueryKey;

    /// Fetch a poster/cover image URL
    async fn fetch_image(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> ProviderResult<String>;

    /// Fetch the provider's official title
    async fn fetch_name(&self, anime: &AnimeRef, cancel: &CancellationToken)
        -> ProviderResult<String>;
}

/// Fails with [`ProviderError::MissingKey`] unless `anime` carries the name
pub fn require_name(provider: ProviderId, anime: &AnimeRef) -> ProviderResult<&str> {
    anime.name().ok_or(ProviderError::MissingKey {
        provider,
        key: QueryKey::Name,
    })
}

/// Fails with [`ProviderError::MissingKey`] unless `anime` carries the id
pub fn require_id(provider: ProviderId, anime: &AnimeRef) -> ProviderResult<u32> {
    anime.id().ok_or(ProviderError::MissingKey {
        provider,
        key: QueryKey::Id,
    })
}
