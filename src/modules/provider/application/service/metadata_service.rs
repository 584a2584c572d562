use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::{
    modules::provider::{
        application::dto::Recommendation,
        domain::{
            entities::AnimeRef,
            services::ResolutionChain,
            value_objects::{ImageResolution, NameResolution, ResolvedImage, ResolvedName},
        },
        infrastructure::{
            adapters::{AniListAdapter, JikanAdapter, KitsuAdapter},
            http_client::TransportError,
        },
    },
    shared::{
        config::AppConfig,
        errors::{AppError, AppResult},
        utils::logger::{LogContext, TimedOperation},
    },
};

/// Entry point for the surrounding application.
///
/// Single references go straight through the [`ResolutionChain`]. Batches run
/// independent chains with bounded concurrency; a chain never fans out
/// internally.
#[derive(Clone)]
pub struct MetadataService {
    chain: ResolutionChain,
    batch_concurrency: usize,
}

impl MetadataService {
    /// Service wired to the public AniList, Jikan and Kitsu endpoints
    pub fn new() -> AppResult<Self> {
        Self::from_config(&AppConfig::default())
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let policy = config.retry_policy.clone();
        policy.validate()?;

        let anilist = AniListAdapter::new(&config.anilist, policy.clone(), &config.user_agent)
            .map_err(client_error)?;
        let jikan = JikanAdapter::new(&config.jikan, policy.clone(), &config.user_agent)
            .map_err(client_error)?;
        let kitsu =
            KitsuAdapter::new(&config.kitsu, policy, &config.user_agent).map_err(client_error)?;

        log::info!(
            "MetadataService initialized (AniList: {}, Jikan: {}, Kitsu: {}, batch concurrency: {})",
            config.anilist.base_url,
            config.jikan.base_url,
            config.kitsu.base_url,
            config.batch_concurrency
        );

        Ok(Self::with_chain(
            ResolutionChain::new(Arc::new(anilist), Arc::new(jikan), Arc::new(kitsu)),
            config.batch_concurrency,
        ))
    }

    pub fn with_chain(chain: ResolutionChain, batch_concurrency: usize) -> Self {
        Self {
            chain,
            batch_concurrency: batch_concurrency.max(1),
        }
    }

    pub fn chain(&self) -> &ResolutionChain {
        &self.chain
    }

    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    pub async fn resolve_image(&self, anime: &AnimeRef) -> ImageResolution {
        self.chain.resolve_image(anime).await
    }

    pub async fn resolve_name(&self, anime: &AnimeRef) -> NameResolution {
        self.chain.resolve_name(anime).await
    }

    pub async fn resolve_image_cancellable(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> AppResult<ImageResolution> {
        Ok(self.chain.resolve_image_detailed(anime, cancel).await?.into())
    }

    pub async fn resolve_name_cancellable(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> AppResult<NameResolution> {
        Ok(self.chain.resolve_name_detailed(anime, cancel).await?.into())
    }

    /// Resolve images for many references. Results arrive in completion order,
    /// each paired with the reference it belongs to.
    pub async fn resolve_images(
        &self,
        refs: Vec<AnimeRef>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ResolvedImage>> {
        let timer = TimedOperation::new("batch image resolution");
        let total = refs.len();
        let chain = &self.chain;

        let resolved: Vec<ResolvedImage> = stream::iter(refs)
            .map(|reference| async move {
                let image = chain.resolve_image_detailed(&reference, cancel).await?;
                Ok::<_, AppError>(ResolvedImage { reference, image })
            })
            .buffer_unordered(self.batch_concurrency)
            .try_collect()
            .await?;

        let placeholders = resolved.iter().filter(|r| r.image.is_fallback()).count();
        timer.finish_with_info(&format!("{} references, {} placeholders", total, placeholders));
        Ok(resolved)
    }

    /// Resolve names for many references, paired with their input reference
    pub async fn resolve_names(
        &self,
        refs: Vec<AnimeRef>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ResolvedName>> {
        let timer = TimedOperation::new("batch name resolution");
        let total = refs.len();
        let chain = &self.chain;

        let resolved: Vec<ResolvedName> = stream::iter(refs)
            .map(|reference| async move {
                let name = chain.resolve_name_detailed(&reference, cancel).await?;
                Ok::<_, AppError>(ResolvedName { reference, name })
            })
            .buffer_unordered(self.batch_concurrency)
            .try_collect()
            .await?;

        timer.finish_with_info(&format!("{} references", total));
        Ok(resolved)
    }

    /// Replace each recommendation's name with its official title.
    ///
    /// Each row travels with its own resolution, so ranking order is kept
    /// while rows resolve concurrently.
    pub async fn map_official_names(
        &self,
        recommendations: Vec<Recommendation>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Recommendation>> {
        let timer = TimedOperation::new("official name mapping");
        let total = recommendations.len();
        let chain = &self.chain;

        let mapped: Vec<Recommendation> = stream::iter(recommendations)
            .map(|mut recommendation| async move {
                let resolved = chain
                    .resolve_name_detailed(&recommendation.anime_ref(), cancel)
                    .await?;
                recommendation.anime_name = Some(resolved.value);
                Ok::<_, AppError>(recommendation)
            })
            .buffered(self.batch_concurrency)
            .try_collect()
            .await?;

        timer.finish_with_info(&format!("{} recommendations", total));
        Ok(mapped)
    }
}

fn client_error(err: TransportError) -> AppError {
    LogContext::error_with_context(&err, "Failed to initialize provider adapter");
    AppError::ConfigError(err.to_string())
}
