//! Handlers behind the UI's metadata endpoints
//!
//! Raw query values arrive as optional strings; an empty string is treated as
//! absent. Single-reference handlers never fail.

use tokio_util::sync::CancellationToken;

use crate::modules::provider::{
    application::{dto::Recommendation, service::MetadataService},
    domain::{
        entities::AnimeRef,
        value_objects::{
            ImageResolution, NameResolution, ResolutionResult, ResolvedImage, FALLBACK_NAME,
        },
    },
};
use crate::shared::errors::AppResult;

/// `GET /api/fetch-anime-image?anime_id=..&anime_name=..`
pub async fn fetch_anime_image(
    service: &MetadataService,
    anime_id: Option<String>,
    anime_name: Option<String>,
) -> ImageResolution {
    let anime = AnimeRef::from_query(anime_id.as_deref(), anime_name.as_deref());
    if anime.is_empty() {
        log::error!("No anime_id or anime_name provided in the request");
        return ResolutionResult::fallback_image().into();
    }

    service.resolve_image(&anime).await
}

/// Official display name for one anime
pub async fn fetch_anime_name(
    service: &MetadataService,
    anime_id: Option<String>,
    anime_name: Option<String>,
) -> NameResolution {
    let anime = AnimeRef::from_query(anime_id.as_deref(), anime_name.as_deref());
    if anime.is_empty() {
        log::error!("No anime_id or anime_name provided in the request");
        return NameResolution {
            name: FALLBACK_NAME.to_string(),
        };
    }

    service.resolve_name(&anime).await
}

/// Images for a list of recommendation cards
pub async fn fetch_anime_images(
    service: &MetadataService,
    refs: Vec<AnimeRef>,
    cancel: &CancellationToken,
) -> AppResult<Vec<ResolvedImage>> {
    service.resolve_images(refs, cancel).await
}

/// Rewrite backend recommendations with official anime names
pub async fn map_official_names(
    service: &MetadataService,
    recommendations: Vec<Recommendation>,
    cancel: &CancellationToken,
) -> AppResult<Vec<Recommendation>> {
    log::info!("Mapping {} recommendations to official names", recommendations.len());
    service.map_official_names(recommendations, cancel).await
}
