use serde::{Deserialize, Serialize};

use crate::modules::provider::domain::entities::AnimeRef;
use crate::shared::domain::value_objects::ProviderId;

/// Placeholder image returned when no provider yields an image
pub const FALLBACK_IMAGE: &str = "/placeholder.svg";

/// Display name used when there is neither a resolved nor an input name
pub const FALLBACK_NAME: &str = "Unknown Title";

/// A value produced by the resolution chain together with where it came from.
///
/// Provider values are always `accepted`; the sentinel carries
/// [`ProviderId::Fallback`] and `accepted == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult<T> {
    pub value: T,
    pub source: ProviderId,
    pub accepted: bool,
}

impl<T> ResolutionResult<T> {
    pub fn accepted(value: T, source: ProviderId) -> Self {
        Self {
            value,
            source,
            accepted: true,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            source: ProviderId::Fallback,
            accepted: false,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source.is_fallback()
    }
}

impl ResolutionResult<String> {
    pub fn fallback_image() -> Self {
        Self::fallback(FALLBACK_IMAGE.to_string())
    }
}

/// Image resolution as seen by the surrounding application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResolution {
    pub image_url: String,
}

impl From<ResolutionResult<String>> for ImageResolution {
    fn from(result: ResolutionResult<String>) -> Self {
        Self {
            image_url: result.value,
        }
    }
}

/// Name resolution as seen by the surrounding application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameResolution {
    pub name: String,
}

impl From<ResolutionResult<String>> for NameResolution {
    fn from(result: ResolutionResult<String>) -> Self {
        Self { name: result.value }
    }
}

/// One entry of a batch image resolution, correlated by its input reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImage {
    pub reference: AnimeRef,
    pub image: ResolutionResult<String>,
}

/// One entry of a batch name resolution, correlated by its input reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedName {
    pub reference: AnimeRef,
    pub name: ResolutionResult<String>,
}
