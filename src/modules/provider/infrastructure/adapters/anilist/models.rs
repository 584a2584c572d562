//! AniList response models, limited to the fields used for metadata resolution

use serde::{Deserialize, Serialize};

use crate::modules::provider::infrastructure::adapters::common::first_present;

/// GraphQL response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub status: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSearchData {
    #[serde(rename = "Media")]
    pub media: Option<Media>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub title: Option<MediaTitle>,
    pub cover_image: Option<MediaCoverImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl MediaTitle {
    /// English, then romanized, then native title
    pub fn preferred(&self) -> Option<String> {
        first_present([
            self.english.as_ref(),
            self.romaji.as_ref(),
            self.native.as_ref(),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
}

impl MediaCoverImage {
    pub fn best(&self) -> Option<String> {
        first_present([
            self.large.as_ref(),
            self.extra_large.as_ref(),
            self.medium.as_ref(),
        ])
    }
}
