//! Kitsu JSON:API response models, limited to the fields used for metadata resolution

use serde::{Deserialize, Serialize};

use crate::modules::provider::infrastructure::adapters::common::first_present;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitsuList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitsuAnime {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<AnimeAttributes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeAttributes {
    #[serde(default)]
    pub canonical_title: Option<String>,
    #[serde(default)]
    pub poster_image: Option<PosterImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterImage {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
}

impl KitsuAnime {
    /// Original-size poster, else the large rendition
    pub fn poster_url(&self) -> Option<String> {
        let poster = self.attributes.as_ref()?.poster_image.as_ref()?;
        first_present([poster.original.as_ref(), poster.large.as_ref()])
    }

    pub fn canonical_title(&self) -> Option<String> {
        first_present([self.attributes.as_ref()?.canonical_title.as_ref()])
    }
}
