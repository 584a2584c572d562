// Jikan v4 API models, limited to the anime fields used for metadata resolution
// Based on https://docs.api.jikan.moe/

use serde::{Deserialize, Serialize};

use crate::modules::provider::infrastructure::adapters::common::first_present;

// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JikanItem<T> {
    pub data: T,
}

pub type MalId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub mal_id: MalId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub images: Option<Images>,
}

impl Anime {
    /// Large JPG poster, else the regular one
    pub fn poster_url(&self) -> Option<String> {
        let jpg = self.images.as_ref().and_then(|images| images.jpg.as_ref())?;
        first_present([jpg.large_image_url.as_ref(), jpg.image_url.as_ref()])
    }

    pub fn canonical_title(&self) -> Option<String> {
        first_present([self.title.as_ref()])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub jpg: Option<ImageUrls>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrls {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}
