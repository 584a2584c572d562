use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::modules::provider::domain::entities::AnimeRef;
use crate::modules::provider::domain::value_objects::FALLBACK_NAME;

/// A recommendation row as returned by the recommendation backend.
///
/// Only `anime_id` and `anime_name` are interpreted; every other field is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anime_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anime_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recommendation {
    pub fn new(anime_id: Option<u32>, anime_name: Option<&str>) -> Self {
        Self {
            anime_id,
            anime_name: anime_name.map(str::to_string),
            extra: Map::new(),
        }
    }

    /// Reference used for name resolution; a missing name searches for the placeholder title
    pub fn anime_ref(&self) -> AnimeRef {
        let name = self
            .anime_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(FALLBACK_NAME);
        AnimeRef::new(self.anime_id, Some(name))
    }
}
