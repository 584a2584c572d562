use serde::{Deserialize, Serialize};
use std::fmt;

/// Which field of an [`AnimeRef`] a provider looks up by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKey {
    Name,
    Id,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Name => write!(f, "name"),
            QueryKey::Id => write!(f, "id"),
        }
    }
}

/// Input to every resolution call: a MyAnimeList id, a free-text name, or both.
///
/// Blank names are normalized to `None` on construction, so a present name is
/// always usable as a search query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawAnimeRef")]
pub struct AnimeRef {
    id: Option<u32>,
    name: Option<String>,
}

/// Wire form of [`AnimeRef`]; deserialization goes through [`AnimeRef::new`]
#[derive(Deserialize)]
struct RawAnimeRef {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    name: Option<String>,
}

impl From<RawAnimeRef> for AnimeRef {
    fn from(raw: RawAnimeRef) -> Self {
        AnimeRef::new(raw.id, raw.name)
    }
}

impl AnimeRef {
    pub fn new(id: Option<u32>, name: Option<impl Into<String>>) -> Self {
        let name = name
            .map(Into::into)
            .filter(|n: &String| !n.trim().is_empty());
        Self { id, name }
    }

    pub fn from_id(id: u32) -> Self {
        Self::new(id.into(), None::<String>)
    }

    pub fn from_name(name: impl Into<String>) -> Self {
        Self::new(None, Some(name))
    }

    /// Build from raw query-string values, where an empty string means absent.
    ///
    /// A non-numeric id is dropped rather than rejected.
    pub fn from_query(anime_id: Option<&str>, anime_name: Option<&str>) -> Self {
        let id = anime_id
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match raw.parse::<u32>() {
                Ok(id) => Some(id),
                Err(_) => {
                    log::warn!("Ignoring non-numeric anime id '{}'", raw);
                    None
                }
            });
        Self::new(id, anime_name)
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_key(&self, key: QueryKey) -> bool {
        match key {
            QueryKey::Name => self.name.is_some(),
            QueryKey::Id => self.id.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}

impl fmt::Display for AnimeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.id, &self.name) {
            (Some(id), Some(name)) => write!(f, "'{}' (#{})", name, id),
            (Some(id), None) => write!(f, "#{}", id),
            (None, Some(name)) => write!(f, "'{}'", name),
            (None, None) => write!(f, "<empty>"),
        }
    }
}
