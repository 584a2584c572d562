use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog services consulted during metadata resolution.
///
/// Variant order is the fixed resolution priority; `Fallback` marks a value
/// that did not come from any provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    /// AniList GraphQL API (name-indexed)
    #[serde(rename = "anilist")]
    AniList,
    /// Jikan (MyAnimeList API), looked up by MAL id
    #[serde(rename = "jikan")]
    Jikan,
    /// Kitsu API (name-indexed, fuzzy search)
    #[serde(rename = "kitsu")]
    Kitsu,
    /// Sentinel source for placeholder values
    #[serde(rename = "fallback")]
    Fallback,
}

impl ProviderId {
    /// Providers in resolution priority order
    pub const PRIORITY: [ProviderId; 3] = [ProviderId::AniList, ProviderId::Jikan, ProviderId::Kitsu];

    pub fn is_fallback(&self) -> bool {
        matches!(self, ProviderId::Fallback)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderId::AniList => "AniList",
            ProviderId::Jikan => "Jikan",
            ProviderId::Kitsu => "Kitsu",
            ProviderId::Fallback => "Fallback",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            ProviderId::PRIORITY,
            [ProviderId::AniList, ProviderId::Jikan, ProviderId::Kitsu]
        );
        assert!(ProviderId::PRIORITY.iter().all(|p| !p.is_fallback()));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ProviderId::Kitsu).unwrap(), "\"kitsu\"");
        let parsed: ProviderId = serde_json::from_str("\"anilist\"").unwrap();
        assert_eq!(parsed, ProviderId::AniList);
    }
}
