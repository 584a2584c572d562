//! AniList GraphQL queries

/// Best match for a free-text title, with every field either resolution task needs
pub const MEDIA_SEARCH_QUERY: &str = r#"
query ($search: String) {
  Media(search: $search, type: ANIME) {
    title {
      romaji
      english
      native
    }
    coverImage {
      extraLarge
      large
      medium
    }
  }
}
"#;
