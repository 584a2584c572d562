pub mod anime_ref;
pub mod provider_config;

pub use anime_ref::{AnimeRef, QueryKey};
pub use provider_config::ProviderConfig;
