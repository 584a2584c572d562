pub mod modules;
pub mod shared;

// Re-exports for easy external access
pub use modules::provider::{
    AnimeRef, ImageResolution, MetadataService, NameResolution, ResolutionChain,
};
pub use shared::{config::AppConfig, ProviderId};
