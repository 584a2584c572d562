pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod traits;

// Re-exports for easy external access - only export what's actually used
pub use application::service::MetadataService;
pub use domain::entities::AnimeRef;
pub use domain::services::ResolutionChain;
pub use domain::value_objects::{ImageResolution, NameResolution};
pub use traits::MetadataProvider;
