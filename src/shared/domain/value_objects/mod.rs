pub mod anime_provider;

pub use anime_provider::ProviderId;
