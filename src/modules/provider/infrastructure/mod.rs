pub mod adapters;
pub mod http_client;

// Re-export commonly used types
pub use adapters::{AniListAdapter, JikanAdapter, KitsuAdapter};
pub use http_client::{RetryPolicy, RetryingTransport, TransportError};
