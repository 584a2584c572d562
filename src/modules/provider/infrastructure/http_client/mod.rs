pub mod retry_policy;
pub mod retrying_transport;

pub use retry_policy::RetryPolicy;
pub use retrying_transport::{create_http_client, HttpRequest, RetryingTransport, TransportError};
