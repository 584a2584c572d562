use thiserror::Error;

use crate::modules::provider::domain::entities::QueryKey;
use crate::modules::provider::infrastructure::http_client::TransportError;
use crate::shared::domain::value_objects::ProviderId;

/// Failure of a single provider step.
///
/// Everything except [`ProviderError::Cancelled`] is local to the step and
/// only advances the resolution chain.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error(transparent)]
    Transport(TransportError),

    #[error("{provider} requires an anime {key}")]
    MissingKey { provider: ProviderId, key: QueryKey },

    #[error("{provider} found no match for {query}")]
    NoMatch { provider: ProviderId, query: String },

    #[error("{provider} candidate '{candidate}' rejected (similarity {score:.2})")]
    SimilarityRejected {
        provider: ProviderId,
        candidate: String,
        score: f64,
    },

    #[error("{provider} returned an unusable response: {message}")]
    InvalidResponse { provider: ProviderId, message: String },

    #[error("{provider} call cancelled")]
    Cancelled { provider: ProviderId },
}

impl ProviderError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProviderError::Cancelled { .. })
    }

    pub fn no_match(provider: ProviderId, query: impl ToString) -> Self {
        ProviderError::NoMatch {
            provider,
            query: query.to_string(),
        }
    }

    pub fn invalid_response(provider: ProviderId, message: impl Into<String>) -> Self {
        ProviderError::InvalidResponse {
            provider,
            message: message.into(),
        }
    }
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled { provider } => ProviderError::Cancelled { provider },
            other => ProviderError::Transport(other),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
