//! Response handling shared by all catalog adapters

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::modules::provider::domain::errors::{ProviderError, ProviderResult};
use crate::shared::domain::value_objects::ProviderId;

/// Map a non-retryable HTTP status onto the provider error taxonomy.
///
/// 404 means the catalog has no such entry; any other non-success status is
/// an unusable response.
pub fn check_status(
    provider: ProviderId,
    status: StatusCode,
    query: &str,
) -> ProviderResult<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ProviderError::no_match(provider, query));
    }
    Err(ProviderError::invalid_response(
        provider,
        format!("HTTP {}", status),
    ))
}

/// Read and decode a JSON body, giving up early if the caller cancels
pub async fn decode_json<T>(
    provider: ProviderId,
    response: Response,
    cancel: &CancellationToken,
) -> ProviderResult<T>
where
    T: DeserializeOwned,
{
    let body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ProviderError::Cancelled { provider }),
        body = response.text() => body,
    }
    .map_err(|e| {
        ProviderError::invalid_response(provider, format!("failed to read body: {}", e))
    })?;

    serde_json::from_str(&body).map_err(|e| {
        ProviderError::invalid_response(
            provider,
            format!("failed to parse body: {} ({})", e, truncate(&body, 200)),
        )
    })
}

/// First non-blank value among the candidates
pub fn first_present<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
