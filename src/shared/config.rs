//! Application configuration loaded from the environment
//!
//! A `.env` file is read first if present; process variables take precedence.

use std::str::FromStr;
use std::time::Duration;

use crate::modules::provider::domain::entities::ProviderConfig;
use crate::modules::provider::infrastructure::http_client::RetryPolicy;
use crate::shared::domain::value_objects::ProviderId;
use crate::shared::errors::{AppError, AppResult};

const DEFAULT_USER_AGENT: &str = "animerec/0.1";
const DEFAULT_TIMEOUT_SECS: u32 = 10;
const DEFAULT_BATCH_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub anilist: ProviderConfig,
    pub jikan: ProviderConfig,
    pub kitsu: ProviderConfig,
    pub user_agent: String,
    pub retry_policy: RetryPolicy,
    /// Upper bound on references resolved at once in a batch
    pub batch_concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            anilist: ProviderConfig::new(ProviderId::AniList),
            jikan: ProviderConfig::new(ProviderId::Jikan),
            kitsu: ProviderConfig::new(ProviderId::Kitsu),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry_policy: RetryPolicy::standard(),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) and read overrides from the process environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let timeout = parse_or(&lookup, "ANIREC_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout == 0 {
            return Err(AppError::ConfigError(
                "ANIREC_HTTP_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        let provider = |config: ProviderConfig, key: &str| {
            let config = config.with_timeout(timeout);
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(url) => config.with_base_url(url),
                None => config,
            }
        };

        let retry_policy = RetryPolicy::new(
            parse_or(
                &lookup,
                "ANIREC_RETRY_MAX_ATTEMPTS",
                defaults.retry_policy.max_attempts,
            )?,
            Duration::from_millis(parse_or(
                &lookup,
                "ANIREC_RETRY_INITIAL_BACKOFF_MS",
                defaults.retry_policy.initial_backoff.as_millis() as u64,
            )?),
            parse_or(
                &lookup,
                "ANIREC_RETRY_BACKOFF_MULTIPLIER",
                defaults.retry_policy.backoff_multiplier,
            )?,
        )?;

        let batch_concurrency = parse_or(
            &lookup,
            "ANIREC_BATCH_CONCURRENCY",
            defaults.batch_concurrency,
        )?;
        if batch_concurrency == 0 {
            return Err(AppError::ConfigError(
                "ANIREC_BATCH_CONCURRENCY must be at least 1".to_string(),
            ));
        }

        let config = Self {
            anilist: provider(defaults.anilist, "ANIREC_ANILIST_URL"),
            jikan: provider(defaults.jikan, "ANIREC_JIKAN_URL"),
            kitsu: provider(defaults.kitsu, "ANIREC_KITSU_URL"),
            user_agent: lookup("ANIREC_USER_AGENT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            retry_policy,
            batch_concurrency,
        };

        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| {
            AppError::ConfigError(format!("Invalid value '{}' for {}: {}", raw, key, e))
        }),
        _ => Ok(default),
    }
}
