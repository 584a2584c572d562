//! Retry policy shared by every provider call
//!
//! Attempts and backoff apply to a single HTTP exchange. Falling through to
//! the next provider is a separate, non-retried step of the resolution chain.

use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};

/// Configuration for HTTP retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_backoff: Duration,
    /// Multiplier applied to the delay after each failed attempt
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Validated constructor
    pub fn new(
        max_attempts: u32,
        initial_backoff: Duration,
        backoff_multiplier: f64,
    ) -> AppResult<Self> {
        let policy = Self {
            max_attempts,
            initial_backoff,
            backoff_multiplier,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Policy used for all catalog providers: 3 attempts, 500ms doubling
    pub fn standard() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            backoff_multiplier: 2.0,
        }
    }

    /// Same attempt budget without waiting (for tests)
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.max_attempts < 1 {
            return Err(AppError::ValidationError(
                "Retry policy needs at least one attempt".to_string(),
            ));
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(AppError::ValidationError(format!(
                "Backoff multiplier must be a finite number >= 1, got {}",
                self.backoff_multiplier
            )));
        }
        Ok(())
    }

    /// Delay between attempt `attempt` and `attempt + 1` (0-indexed):
    /// `initial_backoff * backoff_multiplier^attempt`
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        Duration::from_millis((self.initial_backoff.as_millis() as f64 * multiplier) as u64)
    }

    /// Full wait schedule for a call that fails every attempt
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts.saturating_sub(1))
            .map(|attempt| self.delay_after(attempt))
            .collect()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy() {
        let policy = RetryPolicy::standard();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_millis(500));
        assert_eq!(policy.backoff_multiplier, 2.0);
    }

    #[test]
    fn test_exponential_schedule() {
        let policy = RetryPolicy::standard();
        assert_eq!(policy.delay_after(0), Duration::from_millis(500));
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
        // Three attempts leave two waits
        assert_eq!(
            policy.schedule(),
            vec![Duration::from_millis(500), Duration::from_millis(1000)]
        );
    }

    #[test]
    fn test_immediate_policy_never_waits() {
        let policy = RetryPolicy::immediate(3);
        assert!(policy.schedule().iter().all(|d| d.is_zero()));
        assert_eq!(RetryPolicy::immediate(0).max_attempts, 1);
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let result = RetryPolicy::new(0, Duration::from_millis(10), 2.0);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_shrinking_multiplier() {
        assert!(RetryPolicy::new(3, Duration::from_millis(10), 0.5).is_err());
        assert!(RetryPolicy::new(3, Duration::from_millis(10), f64::NAN).is_err());
        assert!(RetryPolicy::new(1, Duration::ZERO, 1.0).is_ok());
    }
}
