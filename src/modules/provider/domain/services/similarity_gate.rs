use std::sync::Arc;
use strsim::sorensen_dice;

use crate::modules::provider::domain::errors::{ProviderError, ProviderResult};
use crate::shared::domain::value_objects::ProviderId;

/// Minimum score for a candidate name to be trusted (inclusive)
pub const SIMILARITY_THRESHOLD: f64 = 0.70;

/// Strategy for calculating similarity between two strings
///
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
/// Implementations must be symmetric and score identical strings as 1.0.
pub trait SimilarityStrategy: Send + Sync {
    fn calculate(&self, a: &str, b: &str) -> f64;

    /// Get the name of this strategy for logging/debugging
    fn name(&self) -> &'static str;
}

/// Sørensen–Dice coefficient over character bigrams.
///
/// `strsim` drops whitespace before building bigrams, so spacing never affects the score.
#[derive(Debug, Clone, Default)]
pub struct DiceCoefficientStrategy;

impl SimilarityStrategy for DiceCoefficientStrategy {
    fn calculate(&self, a: &str, b: &str) -> f64 {
        sorensen_dice(a, b)
    }

    fn name(&self) -> &'static str {
        "SorensenDice"
    }
}

/// Accepts or rejects a provider's official name against the input name
#[derive(Clone)]
pub struct SimilarityGate {
    strategy: Arc<dyn SimilarityStrategy>,
}

impl SimilarityGate {
    pub fn new() -> Self {
        Self::with_strategy(Arc::new(DiceCoefficientStrategy))
    }

    pub fn with_strategy(strategy: Arc<dyn SimilarityStrategy>) -> Self {
        Self { strategy }
    }

    /// Score after lowercasing both sides; nothing else is normalized
    pub fn score(&self, input_name: &str, candidate_name: &str) -> f64 {
        self.strategy
            .calculate(&input_name.to_lowercase(), &candidate_name.to_lowercase())
    }

    pub fn accept(&self, input_name: &str, candidate_name: &str) -> bool {
        self.score(input_name, candidate_name) >= SIMILARITY_THRESHOLD
    }

    /// Pass the candidate through, or explain the rejection
    pub fn check(
        &self,
        provider: ProviderId,
        input_name: &str,
        candidate: String,
    ) -> ProviderResult<String> {
        let score = self.score(input_name, &candidate);
        if score >= SIMILARITY_THRESHOLD {
            log::debug!(
                "{}: '{}' matches '{}' ({} {:.2})",
                provider,
                candidate,
                input_name,
                self.strategy.name(),
                score
            );
            Ok(candidate)
        } else {
            Err(ProviderError::SimilarityRejected {
                provider,
                candidate,
                score,
            })
        }
    }
}

impl Default for SimilarityGate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimilarityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityGate")
            .field("strategy", &self.strategy.name())
            .field("threshold", &SIMILARITY_THRESHOLD)
            .finish()
    }
}
