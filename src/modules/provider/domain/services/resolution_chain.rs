//! Ordered provider fallback for image and name resolution
//!
//! Each resolution walks a fixed list of steps, one per provider, strictly in
//! priority order. A step ends `Accepted`, `Skipped` (the reference lacks the
//! provider's query key, no call is made) or `Failed`. Only `Accepted` stops
//! the walk. Provider failures never reach the caller; only cancellation does.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::similarity_gate::SimilarityGate;
use crate::modules::provider::domain::entities::{AnimeRef, QueryKey};
use crate::modules::provider::domain::errors::ProviderError;
use crate::modules::provider::domain::value_objects::{
    ImageResolution, NameResolution, ResolutionResult, FALLBACK_NAME,
};
use crate::modules::provider::traits::MetadataProvider;
use crate::shared::domain::value_objects::ProviderId;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

/// How a name step treats the provider's candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePolicy {
    /// Candidate must pass the similarity gate, otherwise the step fails
    Gated,
    /// Candidate is used as-is (id lookups)
    Trusted,
    /// Candidate must pass the gate, otherwise the input name ends the chain
    GatedOrInputName,
}

/// Terminal state of one provider step
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<T> {
    Accepted(ResolutionResult<T>),
    Skipped,
    Failed(ProviderError),
}

#[derive(Clone)]
pub struct NameStep {
    pub provider: Arc<dyn MetadataProvider>,
    pub policy: NamePolicy,
}

/// Stateless orchestrator over the three catalog adapters
#[derive(Clone)]
pub struct ResolutionChain {
    image_steps: Vec<Arc<dyn MetadataProvider>>,
    name_steps: Vec<NameStep>,
    gate: SimilarityGate,
}

impl ResolutionChain {
    /// Compose the standard chain. Arguments are in priority order:
    /// name-indexed primary, id-indexed secondary, fuzzy name search last.
    pub fn new(
        primary: Arc<dyn MetadataProvider>,
        by_id: Arc<dyn MetadataProvider>,
        fuzzy: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self::with_gate(primary, by_id, fuzzy, SimilarityGate::new())
    }

    pub fn with_gate(
        primary: Arc<dyn MetadataProvider>,
        by_id: Arc<dyn MetadataProvider>,
        fuzzy: Arc<dyn MetadataProvider>,
        gate: SimilarityGate,
    ) -> Self {
        let image_steps = vec![primary.clone(), by_id.clone(), fuzzy.clone()];
        let name_steps = vec![
            NameStep {
                provider: primary,
                policy: NamePolicy::Gated,
            },
            NameStep {
                provider: by_id,
                policy: NamePolicy::Trusted,
            },
            NameStep {
                provider: fuzzy,
                policy: NamePolicy::GatedOrInputName,
            },
        ];

        Self {
            image_steps,
            name_steps,
            gate,
        }
    }

    /// Provider order of the image chain
    pub fn image_order(&self) -> Vec<ProviderId> {
        self.image_steps.iter().map(|p| p.provider_id()).collect()
    }

    /// Provider order and policy of the name chain
    pub fn name_plan(&self) -> Vec<(ProviderId, NamePolicy)> {
        self.name_steps
            .iter()
            .map(|s| (s.provider.provider_id(), s.policy))
            .collect()
    }

    /// Resolve a poster image; the placeholder is returned when every step fails
    pub async fn resolve_image(&self, anime: &AnimeRef) -> ImageResolution {
        self.resolve_image_detailed(anime, &CancellationToken::new())
            .await
            .unwrap_or_else(|_| ResolutionResult::fallback_image())
            .into()
    }

    /// Resolve a display name; there is always a name to show
    pub async fn resolve_name(&self, anime: &AnimeRef) -> NameResolution {
        self.resolve_name_detailed(anime, &CancellationToken::new())
            .await
            .unwrap_or_else(|_| ResolutionResult::fallback(input_or_default(anime)))
            .into()
    }

    /// Image resolution with provenance. Errs only with [`AppError::Cancelled`].
    pub async fn resolve_image_detailed(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> AppResult<ResolutionResult<String>> {
        for provider in &self.image_steps {
            ensure_not_cancelled(cancel, "image", anime)?;

            let outcome = image_step(provider.as_ref(), anime, cancel).await;
            if let Some(result) = settle("image", anime, provider.as_ref(), outcome)? {
                LogContext::resolution_outcome(
                    "image",
                    &anime.to_string(),
                    result.source,
                    &result.value,
                );
                return Ok(result);
            }
        }

        let result = ResolutionResult::fallback_image();
        LogContext::resolution_outcome(
            "image",
            &anime.to_string(),
            result.source,
            &result.value,
        );
        Ok(result)
    }

    /// Name resolution with provenance. Errs only with [`AppError::Cancelled`].
    pub async fn resolve_name_detailed(
        &self,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> AppResult<ResolutionResult<String>> {
        for step in &self.name_steps {
            ensure_not_cancelled(cancel, "name", anime)?;

            let outcome = self.name_step(step, anime, cancel).await;
            if let Some(result) = settle("name", anime, step.provider.as_ref(), outcome)? {
                LogContext::resolution_outcome(
                    "name",
                    &anime.to_string(),
                    result.source,
                    &result.value,
                );
                return Ok(result);
            }
        }

        let result = ResolutionResult::fallback(input_or_default(anime));
        LogContext::resolution_outcome(
            "name",
            &anime.to_string(),
            result.source,
            &result.value,
        );
        Ok(result)
    }

    async fn name_step(
        &self,
        step: &NameStep,
        anime: &AnimeRef,
        cancel: &CancellationToken,
    ) -> StepOutcome<String> {
        let provider = step.provider.as_ref();
        let provider_id = provider.provider_id();

        if !anime.has_key(provider.query_key()) {
            return StepOutcome::Skipped;
        }

        let candidate = match provider.fetch_name(anime, cancel).await {
            Ok(candidate) => candidate,
            Err(e) => return StepOutcome::Failed(e),
        };

        if step.policy == NamePolicy::Trusted {
            return StepOutcome::Accepted(ResolutionResult::accepted(candidate, provider_id));
        }

        let Some(input_name) = anime.name() else {
            return StepOutcome::Failed(ProviderError::MissingKey {
                provider: provider_id,
                key: QueryKey::Name,
            });
        };

        match self.gate.check(provider_id, input_name, candidate) {
            Ok(name) => StepOutcome::Accepted(ResolutionResult::accepted(name, provider_id)),
            Err(rejection) if step.policy == NamePolicy::GatedOrInputName => {
                log::warn!("{}, keeping input name '{}'", rejection, input_name);
                StepOutcome::Accepted(ResolutionResult::fallback(input_name.to_string()))
            }
            Err(rejection) => StepOutcome::Failed(rejection),
        }
    }
}

async fn image_step(
    provider: &dyn MetadataProvider,
    anime: &AnimeRef,
    cancel: &CancellationToken,
) -> StepOutcome<String> {
    if !anime.has_key(provider.query_key()) {
        return StepOutcome::Skipped;
    }

    match provider.fetch_image(anime, cancel).await {
        Ok(url) if !url.trim().is_empty() => {
            StepOutcome::Accepted(ResolutionResult::accepted(url, provider.provider_id()))
        }
        Ok(_) => StepOutcome::Failed(ProviderError::no_match(provider.provider_id(), anime)),
        Err(e) => StepOutcome::Failed(e),
    }
}

/// Log a step's terminal state and turn it into chain control flow
fn settle(
    task: &str,
    anime: &AnimeRef,
    provider: &dyn MetadataProvider,
    outcome: StepOutcome<String>,
) -> AppResult<Option<ResolutionResult<String>>> {
    match outcome {
        StepOutcome::Accepted(result) => Ok(Some(result)),
        StepOutcome::Skipped => {
            log::debug!(
                "Resolve {}: skipping {} for {} (no {})",
                task,
                provider.provider_id(),
                anime,
                provider.query_key()
            );
            Ok(None)
        }
        StepOutcome::Failed(e) if e.is_cancelled() => {
            Err(AppError::Cancelled(format!("{} resolution for {}", task, anime)))
        }
        StepOutcome::Failed(e @ ProviderError::NoMatch { .. }) => {
            log::info!("Resolve {}: {}, trying next provider", task, e);
            Ok(None)
        }
        StepOutcome::Failed(e) => {
            log::warn!("Resolve {}: {}, trying next provider", task, e);
            Ok(None)
        }
    }
}

fn ensure_not_cancelled(cancel: &CancellationToken, task: &str, anime: &AnimeRef) -> AppResult<()> {
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled(format!("{} resolution for {}", task, anime)));
    }
    Ok(())
}

fn input_or_default(anime: &AnimeRef) -> String {
    anime.name().unwrap_or(FALLBACK_NAME).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::provider::infrastructure::http_client::TransportError;
    use crate::modules::provider::traits::MockMetadataProvider;

    fn provider(id: ProviderId, key: QueryKey) -> MockMetadataProvider {
        let mut mock = MockMetadataProvider::new();
        mock.expect_provider_id().return_const(id);
        mock.expect_query_key().return_const(key);
        mock
    }

    fn anilist() -> MockMetadataProvider {
        provider(ProviderId::AniList, QueryKey::Name)
    }

    fn jikan() -> MockMetadataProvider {
        provider(ProviderId::Jikan, QueryKey::Id)
    }

    fn kitsu() -> MockMetadataProvider {
        provider(ProviderId::Kitsu, QueryKey::Name)
    }

    fn chain(
        a: MockMetadataProvider,
        b: MockMetadataProvider,
        c: MockMetadataProvider,
    ) -> ResolutionChain {
        ResolutionChain::new(Arc::new(a), Arc::new(b), Arc::new(c))
    }

    fn exhausted(provider: ProviderId) -> ProviderError {
        ProviderError::Transport(TransportError::Exhausted {
            provider,
            attempts: 3,
            cause: "server returned 500 Internal Server Error".to_string(),
        })
    }

    #[test]
    fn test_plan_is_fixed_priority() {
        let chain = chain(anilist(), jikan(), kitsu());
        assert_eq!(chain.image_order(), ProviderId::PRIORITY.to_vec());
        assert_eq!(
            chain.name_plan(),
            vec![
                (ProviderId::AniList, NamePolicy::Gated),
                (ProviderId::Jikan, NamePolicy::Trusted),
                (ProviderId::Kitsu, NamePolicy::GatedOrInputName),
            ]
        );
    }

    #[tokio::test]
    async fn test_name_short_circuits_on_first_provider() {
        let mut a = anilist();
        a.expect_fetch_name()
            .times(1)
            .returning(|_, _| Ok("Fullmetal Alchemist: Brotherhood".to_string()));
        let mut b = jikan();
        b.expect_fetch_name().times(0);
        let mut c = kitsu();
        c.expect_fetch_name().times(0);

        let anime = AnimeRef::new(Some(5114), Some("Fullmetal Alchemist: Brotherhood"));
        let result = chain(a, b, c)
            .resolve_name_detailed(&anime, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.value, "Fullmetal Alchemist: Brotherhood");
        assert_eq!(result.source, ProviderId::AniList);
        assert!(result.accepted);
    }

    #[tokio::test]
    async fn test_image_short_circuits_on_first_provider() {
        let mut a = anilist();
        a.expect_fetch_image()
            .times(1)
            .returning(|_, _| Ok("https://s4.anilist.co/cover.jpg".to_string()));
        let mut b = jikan();
        b.expect_fetch_image().times(0);
        let mut c = kitsu();
        c.expect_fetch_image().times(0);

        let anime = AnimeRef::new(Some(5114), Some("Fullmetal Alchemist: Brotherhood"));
        let image = chain(a, b, c).resolve_image(&anime).await;
        assert_eq!(image.image_url, "https://s4.anilist.co/cover.jpg");
    }

    #[tokio::test]
    async fn test_image_falls_through_in_order() {
        let mut a = anilist();
        a.expect_fetch_image()
            .times(1)
            .returning(|_, _| Err(exhausted(ProviderId::AniList)));
        let mut b = jikan();
        b.expect_fetch_image()
            .times(1)
            .returning(|anime, _| Err(ProviderError::no_match(ProviderId::Jikan, anime)));
        let mut c = kitsu();
        c.expect_fetch_image()
            .times(1)
            .returning(|_, _| Ok("https://media.kitsu.app/poster.jpg".to_string()));

        let anime = AnimeRef::new(Some(1), Some("Cowboy Bebop"));
        let result = chain(a, b, c)
            .resolve_image_detailed(&anime, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.source, ProviderId::Kitsu);
        assert_eq!(result.value, "https://media.kitsu.app/poster.jpg");
    }

    #[tokio::test]
    async fn test_empty_reference_returns_placeholder_without_calls() {
        let mut a = anilist();
        a.expect_fetch_image().times(0);
        let mut b = jikan();
        b.expect_fetch_image().times(0);
        let mut c = kitsu();
        c.expect_fetch_image().times(0);

        let result = chain(a, b, c)
            .resolve_image_detailed(&AnimeRef::default(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.value, "/placeholder.svg");
        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn test_id_only_image_skips_name_providers() {
        let mut a = anilist();
        a.expect_fetch_image().times(0);
        let mut b = jikan();
        b.expect_fetch_image()
            .times(1)
            .returning(|_, _| Ok("https://cdn.myanimelist.net/images/anime/1.jpg".to_string()));
        let mut c = kitsu();
        c.expect_fetch_image().times(0);

        let image = chain(a, b, c).resolve_image(&AnimeRef::from_id(1)).await;
        assert_eq!(image.image_url, "https://cdn.myanimelist.net/images/anime/1.jpg");
    }

    #[tokio::test]
    async fn test_blank_image_url_is_not_accepted() {
        let mut a = anilist();
        a.expect_fetch_image().times(1).returning(|_, _| Ok("  ".to_string()));
        let mut b = jikan();
        b.expect_fetch_image().times(0);
        let mut c = kitsu();
        c.expect_fetch_image()
            .times(1)
            .returning(|anime, _| Err(ProviderError::no_match(ProviderId::Kitsu, anime)));

        let image = chain(a, b, c).resolve_image(&AnimeRef::from_name("Clannad")).await;
        assert_eq!(image.image_url, "/placeholder.svg");
    }

    #[tokio::test]
    async fn test_rejected_primary_name_falls_to_trusted_id_lookup() {
        let mut a = anilist();
        a.expect_fetch_name()
            .times(1)
            .returning(|_, _| Ok("Totally Different Title".to_string()));
        let mut b = jikan();
        // Id lookups are not gated, however unrelated the title looks
        b.expect_fetch_name()
            .times(1)
            .returning(|_, _| Ok("Kanon (2006)".to_string()));
        let mut c = kitsu();
        c.expect_fetch_name().times(0);

        let anime = AnimeRef::new(Some(2167), Some("Clannad"));
        let result = chain(a, b, c)
            .resolve_name_detailed(&anime, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.value, "Kanon (2006)");
        assert_eq!(result.source, ProviderId::Jikan);
    }

    #[tokio::test]
    async fn test_last_provider_rejection_keeps_input_name() {
        let mut a = anilist();
        a.expect_fetch_name()
            .times(1)
            .returning(|_, _| Err(exhausted(ProviderId::AniList)));
        let mut b = jikan();
        b.expect_fetch_name().times(0);
        let mut c = kitsu();
        c.expect_fetch_name()
            .times(1)
            .returning(|_, _| Ok("Totally Different Title".to_string()));

        let result = chain(a, b, c)
            .resolve_name_detailed(&AnimeRef::from_name("Clannad"), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.value, "Clannad");
        assert_eq!(result.source, ProviderId::Fallback);
    }

    #[tokio::test]
    async fn test_last_provider_accepted_candidate() {
        let mut a = anilist();
        a.expect_fetch_name()
            .times(1)
            .returning(|anime, _| Err(ProviderError::no_match(ProviderId::AniList, anime)));
        let b = jikan();
        let mut c = kitsu();
        c.expect_fetch_name()
            .times(1)
            .returning(|_, _| Ok("CLANNAD".to_string()));

        let name = chain(a, b, c).resolve_name(&AnimeRef::from_name("Clannad")).await;
        assert_eq!(name.name, "CLANNAD");
    }

    #[tokio::test]
    async fn test_name_never_empty_when_all_providers_fail() {
        let mut a = anilist();
        a.expect_fetch_name()
            .returning(|_, _| Err(exhausted(ProviderId::AniList)));
        let mut b = jikan();
        b.expect_fetch_name()
            .returning(|_, _| Err(exhausted(ProviderId::Jikan)));
        let mut c = kitsu();
        c.expect_fetch_name()
            .returning(|_, _| Err(exhausted(ProviderId::Kitsu)));

        let anime = AnimeRef::new(Some(9253), Some("Steins;Gate"));
        let name = chain(a, b, c).resolve_name(&anime).await;
        assert_eq!(name.name, "Steins;Gate");
    }

    #[tokio::test]
    async fn test_id_only_name_falls_back_to_unknown_title() {
        let a = anilist();
        let mut b = jikan();
        b.expect_fetch_name()
            .times(1)
            .returning(|_, _| Err(exhausted(ProviderId::Jikan)));
        let c = kitsu();

        let name = chain(a, b, c).resolve_name(&AnimeRef::from_id(42)).await;
        assert_eq!(name.name, "Unknown Title");
    }

    #[tokio::test]
    async fn test_cancellation_is_not_converted_to_fallback() {
        let mut a = anilist();
        a.expect_fetch_image().times(1).returning(|_, _| {
            Err(ProviderError::Cancelled {
                provider: ProviderId::AniList,
            })
        });
        let mut b = jikan();
        b.expect_fetch_image().times(0);
        let mut c = kitsu();
        c.expect_fetch_image().times(0);

        let result = chain(a, b, c)
            .resolve_image_detailed(
                &AnimeRef::new(Some(1), Some("Cowboy Bebop")),
                &CancellationToken::new(),
            )
            .await;
        assert!(matches!(result, Err(AppError::Cancelled(_))));
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_before_first_step() {
        let mut a = anilist();
        a.expect_fetch_name().times(0);
        let b = jikan();
        let c = kitsu();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = chain(a, b, c)
            .resolve_name_detailed(&AnimeRef::from_name("Clannad"), &cancel)
            .await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
