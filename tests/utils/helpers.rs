use std::sync::Arc;
use std::time::Duration;

use animerec_lib::modules::provider::infrastructure::{
    AniListAdapter, JikanAdapter, KitsuAdapter, RetryPolicy, RetryingTransport,
};
use animerec_lib::modules::provider::{MetadataService, ResolutionChain};
use animerec_lib::shared::utils::logger::init_logger;
use animerec_lib::ProviderId;
use wiremock::MockServer;

pub const TEST_USER_AGENT: &str = "animerec-tests";

/// Transport without backoff so retry tests stay fast
pub fn fast_transport(provider: ProviderId, attempts: u32) -> RetryingTransport {
    transport_with_policy(provider, RetryPolicy::immediate(attempts))
}

pub fn transport_with_policy(provider: ProviderId, policy: RetryPolicy) -> RetryingTransport {
    RetryingTransport::with_timeout(provider, policy, Duration::from_secs(5), TEST_USER_AGENT)
        .expect("test client should build")
}

pub fn anilist_adapter(server: &MockServer) -> AniListAdapter {
    AniListAdapter::with_transport(fast_transport(ProviderId::AniList, 3), &server.uri())
}

pub fn jikan_adapter(server: &MockServer) -> JikanAdapter {
    JikanAdapter::with_transport(fast_transport(ProviderId::Jikan, 3), &server.uri())
}

pub fn kitsu_adapter(server: &MockServer) -> KitsuAdapter {
    KitsuAdapter::with_transport(fast_transport(ProviderId::Kitsu, 3), &server.uri())
}

/// Three catalog mocks behind a real chain
pub struct TestCatalogs {
    pub anilist: MockServer,
    pub jikan: MockServer,
    pub kitsu: MockServer,
}

impl TestCatalogs {
    pub async fn start() -> Self {
        init_logger();
        Self {
            anilist: MockServer::start().await,
            jikan: MockServer::start().await,
            kitsu: MockServer::start().await,
        }
    }

    pub fn chain(&self) -> ResolutionChain {
        ResolutionChain::new(
            Arc::new(anilist_adapter(&self.anilist)),
            Arc::new(jikan_adapter(&self.jikan)),
            Arc::new(kitsu_adapter(&self.kitsu)),
        )
    }

    pub fn service(&self) -> MetadataService {
        MetadataService::with_chain(self.chain(), 4)
    }
}
