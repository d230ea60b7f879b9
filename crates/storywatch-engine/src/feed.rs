//! The upstream story source consumed by the poller.
//!
//! [`StoryFeed`] is the seam between scheduling and HTTP: the poller only
//! ever probes health and fetches snapshots, so tests can substitute a
//! scripted feed and drive the whole engine without a server.

use std::future::Future;

use thiserror::Error;

use storywatch_client::{DashboardClient, StoryQuery};
use storywatch_core::{FilterSpec, Story};

/// Number of stories requested from the hot/emerging query.
pub const HOT_STORY_LIMIT: u32 = 6;
/// Number of stories requested from the general query.
pub const STORY_LIMIT: u32 = 50;
/// Look-back window for the general query, in hours.
pub const HOURS_BACK: u32 = 24;

/// A fetch cycle failed.
///
/// Network failures, non-2xx statuses, and malformed payloads all collapse
/// here; the poller treats every flavor identically and commits an empty
/// snapshot.
#[derive(Debug, Clone, Error)]
#[error("story fetch failed: {0}")]
pub struct FetchError(pub String);

/// Upstream story source.
///
/// Both methods run on the poller's own timeline; neither is expected to
/// panic. A probe answers `false` for an unreachable or unhealthy backend,
/// and `fetch` is only invoked after a successful probe in the same cycle.
pub trait StoryFeed: Send + Sync + 'static {
    /// Health probe preceding every fetch.
    fn probe(&self) -> impl Future<Output = bool> + Send;

    /// Fetch a fresh snapshot for `spec`. Hot mode routes to the
    /// hot/emerging query; everything else uses the general query.
    fn fetch(
        &self,
        spec: &FilterSpec,
    ) -> impl Future<Output = Result<Vec<Story>, FetchError>> + Send;
}

/// Production feed backed by the dashboard HTTP client.
pub struct HttpStoryFeed {
    client: DashboardClient,
}

impl HttpStoryFeed {
    #[must_use]
    pub fn new(client: DashboardClient) -> Self {
        Self { client }
    }
}

impl StoryFeed for HttpStoryFeed {
    async fn probe(&self) -> bool {
        self.client.is_healthy().await
    }

    async fn fetch(&self, spec: &FilterSpec) -> Result<Vec<Story>, FetchError> {
        let result = if spec.show_hot {
            self.client
                .hot_stories(spec.kenyan_only, HOT_STORY_LIMIT)
                .await
        } else {
            let query = StoryQuery {
                limit: Some(STORY_LIMIT),
                hours_back: Some(HOURS_BACK),
                platform: spec.platform.clone(),
                is_kenyan: spec.kenyan_only.then_some(true),
                min_score: None,
            };
            self.client.stories(&query).await
        };

        result.map_err(|e| FetchError(e.to_string()))
    }
}
