//! Client-side story filtering.
//!
//! The visible story set is always derived by re-filtering the latest
//! snapshot, even when the backend already applied a platform or region
//! filter to the query. That redundancy is deliberate: the visible set must
//! never depend on which upstream query happened to produce the snapshot.

use serde::{Deserialize, Serialize};

use crate::story::{Story, Velocity};

/// User-chosen filter criteria.
///
/// `platform`, `show_hot`, and `kenyan_only` shape the upstream query;
/// `velocity` and `credibility` are applied purely client-side. The default
/// spec passes every story: no platform or velocity restriction, threshold
/// zero, general (non-hot) query, no region restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// ASCII case-insensitive platform match; `None` keeps every platform.
    pub platform: Option<String>,
    /// Exact velocity match; `None` keeps every velocity.
    pub velocity: Option<Velocity>,
    /// Inclusive lower bound on credibility, 0 to 100. Zero passes
    /// everything, including stories scored zero.
    pub credibility: u8,
    /// Query the hot/emerging endpoint instead of the general one.
    pub show_hot: bool,
    /// Restrict the upstream query to Kenyan sources. Sent as a query
    /// parameter, never applied client-side.
    pub kenyan_only: bool,
}

impl FilterSpec {
    /// Whether switching from `previous` to `self` changes the upstream
    /// query.
    ///
    /// Platform, hot mode, and the region toggle are all sent upstream, so
    /// changing any of them requires a fresh fetch (and, for hot mode, a new
    /// cadence). Velocity and credibility changes refilter the existing
    /// snapshot without touching the network.
    #[must_use]
    pub fn changes_query(&self, previous: &Self) -> bool {
        self.platform != previous.platform
            || self.show_hot != previous.show_hot
            || self.kenyan_only != previous.kenyan_only
    }
}

/// Apply `spec` to a snapshot, producing the visible subset.
///
/// Pure, deterministic, and order-preserving: surviving stories keep their
/// relative order from `snapshot`. Each story is checked against the active
/// filters in order (platform, velocity, credibility) with short-circuiting.
#[must_use]
pub fn apply(snapshot: &[Story], spec: &FilterSpec) -> Vec<Story> {
    snapshot
        .iter()
        .filter(|story| survives(story, spec))
        .cloned()
        .collect()
}

fn survives(story: &Story, spec: &FilterSpec) -> bool {
    if let Some(platform) = &spec.platform {
        if !story.platform.eq_ignore_ascii_case(platform) {
            return false;
        }
    }
    if let Some(velocity) = spec.velocity {
        if story.velocity != velocity {
            return false;
        }
    }
    story.credibility >= spec.credibility
}
