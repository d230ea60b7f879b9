//! Live synchronization engine for the story dashboard.
//!
//! Couples a [`StoryFeed`] (health probe plus snapshot fetch) to a polling
//! schedule and a shared [`DashboardState`]. Consumers start a [`Poller`],
//! watch the state receiver for committed snapshots, and push filter
//! changes through the [`PollerHandle`] without caring which changes
//! trigger a refetch and which only refilter.

pub mod feed;
pub mod poller;
pub mod state;

pub use feed::{FetchError, HttpStoryFeed, StoryFeed};
pub use poller::{EngineConfig, Poller, PollerHandle};
pub use state::{CycleOutcome, DashboardState, ViewState};
