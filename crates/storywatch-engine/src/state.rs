//! Dashboard view state: the committed snapshot, its filtered subset, and
//! the connection flags, published to consumers over a watch channel.

use tokio::sync::watch;

use storywatch_core::{filter, FilterSpec, Story};

/// Everything the presentation layer reads.
///
/// Consumers only ever observe `([], connected: false)` or
/// `([stories], connected: true)` after a cycle; failures never surface as
/// anything else. While `loading` is true the consumer is expected to render
/// nothing rather than stale data.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Latest committed snapshot, replaced wholesale on every commit.
    pub stories: Vec<Story>,
    /// Visible subset derived from `stories` and the current filter.
    pub visible: Vec<Story>,
    /// Whether the last probe and fetch both succeeded.
    pub connected: bool,
    /// True from the start of a fetch cycle until its commit.
    pub loading: bool,
}

impl DashboardState {
    /// State before the first cycle completes: nothing loaded, nothing
    /// known about the backend.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            stories: Vec::new(),
            visible: Vec::new(),
            connected: false,
            loading: true,
        }
    }
}

/// Result of one poll cycle, before filtering.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub stories: Vec<Story>,
    pub connected: bool,
}

impl CycleOutcome {
    /// Outcome of an unhealthy or failed cycle: explicitly empty, backend
    /// not connected. Placeholder data is never synthesized.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            stories: Vec::new(),
            connected: false,
        }
    }
}

/// Single-writer coordinator for [`DashboardState`].
///
/// Owned by the poller task. Commits replace the snapshot wholesale and
/// recompute the visible subset synchronously; the sequence number guards
/// against a stale cycle overwriting a fresher one. Readers subscribe via
/// [`ViewState::subscribe`] and always observe the latest state.
pub struct ViewState {
    tx: watch::Sender<DashboardState>,
    last_committed: u64,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DashboardState::initial());
        Self {
            tx,
            last_committed: 0,
        }
    }

    /// A new receiver observing every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.tx.subscribe()
    }

    /// Mark a fetch cycle as started.
    pub fn begin_cycle(&self) {
        self.tx.send_modify(|state| state.loading = true);
    }

    /// Commit the outcome of cycle `seq`, replacing the snapshot and
    /// recomputing the visible subset under `spec`.
    ///
    /// Returns `false` and changes nothing if a cycle with an equal or
    /// higher sequence number already committed; a stale response must
    /// never overwrite a fresher snapshot.
    pub fn commit(&mut self, seq: u64, outcome: CycleOutcome, spec: &FilterSpec) -> bool {
        if seq <= self.last_committed {
            return false;
        }
        self.last_committed = seq;
        self.tx.send_modify(|state| {
            state.visible = filter::apply(&outcome.stories, spec);
            state.stories = outcome.stories;
            state.connected = outcome.connected;
            state.loading = false;
        });
        true
    }

    /// Recompute the visible subset from the current snapshot under a new
    /// filter. Touches neither the network nor the snapshot itself.
    pub fn refilter(&self, spec: &FilterSpec) {
        self.tx.send_modify(|state| {
            state.visible = filter::apply(&state.stories, spec);
        });
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storywatch_core::Velocity;

    fn story(id: &str, credibility: u8) -> Story {
        Story {
            id: id.to_string(),
            headline: format!("headline {id}"),
            source: "Test".to_string(),
            platform: "X".to_string(),
            engagement: 100,
            velocity: Velocity::High,
            reason: "test".to_string(),
            timestamp: "2026-08-20 14:30".to_string(),
            credibility,
            url: format!("https://example.com/{id}"),
        }
    }

    fn outcome(ids: &[(&str, u8)]) -> CycleOutcome {
        CycleOutcome {
            stories: ids.iter().map(|(id, c)| story(id, *c)).collect(),
            connected: true,
        }
    }

    #[test]
    fn initial_state_is_loading_and_disconnected() {
        let view = ViewState::new();
        let state = view.subscribe().borrow().clone();
        assert!(state.loading);
        assert!(!state.connected);
        assert!(state.stories.is_empty());
        assert!(state.visible.is_empty());
    }

    #[test]
    fn commit_replaces_snapshot_and_clears_loading() {
        let mut view = ViewState::new();
        let rx = view.subscribe();

        assert!(view.commit(1, outcome(&[("a", 80), ("b", 40)]), &FilterSpec::default()));

        let state = rx.borrow().clone();
        assert_eq!(state.stories.len(), 2);
        assert_eq!(state.visible.len(), 2);
        assert!(state.connected);
        assert!(!state.loading);
    }

    #[test]
    fn commit_applies_the_filter_to_the_visible_subset() {
        let mut view = ViewState::new();
        let rx = view.subscribe();
        let spec = FilterSpec {
            credibility: 50,
            ..FilterSpec::default()
        };

        view.commit(1, outcome(&[("a", 80), ("b", 40)]), &spec);

        let state = rx.borrow().clone();
        assert_eq!(state.stories.len(), 2);
        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.visible[0].id, "a");
    }

    #[test]
    fn stale_commit_is_discarded() {
        let mut view = ViewState::new();
        let rx = view.subscribe();
        let spec = FilterSpec::default();

        assert!(view.commit(2, outcome(&[("fresh", 80)]), &spec));
        assert!(!view.commit(1, outcome(&[("stale", 80)]), &spec));

        let state = rx.borrow().clone();
        assert_eq!(state.stories.len(), 1);
        assert_eq!(state.stories[0].id, "fresh");
    }

    #[test]
    fn equal_sequence_number_is_also_discarded() {
        let mut view = ViewState::new();
        let spec = FilterSpec::default();

        assert!(view.commit(1, outcome(&[("first", 80)]), &spec));
        assert!(!view.commit(1, outcome(&[("again", 80)]), &spec));
    }

    #[test]
    fn failed_cycle_empties_the_snapshot_and_disconnects() {
        let mut view = ViewState::new();
        let rx = view.subscribe();
        let spec = FilterSpec::default();

        view.commit(1, outcome(&[("a", 80)]), &spec);
        view.commit(2, CycleOutcome::unreachable(), &spec);

        let state = rx.borrow().clone();
        assert!(state.stories.is_empty());
        assert!(state.visible.is_empty());
        assert!(!state.connected);
        assert!(!state.loading);
    }

    #[test]
    fn begin_cycle_sets_loading_without_touching_the_snapshot() {
        let mut view = ViewState::new();
        let rx = view.subscribe();
        let spec = FilterSpec::default();

        view.commit(1, outcome(&[("a", 80)]), &spec);
        view.begin_cycle();

        let state = rx.borrow().clone();
        assert!(state.loading);
        assert_eq!(state.stories.len(), 1);
        assert!(state.connected);
    }

    #[test]
    fn refilter_recomputes_visible_from_the_existing_snapshot() {
        let mut view = ViewState::new();
        let rx = view.subscribe();

        view.commit(1, outcome(&[("a", 80), ("b", 40)]), &FilterSpec::default());
        assert_eq!(rx.borrow().visible.len(), 2);

        view.refilter(&FilterSpec {
            credibility: 50,
            ..FilterSpec::default()
        });

        let state = rx.borrow().clone();
        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.visible[0].id, "a");
        assert_eq!(state.stories.len(), 2, "snapshot itself must not shrink");
    }

    #[test]
    fn refilter_back_to_defaults_restores_the_full_snapshot() {
        let mut view = ViewState::new();
        let rx = view.subscribe();

        view.commit(
            1,
            outcome(&[("a", 80), ("b", 40)]),
            &FilterSpec {
                credibility: 50,
                ..FilterSpec::default()
            },
        );
        assert_eq!(rx.borrow().visible.len(), 1);

        view.refilter(&FilterSpec::default());
        assert_eq!(rx.borrow().visible.len(), 2);
    }
}
