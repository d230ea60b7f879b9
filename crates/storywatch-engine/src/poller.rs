//! The polling schedule: a single cancellable task driving fetch cycles.
//!
//! One task owns the whole timeline. Every cycle probes backend health,
//! fetches a snapshot if healthy, and commits the result to the view state
//! under a monotonically increasing sequence number. At most one cycle is
//! ever in flight; the loop awaits each cycle before sleeping, so ticks can
//! never overlap, and the sequence guard in the view state keeps even an
//! abandoned cycle from committing out of order.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use storywatch_core::{AppConfig, FilterSpec};

use crate::feed::StoryFeed;
use crate::state::{CycleOutcome, DashboardState, ViewState};

/// Poll intervals for the two query modes.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Interval between cycles for the general query.
    pub refresh_interval: Duration,
    /// Interval between cycles while hot mode is active.
    pub hot_refresh_interval: Duration,
}

impl EngineConfig {
    /// Intervals from application configuration.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            refresh_interval: Duration::from_secs(config.refresh_secs),
            hot_refresh_interval: Duration::from_secs(config.hot_refresh_secs),
        }
    }

    /// The cadence for the given filter mode: hot mode polls faster.
    #[must_use]
    pub fn cadence(&self, spec: &FilterSpec) -> Duration {
        if spec.show_hot {
            self.hot_refresh_interval
        } else {
            self.refresh_interval
        }
    }
}

impl Default for EngineConfig {
    /// Production cadences: five minutes for the general query, two
    /// minutes in hot mode.
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(300),
            hot_refresh_interval: Duration::from_secs(120),
        }
    }
}

/// A configured polling engine, not yet running.
///
/// [`Poller::start`] spawns the task and hands back the [`PollerHandle`]
/// controlling it.
pub struct Poller<F> {
    feed: F,
    config: EngineConfig,
    spec: FilterSpec,
}

impl<F: StoryFeed> Poller<F> {
    #[must_use]
    pub fn new(feed: F, config: EngineConfig, spec: FilterSpec) -> Self {
        Self { feed, config, spec }
    }

    /// Spawn the polling task. The first fetch cycle begins immediately;
    /// subsequent cycles follow the cadence for the active mode.
    #[must_use]
    pub fn start(self) -> PollerHandle {
        let view = ViewState::new();
        let state = view.subscribe();
        let (filters_tx, filters_rx) = watch::channel(self.spec.clone());
        let (shutdown_tx, shutdown_rx) = watch::channel(());

        let task = tokio::spawn(run(
            self.feed,
            self.config,
            self.spec,
            view,
            filters_rx,
            shutdown_rx,
        ));

        PollerHandle {
            state,
            filters: filters_tx,
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running poller.
///
/// Dropping the handle cancels the task just like [`PollerHandle::stop`],
/// minus the join; either way no commit can land afterwards.
pub struct PollerHandle {
    state: watch::Receiver<DashboardState>,
    filters: watch::Sender<FilterSpec>,
    shutdown: watch::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Receiver for the live dashboard state.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<DashboardState> {
        self.state.clone()
    }

    /// Replace the active filter spec.
    ///
    /// A change to the upstream query (platform, hot mode, region) cancels
    /// the current schedule, including any in-flight fetch, and starts a
    /// fresh cycle immediately at the new cadence. A display-only change
    /// (velocity, credibility) refilters the current snapshot in place
    /// without touching the network.
    pub fn update_filters(&self, spec: FilterSpec) {
        // Err means the task already ended; nothing left to update.
        let _ = self.filters.send(spec);
    }

    /// Stop the poller and wait for its task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        let _ = self.task.await;
    }
}

async fn run<F: StoryFeed>(
    feed: F,
    config: EngineConfig,
    mut spec: FilterSpec,
    mut view: ViewState,
    mut filters: watch::Receiver<FilterSpec>,
    mut shutdown: watch::Receiver<()>,
) {
    let mut seq: u64 = 0;
    let mut filters_open = true;

    'cycle: loop {
        seq += 1;
        view.begin_cycle();

        // The cycle runs against the filters as of its start; a display-only
        // change mid-flight must not alter the query in progress.
        let cycle = run_cycle(&feed, spec.clone());
        tokio::pin!(cycle);

        let outcome = loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => return,
                changed = filters.changed(), if filters_open => match changed {
                    Ok(()) => {
                        if apply_filter_change(&mut filters, &mut spec, &view) {
                            // Abandon the in-flight cycle; the dropped
                            // future can never commit.
                            continue 'cycle;
                        }
                    }
                    Err(_) => filters_open = false,
                },
                outcome = &mut cycle => break outcome,
            }
        };

        view.commit(seq, outcome, &spec);

        let sleep = tokio::time::sleep(config.cadence(&spec));
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => return,
                changed = filters.changed(), if filters_open => match changed {
                    Ok(()) => {
                        if apply_filter_change(&mut filters, &mut spec, &view) {
                            continue 'cycle;
                        }
                    }
                    Err(_) => filters_open = false,
                },
                () = &mut sleep => break,
            }
        }
    }
}

/// Absorb an updated filter spec, refiltering the current snapshot.
///
/// Returns true when the update changes the upstream query, in which case
/// the caller must start a fresh cycle immediately.
fn apply_filter_change(
    filters: &mut watch::Receiver<FilterSpec>,
    spec: &mut FilterSpec,
    view: &ViewState,
) -> bool {
    let updated = filters.borrow_and_update().clone();
    let requery = updated.changes_query(spec);
    *spec = updated;
    view.refilter(spec);
    requery
}

/// One poll cycle: health probe, then fetch if healthy.
///
/// Failures never escape this function; they collapse into an empty,
/// disconnected outcome. The committed snapshot is only ever real upstream
/// data or explicitly empty.
async fn run_cycle<F: StoryFeed>(feed: &F, spec: FilterSpec) -> CycleOutcome {
    if !feed.probe().await {
        tracing::warn!("health probe failed; committing empty snapshot");
        return CycleOutcome::unreachable();
    }

    match feed.fetch(&spec).await {
        Ok(stories) => {
            tracing::debug!(
                count = stories.len(),
                hot = spec.show_hot,
                "fetched story snapshot"
            );
            CycleOutcome {
                stories,
                connected: true,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "story fetch failed; committing empty snapshot");
            CycleOutcome::unreachable()
        }
    }
}
