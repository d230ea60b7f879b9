//! Live dashboard view driven by the polling engine.
//!
//! Starts a poller against the backend and re-renders the story table on
//! every committed snapshot until ctrl-c. Frames published while a cycle
//! is still loading are skipped, so the first thing printed is real data
//! (or an explicit offline notice), never a partial view.

use chrono::Utc;

use storywatch_client::DashboardClient;
use storywatch_core::{AppConfig, FilterSpec};
use storywatch_engine::feed::HttpStoryFeed;
use storywatch_engine::poller::{EngineConfig, Poller};
use storywatch_engine::state::DashboardState;

use crate::render;

/// Run the live view until interrupted.
///
/// # Errors
///
/// Currently infallible past argument handling; the poller reports backend
/// trouble through the rendered frames instead of aborting.
pub(crate) async fn run_watch(
    client: DashboardClient,
    config: &AppConfig,
    spec: FilterSpec,
) -> anyhow::Result<()> {
    let feed = HttpStoryFeed::new(client);
    let engine_config = EngineConfig::from_app_config(config);
    let cadence = engine_config.cadence(&spec).as_secs();
    let handle = Poller::new(feed, engine_config, spec).start();
    let mut state = handle.state();

    println!("watching for trending stories (refresh every {cadence}s, ctrl-c to exit)");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = state.borrow_and_update().clone();
                render_frame(&snapshot);
            }
        }
    }

    handle.stop().await;
    println!("stopped");
    Ok(())
}

fn render_frame(state: &DashboardState) {
    if state.loading {
        return;
    }

    println!();
    if !state.connected {
        println!("backend offline; dashboard cleared");
        return;
    }

    let now = Utc::now();
    println!(
        "{} trending stories detected as of {}",
        state.visible.len(),
        now.format("%H:%M:%S")
    );
    if state.visible.is_empty() {
        println!("no stories match the current filters");
        return;
    }
    print!("{}", render::story_table(&state.visible, now));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping watch");
}
