//! Story query command handlers.
//!
//! These hit the backend once and exit. The backend narrows by platform
//! and region; velocity and credibility are applied locally after the
//! fetch, the same way the live view treats them.

use chrono::Utc;

use storywatch_client::{DashboardClient, StoryQuery};
use storywatch_core::{filter, FilterSpec};

use crate::render;

/// List trending stories as a table or raw JSON.
///
/// Probes backend health first, like a live-view cycle does; an unhealthy
/// backend aborts the command instead of printing an empty table that could
/// pass for a real result.
///
/// # Errors
///
/// Returns an error if the backend is unhealthy, cannot be reached, or
/// returns a payload that does not parse.
pub(crate) async fn run_stories(
    client: &DashboardClient,
    spec: &FilterSpec,
    limit: u32,
    hours_back: u32,
    min_score: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    if !client.is_healthy().await {
        anyhow::bail!("backend is unreachable or unhealthy; no stories fetched");
    }

    let fetched = if spec.show_hot {
        client.hot_stories(spec.kenyan_only, limit).await?
    } else {
        let query = StoryQuery {
            limit: Some(limit),
            min_score,
            platform: spec.platform.clone(),
            hours_back: Some(hours_back),
            is_kenyan: spec.kenyan_only.then_some(true),
        };
        client.stories(&query).await?
    };

    let visible = filter::apply(&fetched, spec);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("no stories match the current filters");
        return Ok(());
    }

    println!("{} trending stories detected", visible.len());
    println!();
    print!("{}", render::story_table(&visible, Utc::now()));
    Ok(())
}

/// Show full details for one story.
///
/// # Errors
///
/// Returns an error if the story does not exist or the backend cannot be
/// reached.
pub(crate) async fn run_story(
    client: &DashboardClient,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let story = client
        .story(id)
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch story '{id}': {e}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&story)?);
        return Ok(());
    }

    println!("Headline:    {}", story.headline);
    println!("Platform:    {}", story.platform);
    println!("Velocity:    {}", story.velocity);
    println!("Engagement:  {}", render::fmt_engagement(story.engagement));
    println!("Credibility: {}%", story.credibility);
    println!("Source:      {}", story.source);
    println!("Reason:      {}", story.reason);
    println!(
        "Posted:      {} ({})",
        render::fmt_ago(&story.timestamp, Utc::now()),
        story.timestamp
    );
    println!("URL:         {}", story.url);
    Ok(())
}
