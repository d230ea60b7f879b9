//! Source management command handlers.

use chrono::Utc;

use storywatch_client::DashboardClient;

use crate::render;

/// List monitored sources as a table or raw JSON.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or returns a payload
/// that does not parse.
pub(crate) async fn run_sources(
    client: &DashboardClient,
    kenyan_only: bool,
    json: bool,
) -> anyhow::Result<()> {
    let sources = client.sources(kenyan_only.then_some(true)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    if sources.is_empty() {
        println!("no sources configured");
        return Ok(());
    }

    let now = Utc::now();
    let header = format!(
        "{:<6}{:<13}{:<22}{:<26}{:<9}{:<8}LAST CHECKED",
        "ID", "PLATFORM", "HANDLE", "NAME", "TRUSTED", "KENYAN"
    );
    println!("{header}");
    for source in &sources {
        let checked = source
            .last_checked_at
            .as_deref()
            .map_or_else(|| "\u{2014}".to_string(), |ts| render::fmt_ago(ts, now));
        println!(
            "{:<6}{:<13}{:<22}{:<26}{:<9}{:<8}{}",
            source.id,
            render::truncate(&source.platform, 12),
            render::truncate(&source.account_handle, 21),
            render::truncate(&source.account_name, 25),
            if source.is_trusted { "yes" } else { "no" },
            if source.is_kenyan { "yes" } else { "no" },
            checked,
        );
    }
    Ok(())
}

/// Trigger an on-demand scrape of a single source and report the outcome.
///
/// # Errors
///
/// Returns an error if the request fails or the backend reports a failed
/// scrape run.
pub(crate) async fn run_scrape(client: &DashboardClient, source_id: i64) -> anyhow::Result<()> {
    let outcome = client
        .trigger_scrape(source_id)
        .await
        .map_err(|e| anyhow::anyhow!("failed to trigger scrape for source {source_id}: {e}"))?;

    if !outcome.success {
        let reason = outcome.error.as_deref().unwrap_or("unknown error");
        anyhow::bail!("scrape of source {source_id} failed: {reason}");
    }

    let label = outcome.source.as_deref().unwrap_or("source");
    println!(
        "scraped {label}: {} posts fetched, {} processed, {} stories created",
        outcome.posts_fetched, outcome.posts_processed, outcome.stories_created
    );
    Ok(())
}
