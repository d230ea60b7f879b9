//! Backend health command handler.

use storywatch_client::DashboardClient;

/// Check backend health and report the auto-scrape status.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or answers with a
/// non-success status.
pub(crate) async fn run_health(client: &DashboardClient) -> anyhow::Result<()> {
    let health = client
        .health()
        .await
        .map_err(|e| anyhow::anyhow!("backend health check failed: {e}"))?;

    println!("status:        {}", health.status);
    println!("timestamp:     {}", health.timestamp);
    println!(
        "auto-scraping: {}",
        if health.auto_scraping { "on" } else { "off" }
    );
    Ok(())
}
