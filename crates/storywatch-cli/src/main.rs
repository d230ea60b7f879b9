use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storywatch_client::DashboardClient;
use storywatch_core::{FilterSpec, Velocity};

mod health;
mod render;
mod sources;
mod stories;
mod watch;


#[derive(Debug, Parser)]
#[command(name = "storywatch")]
#[command(about = "StoryWatch trending stories command line interface")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check backend health and auto-scrape status
    Health,
    /// List trending stories
    Stories {
        #[command(flatten)]
        filters: FilterArgs,
        /// Maximum number of stories to fetch
        #[arg(long, default_value_t = 50)]
        limit: u32,
        /// How far back the feed window reaches, in hours (general feed only)
        #[arg(long, default_value_t = 24, conflicts_with = "hot")]
        hours_back: u32,
        /// Server-side minimum trend score (general feed only)
        #[arg(long, conflicts_with = "hot")]
        min_score: Option<f64>,
        /// Emit raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show full details for one story
    Story {
        /// Story id
        id: String,
        /// Emit raw JSON instead of labelled fields
        #[arg(long)]
        json: bool,
    },
    /// List monitored sources
    Sources {
        /// Only sources flagged as Kenyan
        #[arg(long)]
        kenyan_only: bool,
        /// Emit raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Trigger an on-demand scrape of a single source
    Scrape {
        /// Numeric source id (see `sources`)
        source_id: i64,
    },
    /// Live dashboard in the terminal, refreshed on the poll cadence
    Watch {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Story filter flags shared by `stories` and `watch`.
#[derive(Debug, Args)]
struct FilterArgs {
    /// Platform to keep (e.g. "Twitter/X"); omit or pass "all" for every platform
    #[arg(long)]
    platform: Option<String>,
    /// Velocity tier to keep (high, medium, or low)
    #[arg(long)]
    velocity: Option<Velocity>,
    /// Minimum credibility score, 0-100 inclusive
    #[arg(long, default_value_t = 0)]
    min_credibility: u8,
    /// Use the hot stories feed instead of the general feed
    #[arg(long)]
    hot: bool,
    /// Keep only stories from Kenyan sources
    #[arg(long)]
    kenyan_only: bool,
}

impl FilterArgs {
    /// Translate CLI flags into a filter spec. The `"all"` platform
    /// sentinel means no platform filter, matching the dashboard dropdown.
    fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            platform: self
                .platform
                .clone()
                .filter(|p| !p.eq_ignore_ascii_case("all")),
            velocity: self.velocity,
            credibility: self.min_credibility,
            show_hot: self.hot,
            kenyan_only: self.kenyan_only,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = storywatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = DashboardClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))?;

    match cli.command {
        Commands::Health => health::run_health(&client).await,
        Commands::Stories {
            filters,
            limit,
            hours_back,
            min_score,
            json,
        } => {
            stories::run_stories(&client, &filters.to_spec(), limit, hours_back, min_score, json)
                .await
        }
        Commands::Story { id, json } => stories::run_story(&client, &id, json).await,
        Commands::Sources { kenyan_only, json } => {
            sources::run_sources(&client, kenyan_only, json).await
        }
        Commands::Scrape { source_id } => sources::run_scrape(&client, source_id).await,
        Commands::Watch { filters } => watch::run_watch(client, &config, filters.to_spec()).await,
    }
}
