//! Shared data model and configuration for the storywatch workspace.
//!
//! Everything here is pure: wire types for the dashboard backend, the
//! client-side filter that derives the visible story set, and environment
//! configuration. Network and scheduling live in the sibling crates.

pub mod config;
pub mod filter;
pub mod source;
pub mod story;

pub use config::{load_app_config, load_app_config_from_env, AppConfig};
pub use filter::FilterSpec;
pub use source::{ScrapeOutcome, SourceInfo};
pub use story::{Story, Velocity};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
