//! HTTP client for the storywatch dashboard backend.
//!
//! Thin typed wrapper over the backend's `/api` endpoints: health probing,
//! the general and hot story queries, single-story lookup, source listing,
//! and manual scrape triggering. Responses deserialize into the wire types
//! from `storywatch-core`.

pub mod client;
pub mod error;

pub use client::{DashboardClient, HealthStatus, StoryQuery};
pub use error::ApiError;
