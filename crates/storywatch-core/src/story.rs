//! Story wire types.
//!
//! These model the JSON records served by the dashboard backend. A fetch
//! returns a complete snapshot; each refresh replaces the previous set
//! wholesale, so nothing here is ever patched incrementally.

use serde::{Deserialize, Serialize};

/// How quickly a story's engagement is growing.
///
/// Categorized server-side from raw engagement velocity; never derived by
/// the client. Values outside the known set deserialize to
/// [`Velocity::Unknown`] instead of failing the whole snapshot, and
/// `Unknown` never matches a velocity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Velocity {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Velocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Velocity::High => write!(f, "high"),
            Velocity::Medium => write!(f, "medium"),
            Velocity::Low => write!(f, "low"),
            Velocity::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for Velocity {
    type Err = String;

    /// Parse a user-supplied velocity filter value.
    ///
    /// Only the known categories are accepted here; `Unknown` exists for
    /// lenient deserialization of upstream data, not as a filter value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Velocity::High),
            "medium" => Ok(Velocity::Medium),
            "low" => Ok(Velocity::Low),
            _ => Err(format!("unknown velocity '{s}' (expected high, medium, or low)")),
        }
    }
}

/// A trending story as returned by the backend.
///
/// `id` is stable across refreshes for the same underlying item. `platform`
/// is an open set (X, Facebook, TikTok, Instagram, News, Reddit, RSS,
/// GoogleTrends, YouTube have been observed); values outside it must load
/// fine and simply never match a platform filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub headline: String,
    pub source: String,
    pub platform: String,
    pub engagement: u64,
    pub velocity: Velocity,
    pub reason: String,
    /// Preformatted display timestamp, not RFC 3339. Treated as opaque.
    pub timestamp: String,
    /// Credibility score, 0 to 100 inclusive.
    pub credibility: u8,
    pub url: String,
}
