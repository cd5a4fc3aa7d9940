//! Named timeline views a pod serves.

use serde::{Deserialize, Serialize};

/// The timelines a Yarn pod exposes under `/api/v1/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineName {
    /// Pod-wide public feed.
    #[default]
    Discover,
    /// Feeds the logged-in user follows.
    Timeline,
    /// Posts mentioning the logged-in user.
    Mentions,
}

impl TimelineName {
    /// All selectable timelines.
    pub const fn all() -> &'static [Self] {
        &[Self::Discover, Self::Timeline, Self::Mentions]
    }

    /// API endpoint name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Discover => "discover",
            Self::Timeline => "timeline",
            Self::Mentions => "mentions",
        }
    }

    /// Parse from a CLI/config string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "discover" => Some(Self::Discover),
            "timeline" | "home" => Some(Self::Timeline),
            "mentions" => Some(Self::Mentions),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimelineName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
