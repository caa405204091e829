//! Polling refresh engine.
//!
//! Per-domain periodic re-fetch with independent intervals and a
//! stale-while-revalidate status machine.

mod schedule;

pub use schedule::PollSchedule;

/// The three data domains refreshed on independent schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Stocks,
    Sports,
    News,
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stocks => write!(f, "Stocks"),
            Self::Sports => write!(f, "Sports"),
            Self::News => write!(f, "News"),
        }
    }
}

/// Refresh status of one domain. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshStatus {
    /// Nothing in flight; cached data (if any) is current enough.
    #[default]
    Idle,
    /// First fetch with no cached data to show.
    Loading,
    /// Background re-fetch while cached data stays visible.
    Refreshing,
    /// Fetch failed and there is no cached data to fall back to.
    Error,
}

impl std::fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Refreshing => write!(f, "refreshing"),
            Self::Error => write!(f, "error"),
        }
    }
}
