use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::MatchSnapshot;

/// Reactive state published by a poller after every fetch/detect cycle
#[derive(Debug, Clone, Default, Serialize)]
pub struct LiveMatchStatus {
    /// Snapshot of the tracked team's match, if one is in play
    pub live_match: Option<MatchSnapshot>,

    /// Whether the timer is armed
    pub is_polling: bool,

    /// Current cadence (zero once polling has stopped for a finished match)
    pub polling_interval: Duration,

    /// Time of the last successful fetch
    pub last_update: Option<DateTime<Utc>>,

    /// Generic message for the last failed fetch, cleared on success
    pub error: Option<String>,
}
