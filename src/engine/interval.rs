use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::{MatchSnapshot, MatchStateId};

/// Kickoff window in which the pre-match cadence applies
pub const PRE_MATCH_WINDOW_MINUTES: i64 = 5;

/// Polling cadences per lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingIntervals {
    /// First and second half
    pub live: Duration,
    pub half_time: Duration,
    /// Kickoff within the pre-match window
    pub pre_match: Duration,
    /// No match tracked, or kickoff still far away
    pub background: Duration,
}

impl Default for PollingIntervals {
    fn default() -> Self {
        Self {
            live: Duration::from_secs(30),
            half_time: Duration::from_secs(60),
            pre_match: Duration::from_secs(60),
            background: Duration::from_secs(300),
        }
    }
}

impl PollingIntervals {
    /// Next polling delay for the tracked match.
    ///
    /// Returns `Duration::ZERO` once the match is finished, meaning polling
    /// stops.
    pub fn next_interval(&self, snapshot: Option<&MatchSnapshot>, now: DateTime<Utc>) -> Duration {
        let Some(snapshot) = snapshot else {
            return self.background;
        };

        match snapshot.state_id {
            MatchStateId::Finished => Duration::ZERO,
            MatchStateId::NotStarted => {
                let until_kickoff = snapshot.start_time - now;
                if until_kickoff <= chrono::Duration::zero() {
                    // Kickoff passed but the feed hasn't flipped state yet
                    self.live
                } else if until_kickoff <= chrono::Duration::minutes(PRE_MATCH_WINDOW_MINUTES) {
                    self.pre_match
                } else {
                    self.background
                }
            }
            MatchStateId::HalfTime => self.half_time,
            MatchStateId::FirstHalf | MatchStateId::SecondHalf | MatchStateId::Other(_) => {
                self.live
            }
        }
    }
}
