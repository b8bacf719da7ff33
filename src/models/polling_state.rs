use std::collections::HashSet;
use std::time::Duration;

use crate::engine::Score;

use super::MatchStateId;

/// Detector state for one tracked team, owned by its poller task.
///
/// Created empty when polling starts and dropped when it stops; nothing is
/// persisted across restarts.
#[derive(Debug, Clone, Default)]
pub struct PollingState {
    /// Fixture the state was primed against
    pub fixture_id: Option<i64>,

    /// Last observed lifecycle state, unset before the first fetch
    pub previous_state_id: Option<MatchStateId>,

    /// Last derived score, unset before the first fetch
    pub previous_score: Option<Score>,

    /// Event ids already processed
    pub seen_event_ids: HashSet<i64>,

    /// Goals already accounted for: goal-type ids seen plus inferred goals.
    /// The score fallback only fires when the score runs ahead of this.
    pub reported_goals: u32,

    /// Active polling cadence
    pub current_interval: Duration,
}

impl PollingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until a snapshot for the current fixture has been recorded
    pub fn is_primed_for(&self, fixture_id: i64) -> bool {
        self.fixture_id == Some(fixture_id) && self.previous_state_id.is_some()
    }
}
