use serde::{Deserialize, Serialize};

use super::Location;

/// A discrete, user-meaningful occurrence derived from diffing snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainEvent {
    /// NotStarted -> FirstHalf
    MatchStart,
    /// FirstHalf -> HalfTime
    HalfTime,
    /// HalfTime -> SecondHalf
    SecondHalfStart,
    /// Any live state -> Finished
    MatchEnd,
    Goal {
        /// Side credited with the goal (own goals credit the opponent)
        side: Location,
        team: String,
        player: Option<String>,
        minute: Option<u32>,
    },
    RedCard {
        side: Location,
        team: String,
        player: Option<String>,
        minute: Option<u32>,
    },
}

impl DomainEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainEvent::MatchStart => "match_start",
            DomainEvent::HalfTime => "half_time",
            DomainEvent::SecondHalfStart => "second_half_start",
            DomainEvent::MatchEnd => "match_end",
            DomainEvent::Goal { .. } => "goal",
            DomainEvent::RedCard { .. } => "red_card",
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, DomainEvent::Goal { .. })
    }
}
