use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fetch's view of a single in-play match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Fixture ID (stable across polls)
    pub fixture_id: i64,

    /// Lifecycle state reported by the backend
    pub state_id: MatchStateId,

    /// Scheduled kickoff
    pub start_time: DateTime<Utc>,

    /// Home and away sides (either may be missing in a malformed feed)
    pub participants: Vec<Participant>,

    /// Match events, append-only by id
    pub events: Vec<MatchEvent>,

    /// Scoreboard entries as published by the backend
    pub scores: Vec<ScoreEntry>,
}

impl MatchSnapshot {
    /// Participant playing at the given location
    pub fn participant(&self, location: Location) -> Option<&Participant> {
        self.participants.iter().find(|p| p.location == location)
    }

    /// Whether the given team takes part in this match
    pub fn involves_team(&self, team_id: i64) -> bool {
        self.participants.iter().any(|p| p.team_id == team_id)
    }
}

/// Match lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStateId {
    NotStarted,
    FirstHalf,
    HalfTime,
    SecondHalf,
    Finished,
    /// Extra time, penalties, suspensions and other backend states
    Other(u32),
}

impl MatchStateId {
    /// Map a backend state code
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => MatchStateId::NotStarted,
            2 => MatchStateId::FirstHalf,
            3 => MatchStateId::HalfTime,
            22 => MatchStateId::SecondHalf,
            5 => MatchStateId::Finished,
            other => MatchStateId::Other(other),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchStateId::Finished)
    }
}

/// Side of the pitch a participant is listed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Home,
    Away,
}

impl Location {
    pub fn opponent(&self) -> Self {
        match self {
            Location::Home => Location::Away,
            Location::Away => Location::Home,
        }
    }
}

/// A team taking part in a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub team_id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub location: Location,
}

/// Event type as classified by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    PenaltyGoal,
    OwnGoal,
    RedCard,
    /// Second yellow
    YellowRedCard,
    YellowCard,
    Other,
}

impl EventType {
    /// Map a backend event type code
    pub fn from_code(code: u32) -> Self {
        match code {
            14 => EventType::Goal,
            15 => EventType::OwnGoal,
            16 => EventType::PenaltyGoal,
            19 => EventType::YellowCard,
            20 => EventType::RedCard,
            21 => EventType::YellowRedCard,
            _ => EventType::Other,
        }
    }

    /// Goal, penalty goal or own goal
    pub fn is_goal(&self) -> bool {
        matches!(
            self,
            EventType::Goal | EventType::PenaltyGoal | EventType::OwnGoal
        )
    }

    pub fn is_own_goal(&self) -> bool {
        matches!(self, EventType::OwnGoal)
    }

    /// Straight red or second yellow
    pub fn is_sending_off(&self) -> bool {
        matches!(self, EventType::RedCard | EventType::YellowRedCard)
    }
}

/// A single entry of the match event feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: i64,
    /// Team the event was recorded against
    pub participant_id: i64,
    pub type_id: EventType,
    pub minute: Option<u32>,
    pub player_name: Option<String>,
}

/// Scoreboard entry for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub participant_id: i64,
    pub goals: u32,
    /// e.g. "CURRENT", "1ST_HALF"
    pub description: String,
}

impl ScoreEntry {
    pub const CURRENT: &'static str = "CURRENT";

    pub fn is_current(&self) -> bool {
        self.description == Self::CURRENT
    }
}
