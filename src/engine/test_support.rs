//! Snapshot builders shared by engine, notify and worker tests.

use chrono::{TimeZone, Utc};

use crate::models::{
    EventType, Location, MatchEvent, MatchSnapshot, MatchStateId, Participant, ScoreEntry,
};

pub const FIXTURE_ID: i64 = 19_000_001;
pub const HOME_ID: i64 = 10;
pub const AWAY_ID: i64 = 20;

/// Lions (home, id 10) vs Rovers (away, id 20)
pub fn snapshot(state_id: MatchStateId, events: Vec<MatchEvent>) -> MatchSnapshot {
    MatchSnapshot {
        fixture_id: FIXTURE_ID,
        state_id,
        start_time: Utc.with_ymd_and_hms(2026, 10, 18, 18, 0, 0).unwrap(),
        participants: vec![
            Participant {
                team_id: HOME_ID,
                name: "Lions".to_string(),
                logo_url: None,
                location: Location::Home,
            },
            Participant {
                team_id: AWAY_ID,
                name: "Rovers".to_string(),
                logo_url: None,
                location: Location::Away,
            },
        ],
        events,
        scores: Vec::new(),
    }
}

/// Event with minute equal to its id and a "Player {id}" scorer
pub fn event(id: i64, participant_id: i64, type_id: EventType) -> MatchEvent {
    MatchEvent {
        id,
        participant_id,
        type_id,
        minute: Some(id as u32),
        player_name: Some(format!("Player {id}")),
    }
}

/// CURRENT scoreboard for both sides
pub fn scoreboard(home: u32, away: u32) -> Vec<ScoreEntry> {
    vec![
        ScoreEntry {
            participant_id: HOME_ID,
            goals: home,
            description: ScoreEntry::CURRENT.to_string(),
        },
        ScoreEntry {
            participant_id: AWAY_ID,
            goals: away,
            description: ScoreEntry::CURRENT.to_string(),
        },
    ]
}
