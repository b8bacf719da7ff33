use serde::{Deserialize, Serialize};

use crate::models::{Location, MatchSnapshot};

/// Aggregate score of a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn total(&self) -> u32 {
        self.home + self.away
    }
}

/// Display names of both sides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamNames {
    pub home: String,
    pub away: String,
}

impl TeamNames {
    pub fn for_side(&self, side: Location) -> &str {
        match side {
            Location::Home => &self.home,
            Location::Away => &self.away,
        }
    }
}

/// Current score of a snapshot.
///
/// Uses the CURRENT scoreboard entries when the backend publishes them,
/// otherwise tallies goal-family events. Own goals count for the opponent.
pub fn derive_score(snapshot: &MatchSnapshot) -> Score {
    scoreboard_score(snapshot).unwrap_or_else(|| event_score(snapshot))
}

fn scoreboard_score(snapshot: &MatchSnapshot) -> Option<Score> {
    let mut current = snapshot.scores.iter().filter(|s| s.is_current()).peekable();
    current.peek()?;

    let mut score = Score::default();
    for entry in current {
        match side_of(snapshot, entry.participant_id) {
            Some(Location::Home) => score.home = entry.goals,
            Some(Location::Away) => score.away = entry.goals,
            None => {}
        }
    }
    Some(score)
}

fn event_score(snapshot: &MatchSnapshot) -> Score {
    let mut score = Score::default();

    for event in snapshot.events.iter().filter(|e| e.type_id.is_goal()) {
        let Some(side) = scoring_side(snapshot, event.participant_id, event.type_id.is_own_goal())
        else {
            continue;
        };
        match side {
            Location::Home => score.home += 1,
            Location::Away => score.away += 1,
        }
    }

    score
}

/// Team names by location, "Home"/"Away" when a side is missing
pub fn derive_team_names(snapshot: &MatchSnapshot) -> TeamNames {
    let name = |location: Location, fallback: &str| {
        snapshot
            .participant(location)
            .map(|p| p.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };

    TeamNames {
        home: name(Location::Home, "Home"),
        away: name(Location::Away, "Away"),
    }
}

/// Location of the participant with the given id
pub fn side_of(snapshot: &MatchSnapshot, participant_id: i64) -> Option<Location> {
    snapshot
        .participants
        .iter()
        .find(|p| p.team_id == participant_id)
        .map(|p| p.location)
}

/// Side credited for an event recorded against `participant_id`
pub fn scoring_side(
    snapshot: &MatchSnapshot,
    participant_id: i64,
    own_goal: bool,
) -> Option<Location> {
    let side = side_of(snapshot, participant_id)?;
    Some(if own_goal { side.opponent() } else { side })
}
