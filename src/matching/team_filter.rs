use tracing::debug;

use crate::models::MatchSnapshot;

/// Picks the tracked team's match out of the in-play list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamFilter {
    team_id: i64,
}

impl TeamFilter {
    pub fn new(team_id: i64) -> Self {
        Self { team_id }
    }

    pub fn team_id(&self) -> i64 {
        self.team_id
    }

    /// First snapshot whose participants include the tracked team
    pub fn select(&self, live_matches: Vec<MatchSnapshot>) -> Option<MatchSnapshot> {
        let found = live_matches
            .into_iter()
            .find(|m| m.involves_team(self.team_id));

        match &found {
            Some(m) => debug!("Team {} is playing fixture {}", self.team_id, m.fixture_id),
            None => debug!("No in-play match for team {}", self.team_id),
        }

        found
    }
}
