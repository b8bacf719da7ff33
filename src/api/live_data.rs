use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::LiveDataError;
use crate::models::{
    EventType, Location, MatchEvent, MatchSnapshot, MatchStateId, Participant, ScoreEntry,
};

/// Source of in-play match snapshots
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Return every match currently in play
    async fn fetch_live_matches(&self) -> Result<Vec<MatchSnapshot>, LiveDataError>;
}

/// Client for the club backend's live score endpoint
pub struct LiveDataClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

/// Envelope returned by the backend
#[derive(Debug, Deserialize)]
struct LiveResponse {
    #[serde(default)]
    data: Vec<FixtureData>,
}

#[derive(Debug, Deserialize)]
struct FixtureData {
    id: i64,
    state_id: u32,
    starting_at_timestamp: Option<i64>,
    #[serde(default)]
    participants: Vec<ParticipantData>,
    #[serde(default)]
    events: Vec<EventData>,
    #[serde(default)]
    scores: Vec<ScoreData>,
}

#[derive(Debug, Deserialize)]
struct ParticipantData {
    id: i64,
    #[serde(default)]
    name: String,
    image_path: Option<String>,
    meta: Option<ParticipantMeta>,
}

#[derive(Debug, Deserialize)]
struct ParticipantMeta {
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventData {
    id: i64,
    participant_id: Option<i64>,
    type_id: Option<u32>,
    minute: Option<u32>,
    player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScoreData {
    participant_id: i64,
    score: Option<ScoreValue>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ScoreValue {
    goals: Option<u32>,
}

impl LiveDataClient {
    /// Create a new client
    pub fn new(base_url: &str, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    /// Decode a raw response body
    pub fn parse_live_matches(body: &str) -> Result<Vec<MatchSnapshot>, LiveDataError> {
        let response: LiveResponse = serde_json::from_str(body)?;

        Ok(response
            .data
            .into_iter()
            .map(convert_fixture)
            .collect())
    }
}

#[async_trait]
impl MatchSource for LiveDataClient {
    async fn fetch_live_matches(&self) -> Result<Vec<MatchSnapshot>, LiveDataError> {
        let url = format!("{}/livescores/inplay", self.base_url);

        debug!("Fetching live matches from {}", url);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LiveDataError::Status { status, body });
        }

        let body = response.text().await?;
        let matches = Self::parse_live_matches(&body)?;

        debug!("Live API returned {} in-play matches", matches.len());

        Ok(matches)
    }
}

/// Convert a backend fixture to our model
fn convert_fixture(data: FixtureData) -> MatchSnapshot {
    let start_time = data
        .starting_at_timestamp
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let participants = data
        .participants
        .into_iter()
        .filter_map(|p| {
            let location = match p.meta.and_then(|m| m.location).as_deref() {
                Some("home") => Location::Home,
                Some("away") => Location::Away,
                other => {
                    warn!(
                        "Fixture {} participant {} has unknown location {:?}",
                        data.id, p.id, other
                    );
                    return None;
                }
            };
            Some(Participant {
                team_id: p.id,
                name: p.name,
                logo_url: p.image_path,
                location,
            })
        })
        .collect();

    let events = data
        .events
        .into_iter()
        .map(|e| MatchEvent {
            id: e.id,
            participant_id: e.participant_id.unwrap_or_default(),
            type_id: e.type_id.map(EventType::from_code).unwrap_or(EventType::Other),
            minute: e.minute,
            player_name: e.player_name.filter(|n| !n.is_empty()),
        })
        .collect();

    let scores = data
        .scores
        .into_iter()
        .map(|s| ScoreEntry {
            participant_id: s.participant_id,
            goals: s.score.and_then(|v| v.goals).unwrap_or(0),
            description: s.description,
        })
        .collect();

    MatchSnapshot {
        fixture_id: data.id,
        state_id: MatchStateId::from_code(data.state_id),
        start_time,
        participants,
        events,
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{derive_score, Score};

    const BODY: &str = r#"{
        "data": [{
            "id": 19000001,
            "state_id": 22,
            "starting_at_timestamp": 1792346400,
            "participants": [
                {"id": 10, "name": "Lions", "image_path": "https://cdn/lions.png", "meta": {"location": "home"}},
                {"id": 20, "name": "Rovers", "meta": {"location": "away"}}
            ],
            "events": [
                {"id": 1, "participant_id": 10, "type_id": 14, "minute": 12, "player_name": "Silva"},
                {"id": 2, "participant_id": 20, "type_id": 19, "minute": 30, "player_name": ""},
                {"id": 3, "participant_id": 10, "type_id": 15, "minute": 51}
            ],
            "scores": [
                {"participant_id": 10, "score": {"goals": 1, "participant": "home"}, "description": "CURRENT"},
                {"participant_id": 20, "score": {"goals": 1, "participant": "away"}, "description": "CURRENT"}
            ]
        }]
    }"#;

    #[test]
    fn test_parse_live_matches() {
        let matches = LiveDataClient::parse_live_matches(BODY).unwrap();
        assert_eq!(matches.len(), 1);

        let snap = &matches[0];
        assert_eq!(snap.fixture_id, 19000001);
        assert_eq!(snap.state_id, MatchStateId::SecondHalf);
        assert_eq!(snap.start_time.timestamp(), 1792346400);
        assert_eq!(snap.participant(Location::Home).unwrap().name, "Lions");
        assert_eq!(
            snap.participant(Location::Home).unwrap().logo_url.as_deref(),
            Some("https://cdn/lions.png")
        );
        assert_eq!(snap.events[0].type_id, EventType::Goal);
        assert_eq!(snap.events[1].type_id, EventType::YellowCard);
        assert_eq!(snap.events[1].player_name, None);
        assert_eq!(snap.events[2].type_id, EventType::OwnGoal);
        assert_eq!(derive_score(snap), Score { home: 1, away: 1 });
    }

    #[test]
    fn test_parse_tolerates_missing_sections() {
        let matches =
            LiveDataClient::parse_live_matches(r#"{"data": [{"id": 5, "state_id": 1}]}"#).unwrap();

        assert_eq!(matches[0].state_id, MatchStateId::NotStarted);
        assert!(matches[0].participants.is_empty());
        assert!(matches[0].events.is_empty());

        assert!(LiveDataClient::parse_live_matches("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            LiveDataClient::parse_live_matches("<html>"),
            Err(LiveDataError::Json(_))
        ));
    }
}
