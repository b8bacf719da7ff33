use std::collections::HashSet;

use tracing::debug;

use crate::models::{DomainEvent, Location, MatchSnapshot, MatchStateId, PollingState};

use super::score::{derive_score, derive_team_names, scoring_side, Score, TeamNames};

/// Diff a new snapshot against the retained state and return the events it
/// implies, in order: state transitions, new feed events, score fallback.
///
/// The first snapshot for a fixture only primes the state and returns
/// nothing. `state` is updated in place.
pub fn detect(state: &mut PollingState, snapshot: &MatchSnapshot) -> Vec<DomainEvent> {
    let score = derive_score(snapshot);

    let Some(previous_state_id) = state
        .previous_state_id
        .filter(|_| state.is_primed_for(snapshot.fixture_id))
    else {
        prime(state, snapshot, score);
        return Vec::new();
    };

    let names = derive_team_names(snapshot);
    let mut events = state_transitions(previous_state_id, snapshot.state_id);

    let feed = EventFeedStrategy::detect(snapshot, &names, &mut state.seen_event_ids);
    events.extend(feed.events);
    state.reported_goals += feed.new_goals;

    let previous_score = state.previous_score.unwrap_or_default();
    if let Some(goal) =
        ScoreDeltaStrategy::detect(previous_score, score, state.reported_goals, &names)
    {
        events.push(goal);
        state.reported_goals = score.total();
    }

    state.previous_score = Some(score);
    state.previous_state_id = Some(snapshot.state_id);

    if !events.is_empty() {
        debug!(
            "Fixture {} produced {} events: {:?}",
            snapshot.fixture_id,
            events.len(),
            events.iter().map(|e| e.as_str()).collect::<Vec<_>>()
        );
    }

    events
}

/// Seed the state from a snapshot without emitting anything
fn prime(state: &mut PollingState, snapshot: &MatchSnapshot, score: Score) {
    debug!(
        "Priming fixture {} at {:?} ({}-{}, {} events)",
        snapshot.fixture_id,
        snapshot.state_id,
        score.home,
        score.away,
        snapshot.events.len()
    );

    state.fixture_id = Some(snapshot.fixture_id);
    state.previous_state_id = Some(snapshot.state_id);
    state.previous_score = Some(score);
    state.seen_event_ids = snapshot.events.iter().map(|e| e.id).collect();

    let goal_events = snapshot.events.iter().filter(|e| e.type_id.is_goal()).count() as u32;
    state.reported_goals = score.total().max(goal_events);
}

/// Lifecycle events implied by a state change. Each rule is checked on its own.
pub fn state_transitions(previous: MatchStateId, current: MatchStateId) -> Vec<DomainEvent> {
    let mut events = Vec::new();

    if previous == MatchStateId::NotStarted && current == MatchStateId::FirstHalf {
        events.push(DomainEvent::MatchStart);
    }
    if previous == MatchStateId::FirstHalf && current == MatchStateId::HalfTime {
        events.push(DomainEvent::HalfTime);
    }
    if previous == MatchStateId::HalfTime && current == MatchStateId::SecondHalf {
        events.push(DomainEvent::SecondHalfStart);
    }
    if !previous.is_finished() && current.is_finished() {
        events.push(DomainEvent::MatchEnd);
    }

    events
}

/// Result of diffing the event feed
#[derive(Debug, Default)]
pub struct FeedDetection {
    pub events: Vec<DomainEvent>,
    /// Goal-type events among the ids not seen before this tick
    pub new_goals: u32,
}

/// Detects goals and red cards by event id.
pub struct EventFeedStrategy;

impl EventFeedStrategy {
    /// Every unseen id is marked seen, whatever its type.
    pub fn detect(
        snapshot: &MatchSnapshot,
        names: &TeamNames,
        seen_event_ids: &mut HashSet<i64>,
    ) -> FeedDetection {
        let mut detection = FeedDetection::default();

        for event in &snapshot.events {
            if !seen_event_ids.insert(event.id) {
                continue;
            }

            if event.type_id.is_goal() {
                detection.new_goals += 1;
                let Some(side) =
                    scoring_side(snapshot, event.participant_id, event.type_id.is_own_goal())
                else {
                    debug!(
                        "Goal event {} references unknown participant {}",
                        event.id, event.participant_id
                    );
                    continue;
                };
                detection.events.push(DomainEvent::Goal {
                    side,
                    team: names.for_side(side).to_string(),
                    player: event.player_name.clone(),
                    minute: event.minute,
                });
            } else if event.type_id.is_sending_off() {
                let Some(side) = scoring_side(snapshot, event.participant_id, false) else {
                    continue;
                };
                detection.events.push(DomainEvent::RedCard {
                    side,
                    team: names.for_side(side).to_string(),
                    player: event.player_name.clone(),
                    minute: event.minute,
                });
            }
        }

        detection
    }
}

/// Infers a goal from the scoreboard when the event feed lags behind it.
///
/// Fires only when the score exceeds the goals already reported, so a
/// scoreboard catching up with the feed, or a payload switching between
/// scoreboard and event tally, stays silent.
///
/// Known gap: a jump of two or more unreported goals still yields a single
/// goal, credited to home if home's count went up, else away.
pub struct ScoreDeltaStrategy;

impl ScoreDeltaStrategy {
    pub fn detect(
        previous: Score,
        current: Score,
        reported_goals: u32,
        names: &TeamNames,
    ) -> Option<DomainEvent> {
        if current.total() <= reported_goals {
            return None;
        }

        let side = if current.home > previous.home {
            Location::Home
        } else {
            Location::Away
        };

        debug!(
            "Score moved {}-{} -> {}-{} with no goal in the feed, inferring {:?} goal",
            previous.home, previous.away, current.home, current.away, side
        );

        Some(DomainEvent::Goal {
            side,
            team: names.for_side(side).to_string(),
            player: None,
            minute: None,
        })
    }
}
