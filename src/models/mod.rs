pub mod domain_event;
pub mod live_status;
pub mod match_snapshot;
pub mod polling_state;

pub use domain_event::DomainEvent;
pub use live_status::LiveMatchStatus;
pub use match_snapshot::{
    EventType, Location, MatchEvent, MatchSnapshot, MatchStateId, Participant, ScoreEntry,
};
pub use polling_state::PollingState;
