pub mod detector;
pub mod interval;
pub mod score;

pub use detector::{detect, EventFeedStrategy, ScoreDeltaStrategy};
pub use interval::PollingIntervals;
pub use score::{derive_score, derive_team_names, Score, TeamNames};

#[cfg(test)]
pub(crate) mod test_support;
