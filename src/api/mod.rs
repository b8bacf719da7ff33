pub mod live_data;

pub use live_data::{LiveDataClient, MatchSource};
