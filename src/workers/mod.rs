pub mod live_poller;

pub use live_poller::{LivePoller, PollerHandle};
