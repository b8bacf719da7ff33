use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::api::MatchSource;
use crate::engine::{detect, PollingIntervals};
use crate::error::LiveDataError;
use crate::matching::TeamFilter;
use crate::models::{LiveMatchStatus, MatchSnapshot, PollingState};
use crate::notify::NotificationDispatcher;

/// Message shown while the live API is failing
const FETCH_ERROR_MESSAGE: &str = "Failed to load live match data";

/// Polls live data for one tracked team, detects events and dispatches them
#[derive(Clone)]
pub struct LivePoller {
    source: Arc<dyn MatchSource>,
    filter: TeamFilter,
    dispatcher: NotificationDispatcher,
    intervals: PollingIntervals,
    /// Pause before looking for the next match once one has finished
    resume_after: Option<Duration>,
}

/// Owns a running poller task.
///
/// Stopping (or dropping) the handle cancels the task; its `PollingState`
/// goes with it.
pub struct PollerHandle {
    poller: LivePoller,
    task: Option<JoinHandle<()>>,
    cancel: watch::Sender<bool>,
    status: Arc<watch::Sender<LiveMatchStatus>>,
}

impl LivePoller {
    /// Create a new poller
    pub fn new(
        source: Arc<dyn MatchSource>,
        team_id: i64,
        dispatcher: NotificationDispatcher,
        intervals: PollingIntervals,
    ) -> Self {
        Self {
            source,
            filter: TeamFilter::new(team_id),
            dispatcher,
            intervals,
            resume_after: None,
        }
    }

    /// Keep the task alive after a finished match: wait `delay`, then start
    /// over with fresh state. Without this the task ends at full time.
    pub fn with_resume_after(mut self, delay: Duration) -> Self {
        self.resume_after = Some(delay);
        self
    }

    /// Start polling on the current runtime
    pub fn spawn(self) -> PollerHandle {
        let (status, _) = watch::channel(LiveMatchStatus::default());
        let (cancel, _) = watch::channel(false);

        let mut handle = PollerHandle {
            poller: self,
            task: None,
            cancel,
            status: Arc::new(status),
        };
        handle.start();
        handle
    }

    /// Run the poller loop until cancelled, or until the match is finished
    /// when no resume delay is set
    async fn run(
        self,
        mut cancel: watch::Receiver<bool>,
        status: Arc<watch::Sender<LiveMatchStatus>>,
    ) {
        info!("Live poller started for team {}", self.filter.team_id());

        let mut state = PollingState::new();
        let mut last_match: Option<MatchSnapshot> = None;
        let mut ticker: Option<Interval> = None;

        loop {
            let result = tokio::select! {
                biased;
                _ = cancel.changed() => break,
                result = self.source.fetch_live_matches() => result,
            };

            // A stop that raced the fetch wins: drop the result untouched
            if *cancel.borrow() {
                break;
            }

            let next = self
                .cycle(result, &mut state, &mut last_match, &status)
                .await;

            if next.is_zero() {
                let Some(delay) = self.resume_after else {
                    info!(
                        "Match finished, live poller for team {} stopping",
                        self.filter.team_id()
                    );
                    break;
                };

                info!(
                    "Match finished, team {} resumes polling in {:?}",
                    self.filter.team_id(),
                    delay
                );
                tokio::select! {
                    biased;
                    _ = cancel.changed() => break,
                    _ = time::sleep(delay) => {}
                }

                // Next match is primed from scratch
                state = PollingState::new();
                last_match = None;
                ticker = None;
                continue;
            }

            if next != state.current_interval {
                info!(
                    "Polling interval for team {}: {:?} -> {:?}",
                    self.filter.team_id(),
                    state.current_interval,
                    next
                );
                state.current_interval = next;
                ticker = Some(rearm(next));
            }

            let Some(ticker) = ticker.as_mut() else {
                break;
            };

            tokio::select! {
                biased;
                _ = cancel.changed() => break,
                _ = ticker.tick() => {}
            }
        }

        debug!("Live poller for team {} exited", self.filter.team_id());
    }

    /// One fetch -> detect -> dispatch pass. Returns the next polling delay.
    async fn cycle(
        &self,
        result: Result<Vec<MatchSnapshot>, LiveDataError>,
        state: &mut PollingState,
        last_match: &mut Option<MatchSnapshot>,
        status: &watch::Sender<LiveMatchStatus>,
    ) -> Duration {
        let now = Utc::now();

        let live_matches = match result {
            Ok(matches) => matches,
            Err(e) => {
                warn!(
                    "Failed to fetch live matches for team {}: {}",
                    self.filter.team_id(),
                    e
                );
                let next = self.intervals.next_interval(last_match.as_ref(), now);
                status.send_modify(|s| {
                    s.error = Some(FETCH_ERROR_MESSAGE.to_string());
                    s.is_polling = !next.is_zero();
                    s.polling_interval = next;
                });
                return next;
            }
        };

        let snapshot = self.filter.select(live_matches);

        if let Some(snapshot) = &snapshot {
            for event in detect(state, snapshot) {
                self.dispatcher.dispatch(&event, snapshot).await;
            }
        } else if last_match.is_some() {
            info!(
                "Match for team {} no longer in the live feed",
                self.filter.team_id()
            );
        }

        let next = self.intervals.next_interval(snapshot.as_ref(), now);
        *last_match = snapshot.clone();

        status.send_replace(LiveMatchStatus {
            live_match: snapshot,
            is_polling: !next.is_zero(),
            polling_interval: next,
            last_update: Some(now),
            error: None,
        });

        next
    }
}

/// Repeating timer whose first tick is one period from now
fn rearm(period: Duration) -> Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

impl PollerHandle {
    /// Latest published status
    pub fn status(&self) -> watch::Receiver<LiveMatchStatus> {
        self.status.subscribe()
    }

    pub fn team_id(&self) -> i64 {
        self.poller.filter.team_id()
    }

    /// Whether the poller task is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Spawn a task with fresh state; no-op while one is running
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let (cancel, cancel_rx) = watch::channel(false);
        self.cancel = cancel;

        let poller = self.poller.clone();
        let status = Arc::clone(&self.status);
        self.task = Some(tokio::spawn(poller.run(cancel_rx, status)));
    }

    /// Cancel the task and wait for it to exit.
    ///
    /// An in-flight fetch is abandoned; nothing it returns reaches the state
    /// or the published status.
    pub async fn stop(&mut self) {
        let _ = self.cancel.send(true);

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Live poller task ended abnormally: {}", e);
            }
            info!("Live poller for team {} stopped", self.team_id());
        }

        self.status.send_replace(LiveMatchStatus::default());
    }

    /// Track a different team, starting over with fresh state
    pub async fn switch_team(&mut self, team_id: i64) {
        self.stop().await;
        self.poller.filter = TeamFilter::new(team_id);
        self.start();
    }
}
