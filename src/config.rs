use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::engine::PollingIntervals;
use crate::notify::Locale;

/// Which squad a tracked team id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamKind {
    Men,
    Women,
}

/// A team whose live matches are polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedTeam {
    pub kind: TeamKind,
    pub team_id: i64,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Live score API base URL
    pub live_api_url: String,

    /// Optional API token sent as Authorization header
    pub live_api_token: Option<String>,

    /// Teams to poll, each with its own poller
    pub teams: Vec<TrackedTeam>,

    /// Polling cadences
    pub intervals: PollingIntervals,

    /// SQLite database path
    pub database_url: String,

    /// Notification language
    pub locale: Locale,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut teams = vec![TrackedTeam {
            kind: TeamKind::Men,
            team_id: env::var("MEN_TEAM_ID")
                .context("MEN_TEAM_ID must be set")?
                .parse()
                .context("MEN_TEAM_ID must be a valid number")?,
        }];

        if let Ok(women) = env::var("WOMEN_TEAM_ID") {
            teams.push(TrackedTeam {
                kind: TeamKind::Women,
                team_id: women
                    .parse()
                    .context("WOMEN_TEAM_ID must be a valid number")?,
            });
        }

        let defaults = PollingIntervals::default();

        Ok(Config {
            live_api_url: env::var("LIVE_API_URL")
                .unwrap_or_else(|_| "https://api.matchday.local/v1".to_string()),

            live_api_token: env::var("LIVE_API_TOKEN").ok().filter(|t| !t.is_empty()),

            teams,

            intervals: PollingIntervals {
                live: secs_var("POLL_LIVE_SECS", defaults.live)?,
                half_time: secs_var("POLL_HALFTIME_SECS", defaults.half_time)?,
                pre_match: secs_var("POLL_PREMATCH_SECS", defaults.pre_match)?,
                background: secs_var("POLL_BACKGROUND_SECS", defaults.background)?,
            },

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/matchday.db".to_string()),

            locale: match env::var("NOTIFY_LOCALE") {
                Ok(raw) => raw.parse().map_err(anyhow::Error::msg)?,
                Err(_) => Locale::default(),
            },
        })
    }
}

/// Read a whole number of seconds, rejecting zero
fn secs_var(name: &str, default: Duration) -> Result<Duration> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    let secs: u64 = raw
        .parse()
        .with_context(|| format!("{name} must be a valid number"))?;
    anyhow::ensure!(secs > 0, "{name} must be greater than zero");

    Ok(Duration::from_secs(secs))
}
