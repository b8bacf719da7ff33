pub mod dispatcher;
pub mod log_sink;
pub mod messages;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NotificationError;

pub use dispatcher::NotificationDispatcher;
pub use log_sink::{LogHaptics, LogNotificationSink};
pub use messages::Locale;

/// User notification switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Master switch
    pub enabled: bool,
    /// Live match alerts
    pub live_matches: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            live_matches: true,
        }
    }
}

impl NotificationPreferences {
    pub fn allows_live_matches(&self) -> bool {
        self.enabled && self.live_matches
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Default,
    High,
}

/// Immediate local/push notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub sound: bool,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticKind {
    /// Kickoff
    Success,
    /// Red card
    Warning,
}

/// Where notification preferences are read from
#[async_trait]
pub trait PreferencesSource: Send + Sync {
    async fn get_preferences(&self) -> Result<NotificationPreferences>;
}

/// Platform notification API. Fire-and-forget.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn schedule(&self, notification: Notification) -> Result<(), NotificationError>;
}

pub trait HapticSink: Send + Sync {
    fn impact(&self, kind: HapticKind);
}

/// Visual goal celebration, fired for every detected goal
pub trait CelebrationHook: Send + Sync {
    fn on_goal_celebration(&self, team_name: &str, player_name: Option<&str>, minute: Option<u32>);
}
