use thiserror::Error;

/// Failure to obtain live match data. Recovered by the poller on the next tick.
#[derive(Debug, Error)]
pub enum LiveDataError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Live API error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to hand a notification to the platform. Logged, never propagated.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Notification platform error: {0}")]
    Platform(String),
}
