use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matchday_live::api::{LiveDataClient, MatchSource};
use matchday_live::config::{Config, TeamKind};
use matchday_live::db::SqlitePreferencesStore;
use matchday_live::engine::{derive_score, derive_team_names};
use matchday_live::models::LiveMatchStatus;
use matchday_live::notify::{LogHaptics, LogNotificationSink, NotificationDispatcher};
use matchday_live::workers::LivePoller;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matchday_live=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matchday-live");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded ({} tracked teams)", config.teams.len());

    // Initialize preferences
    let preferences = Arc::new(SqlitePreferencesStore::new(&config.database_url).await?);
    info!("Preferences loaded for session {}", preferences.session_id());

    let source: Arc<dyn MatchSource> = Arc::new(LiveDataClient::new(
        &config.live_api_url,
        config.live_api_token.clone(),
    ));

    let dispatcher = NotificationDispatcher::new(
        preferences,
        Arc::new(LogNotificationSink),
        config.locale,
    )
    .with_haptics(Arc::new(LogHaptics));

    // One poller per team, each with its own state and timer
    let mut handles = Vec::new();
    for team in &config.teams {
        let handle = LivePoller::new(
            Arc::clone(&source),
            team.team_id,
            dispatcher.clone(),
            config.intervals,
        )
        .with_resume_after(config.intervals.background)
        .spawn();

        tokio::spawn(log_status(team.kind, handle.status()));
        handles.push(handle);
    }

    info!("All pollers started");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");

    for handle in &mut handles {
        handle.stop().await;
    }

    info!("Shutting down matchday-live");
    Ok(())
}

/// Log every status change of one poller
async fn log_status(kind: TeamKind, mut status: watch::Receiver<LiveMatchStatus>) {
    while status.changed().await.is_ok() {
        let current = status.borrow_and_update().clone();

        if let Some(error) = &current.error {
            warn!("[{:?}] {}", kind, error);
            continue;
        }

        match &current.live_match {
            Some(snapshot) => {
                let names = derive_team_names(snapshot);
                let score = derive_score(snapshot);
                info!(
                    "[{:?}] {} {} - {} {} | {:?} | next poll in {:?}",
                    kind,
                    names.home,
                    score.home,
                    score.away,
                    names.away,
                    snapshot.state_id,
                    current.polling_interval,
                );
            }
            None if current.is_polling => {
                info!(
                    "[{:?}] No live match, checking again in {:?}",
                    kind, current.polling_interval
                );
            }
            None => info!("[{:?}] Polling stopped", kind),
        }
    }
}
