use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tracing::info;
use uuid::Uuid;

use crate::notify::{NotificationPreferences, PreferencesSource};

/// SQLite store for the device session and its notification switches
pub struct SqlitePreferencesStore {
    pool: Pool<Sqlite>,
    session_id: String,
}

impl SqlitePreferencesStore {
    /// Open (or create) the database and load the session
    pub async fn new(database_url: &str) -> Result<Self> {
        // Create data directory if needed
        if let Some(path) = database_url.strip_prefix("sqlite:") {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() && !path.starts_with(':') {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create database directory")?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .context("Invalid database URL")?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        init_schema(&pool).await?;
        let session_id = load_or_create_session(&pool).await?;

        info!("Preferences store initialized (session {})", session_id);
        Ok(Self { pool, session_id })
    }

    /// Device session id, created on first use
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current switches for this session
    pub async fn get_preferences(&self) -> Result<NotificationPreferences> {
        let row: Option<(bool, bool)> = sqlx::query_as(
            r#"
            SELECT enabled, live_matches FROM notification_preferences
            WHERE session_id = ?
            "#,
        )
        .bind(&self.session_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to read notification preferences")?;

        Ok(row
            .map(|(enabled, live_matches)| NotificationPreferences {
                enabled,
                live_matches,
            })
            .unwrap_or_default())
    }

    /// Persist new switches for this session
    pub async fn set_preferences(&self, preferences: NotificationPreferences) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_preferences (session_id, enabled, live_matches, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(session_id) DO UPDATE SET
                enabled = excluded.enabled,
                live_matches = excluded.live_matches,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.session_id)
        .bind(preferences.enabled)
        .bind(preferences.live_matches)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to store notification preferences")?;

        Ok(())
    }
}

#[async_trait]
impl PreferencesSource for SqlitePreferencesStore {
    async fn get_preferences(&self) -> Result<NotificationPreferences> {
        SqlitePreferencesStore::get_preferences(self).await
    }
}

/// Initialize database schema
async fn init_schema(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS session (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            session_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create session table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notification_preferences (
            session_id TEXT PRIMARY KEY,
            enabled INTEGER NOT NULL,
            live_matches INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create notification_preferences table")?;

    Ok(())
}

async fn load_or_create_session(pool: &Pool<Sqlite>) -> Result<String> {
    let existing: Option<(String,)> = sqlx::query_as("SELECT session_id FROM session WHERE id = 1")
        .fetch_optional(pool)
        .await
        .context("Failed to read session")?;

    if let Some((session_id,)) = existing {
        return Ok(session_id);
    }

    let session_id = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO session (id, session_id, created_at) VALUES (1, ?, ?)")
        .bind(&session_id)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await
        .context("Failed to create session")?;

    info!("Created new session {}", session_id);
    Ok(session_id)
}
