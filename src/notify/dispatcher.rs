use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::{DomainEvent, MatchSnapshot};

use super::{
    CelebrationHook, HapticKind, HapticSink, Locale, NotificationSink, PreferencesSource,
};

/// Turns detected events into user-facing notifications.
///
/// Delivery is best-effort: every failure is logged and swallowed.
#[derive(Clone)]
pub struct NotificationDispatcher {
    preferences: Arc<dyn PreferencesSource>,
    sink: Arc<dyn NotificationSink>,
    haptics: Option<Arc<dyn HapticSink>>,
    celebration: Option<Arc<dyn CelebrationHook>>,
    locale: Locale,
}

impl NotificationDispatcher {
    pub fn new(
        preferences: Arc<dyn PreferencesSource>,
        sink: Arc<dyn NotificationSink>,
        locale: Locale,
    ) -> Self {
        Self {
            preferences,
            sink,
            haptics: None,
            celebration: None,
            locale,
        }
    }

    pub fn with_haptics(mut self, haptics: Arc<dyn HapticSink>) -> Self {
        self.haptics = Some(haptics);
        self
    }

    pub fn with_celebration(mut self, celebration: Arc<dyn CelebrationHook>) -> Self {
        self.celebration = Some(celebration);
        self
    }

    /// Handle one detected event
    pub async fn dispatch(&self, event: &DomainEvent, snapshot: &MatchSnapshot) {
        if let (
            Some(hook),
            DomainEvent::Goal {
                team,
                player,
                minute,
                ..
            },
        ) = (&self.celebration, event)
        {
            hook.on_goal_celebration(team, player.as_deref(), *minute);
        }

        let preferences = match self.preferences.get_preferences().await {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to read notification preferences: {:#}", e);
                return;
            }
        };

        if !preferences.allows_live_matches() {
            debug!(
                "Live match notifications disabled, skipping {}",
                event.as_str()
            );
            return;
        }

        let notification = self.locale.render(event, snapshot);

        match self.sink.schedule(notification).await {
            Ok(()) => info!(
                "Dispatched {} notification for fixture {}",
                event.as_str(),
                snapshot.fixture_id
            ),
            Err(e) => {
                warn!("Failed to dispatch {} notification: {}", event.as_str(), e);
                return;
            }
        }

        if let Some(haptics) = &self.haptics {
            match event {
                DomainEvent::MatchStart => haptics.impact(HapticKind::Success),
                DomainEvent::RedCard { .. } => haptics.impact(HapticKind::Warning),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::Result;
    use async_trait::async_trait;

    use super::*;
    use crate::engine::test_support::snapshot;
    use crate::error::NotificationError;
    use crate::models::{Location, MatchStateId};
    use crate::notify::{Notification, NotificationPreferences};

    struct FixedPreferences(Option<NotificationPreferences>);

    #[async_trait]
    impl PreferencesSource for FixedPreferences {
        async fn get_preferences(&self) -> Result<NotificationPreferences> {
            self.0.ok_or_else(|| anyhow::anyhow!("store unavailable"))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<Notification>>,
        deny: bool,
        /// Upcoming calls that fail with a platform error
        outages: Mutex<u32>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn schedule(&self, notification: Notification) -> Result<(), NotificationError> {
            if self.deny {
                return Err(NotificationError::PermissionDenied);
            }
            {
                let mut outages = self.outages.lock().unwrap();
                if *outages > 0 {
                    *outages -= 1;
                    return Err(NotificationError::Platform("quota exceeded".to_string()));
                }
            }
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        haptics: Mutex<Vec<HapticKind>>,
        goals: Mutex<Vec<String>>,
    }

    impl HapticSink for Recorder {
        fn impact(&self, kind: HapticKind) {
            self.haptics.lock().unwrap().push(kind);
        }
    }

    impl CelebrationHook for Recorder {
        fn on_goal_celebration(&self, team: &str, _player: Option<&str>, _minute: Option<u32>) {
            self.goals.lock().unwrap().push(team.to_string());
        }
    }

    fn goal() -> DomainEvent {
        DomainEvent::Goal {
            side: Location::Away,
            team: "Rovers".to_string(),
            player: None,
            minute: Some(67),
        }
    }

    fn dispatcher(
        prefs: Option<NotificationPreferences>,
        sink: Arc<RecordingSink>,
        recorder: Arc<Recorder>,
    ) -> NotificationDispatcher {
        NotificationDispatcher::new(Arc::new(FixedPreferences(prefs)), sink, Locale::En)
            .with_haptics(recorder.clone())
            .with_celebration(recorder)
    }

    #[tokio::test]
    async fn test_dispatches_when_enabled() {
        let sink = Arc::new(RecordingSink::default());
        let recorder = Arc::new(Recorder::default());
        let d = dispatcher(Some(NotificationPreferences::default()), sink.clone(), recorder.clone());
        let snap = snapshot(MatchStateId::FirstHalf, vec![]);

        d.dispatch(&DomainEvent::MatchStart, &snap).await;
        d.dispatch(&goal(), &snap).await;

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].title, "GOAL! Rovers");
        assert_eq!(*recorder.haptics.lock().unwrap(), vec![HapticKind::Success]);
        assert_eq!(*recorder.goals.lock().unwrap(), vec!["Rovers".to_string()]);
    }

    #[tokio::test]
    async fn test_disabled_preferences_still_celebrate() {
        let sink = Arc::new(RecordingSink::default());
        let recorder = Arc::new(Recorder::default());
        let prefs = NotificationPreferences {
            enabled: true,
            live_matches: false,
        };
        let d = dispatcher(Some(prefs), sink.clone(), recorder.clone());
        let snap = snapshot(MatchStateId::FirstHalf, vec![]);

        d.dispatch(&goal(), &snap).await;
        d.dispatch(&DomainEvent::MatchStart, &snap).await;

        assert!(sink.sent.lock().unwrap().is_empty());
        assert!(recorder.haptics.lock().unwrap().is_empty());
        assert_eq!(recorder.goals.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_preference_failure_is_silent() {
        let sink = Arc::new(RecordingSink::default());
        let recorder = Arc::new(Recorder::default());
        let d = dispatcher(None, sink.clone(), recorder);

        d.dispatch(&DomainEvent::MatchEnd, &snapshot(MatchStateId::Finished, vec![]))
            .await;

        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let sink = Arc::new(RecordingSink {
            deny: true,
            ..Default::default()
        });
        let recorder = Arc::new(Recorder::default());
        let d = dispatcher(Some(NotificationPreferences::default()), sink, recorder.clone());
        let card = DomainEvent::RedCard {
            side: Location::Home,
            team: "Lions".to_string(),
            player: Some("Silva".to_string()),
            minute: Some(80),
        };

        d.dispatch(&card, &snapshot(MatchStateId::SecondHalf, vec![])).await;

        assert!(recorder.haptics.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_platform_error_skips_haptics_and_next_dispatch_recovers() {
        let sink = Arc::new(RecordingSink {
            outages: Mutex::new(1),
            ..Default::default()
        });
        let recorder = Arc::new(Recorder::default());
        let d = dispatcher(Some(NotificationPreferences::default()), sink.clone(), recorder.clone());
        let snap = snapshot(MatchStateId::SecondHalf, vec![]);

        d.dispatch(&goal(), &snap).await;
        assert!(sink.sent.lock().unwrap().is_empty());
        assert!(recorder.haptics.lock().unwrap().is_empty());

        d.dispatch(&goal(), &snap).await;
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
        assert_eq!(*recorder.haptics.lock().unwrap(), vec![HapticKind::Success]);
        // Celebration runs ahead of the sink both times
        assert_eq!(recorder.goals.lock().unwrap().len(), 2);
    }
}
