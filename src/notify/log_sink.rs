use async_trait::async_trait;
use tracing::info;

use crate::error::NotificationError;

use super::{HapticKind, HapticSink, Notification, NotificationSink};

/// Writes notifications to the log instead of a device
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn schedule(&self, notification: Notification) -> Result<(), NotificationError> {
        info!(
            priority = ?notification.priority,
            sound = notification.sound,
            "[notification] {} | {}",
            notification.title,
            notification.body.replace('\n', " | ")
        );
        Ok(())
    }
}

pub struct LogHaptics;

impl HapticSink for LogHaptics {
    fn impact(&self, kind: HapticKind) {
        info!("[haptic] {:?}", kind);
    }
}
