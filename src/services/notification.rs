//! Notification service

use crate::client::types::NewNotification;
use crate::client::ApiClient;
use crate::error::{PulseError, PulseResult};
use crate::models::{Notification, NotificationKind};

pub struct NotificationService<'a> {
    api: &'a ApiClient,
}

impl<'a> NotificationService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn list(&self) -> PulseResult<Vec<Notification>> {
        self.api.list_notifications()
    }

    pub fn create(&self, kind: NotificationKind, message: &str) -> PulseResult<Notification> {
        let body = new_notification_request(kind, message)?;
        let created = self.api.create_notification(&body)?;
        tracing::info!(id = %created.id, kind = %created.kind, "created notification");
        Ok(created)
    }
}

fn new_notification_request(kind: NotificationKind, message: &str) -> PulseResult<NewNotification> {
    let message = message.trim();
    if message.is_empty() {
        return Err(PulseError::Validation("Notification message is required".into()));
    }
    Ok(NewNotification {
        kind: kind.to_string(),
        message: message.to_string(),
    })
}

/// Notifications not yet marked read
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
