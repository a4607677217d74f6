//! Notifications service
//!
//! Per-user inbox entries, newest first.

use crate::database::{Collection, CreateNotificationRequest, Notification, Store};
use crate::error::Result;
use crate::ids::{NotificationId, UserId};
use chrono::Utc;

#[derive(Clone)]
pub struct NotificationsService {
    notifications: Collection<Notification>,
}

impl NotificationsService {
    pub fn new(store: Store) -> Self {
        Self {
            notifications: store.collection(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Notification>> {
        self.notifications.list().await
    }

    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>> {
        let notifications = self.list().await?;
        Ok(notifications
            .into_iter()
            .filter(|n| &n.user_id == user_id)
            .collect())
    }

    pub async fn unread_count(&self, user_id: &UserId) -> Result<usize> {
        let notifications = self.list_for_user(user_id).await?;
        Ok(notifications.iter().filter(|n| !n.read).count())
    }

    pub async fn create(&self, req: CreateNotificationRequest) -> Result<Notification> {
        let notification = Notification {
            id: NotificationId::generate(),
            user_id: req.user_id,
            title: req.title,
            message: req.message,
            kind: req.kind,
            read: false,
            created_at: Utc::now(),
            link: req.link,
        };

        let notification = self.notifications.prepend(notification).await?;
        tracing::debug!("Notified {}: {}", notification.user_id, notification.title);

        Ok(notification)
    }

    /// Mark one notification read. Already-read is fine; a missing id is not.
    pub async fn mark_read(&self, id: &NotificationId) -> Result<Notification> {
        self.notifications
            .modify(id, |n| {
                n.read = true;
                Ok(())
            })
            .await
    }

    /// Mark every notification of `user_id` read, returning how many changed
    pub async fn mark_all_read(&self, user_id: &UserId) -> Result<usize> {
        self.notifications
            .modify_each(|n| {
                let unread = &n.user_id == user_id && !n.read;
                n.read = true;
                unread
            })
            .await
    }

    pub async fn remove(&self, id: &NotificationId) -> Result<()> {
        self.notifications.remove(id).await?;
        Ok(())
    }
}
