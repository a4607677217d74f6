//! Announcements service
//!
//! Portal-wide notices with per-user read tracking. `read_by` only grows and
//! holds each user at most once.

use crate::database::{
    Announcement, Collection, CreateAnnouncementRequest, Store, UpdateAnnouncementRequest,
};
use crate::error::Result;
use crate::ids::{AnnouncementId, UserId};
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct AnnouncementsService {
    announcements: Collection<Announcement>,
}

impl AnnouncementsService {
    pub fn new(store: Store) -> Self {
        Self {
            announcements: store.collection(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Announcement>> {
        self.announcements.list().await
    }

    /// Active, unexpired announcements, newest first
    pub async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Announcement>> {
        let mut active: Vec<Announcement> = self
            .list()
            .await?
            .into_iter()
            .filter(|a| a.is_visible_at(now))
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    pub async fn unread_for(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Announcement>> {
        let active = self.list_active(now).await?;
        Ok(active.into_iter().filter(|a| !a.is_read_by(user_id)).collect())
    }

    pub async fn create(&self, req: CreateAnnouncementRequest) -> Result<Announcement> {
        tracing::info!("Publishing announcement: {}", req.title);

        let announcement = Announcement {
            id: AnnouncementId::generate(),
            title: req.title,
            message: req.message,
            kind: req.kind,
            created_at: Utc::now(),
            created_by: req.created_by,
            expires_at: req.expires_at,
            is_active: true,
            read_by: Vec::new(),
        };

        self.announcements.prepend(announcement).await
    }

    pub async fn update(
        &self,
        id: &AnnouncementId,
        patch: &UpdateAnnouncementRequest,
    ) -> Result<Announcement> {
        self.announcements.merge(id, patch).await
    }

    /// Record that `user_id` has read the announcement. Idempotent.
    pub async fn mark_read(&self, id: &AnnouncementId, user_id: &UserId) -> Result<Announcement> {
        self.announcements
            .modify(id, |a| {
                if !a.read_by.contains(user_id) {
                    a.read_by.push(user_id.clone());
                }
                Ok(())
            })
            .await
    }

    pub async fn remove(&self, id: &AnnouncementId) -> Result<()> {
        tracing::info!("Deleting announcement: {}", id);
        self.announcements.remove(id).await?;
        Ok(())
    }
}
