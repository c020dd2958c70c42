use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{patch, FromCreate, Resource};
use crate::models::{unsaved, Notification, NotificationId, NotificationKind, UserId};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAllReadResponse {
    pub updated: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDto {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

fn default_kind() -> NotificationKind {
    NotificationKind::System
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotificationDto {
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    #[serde(default = "default_kind")]
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotificationDto {
    pub title: Option<String>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
}

impl Resource for Notification {
    type Dto = NotificationDto;
    type Update = UpdateNotificationDto;
    const PATH: &'static str = "notifications";
    const REQUIRES_ADMIN: bool = true;

    fn to_dto(&self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            user_id: self.user_id,
            title: self.title.clone(),
            message: self.message.clone(),
            kind: self.kind,
            is_read: self.is_read,
            created_at: self.created_at,
            read_at: self.read_at,
        }
    }

    fn apply_update(&mut self, update: UpdateNotificationDto) {
        patch(&mut self.title, update.title);
        patch(&mut self.message, update.message);
        match update.is_read {
            Some(true) => self.mark_read(Utc::now()),
            Some(false) => {
                self.is_read = false;
                self.read_at = None;
            }
            None => {}
        }
    }
}

impl FromCreate for Notification {
    type Create = CreateNotificationDto;

    fn from_create(create: CreateNotificationDto) -> Self {
        Notification {
            id: unsaved(),
            user_id: create.user_id,
            title: create.title,
            message: create.message,
            kind: create.kind,
            is_read: false,
            created_at: Utc::now(),
            read_at: None,
        }
    }
}
