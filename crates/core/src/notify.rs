//! Transient user notifications.
//!
//! Keeps a bounded list of the most recent notifications, oldest first.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub struct NotificationCenter {
    recent: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl NotificationCenter {
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationLevel::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationLevel::Error, message.into())
    }

    fn push(&self, level: NotificationLevel, message: String) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            level,
            message,
            created_at: Utc::now(),
        };

        {
            let mut recent = self.recent.lock().unwrap_or_else(PoisonError::into_inner);
            if recent.len() == self.capacity {
                recent.pop_front();
            }
            recent.push_back(notification.clone());
        }

        notification
    }

    /// Recent notifications, oldest first.
    pub fn recent(&self) -> Vec<Notification> {
        self.recent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_is_bounded() {
        let center = NotificationCenter::new(2);
        center.success("one");
        center.error("two");
        center.success("three");

        let recent = center.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "two");
        assert_eq!(recent[0].level, NotificationLevel::Error);
        assert_eq!(recent[1].message, "three");
    }

    #[test]
    fn test_push_returns_stored_notification() {
        let center = NotificationCenter::default();

        let sent = center.success("Database synced successfully");
        assert_eq!(center.recent(), vec![sent.clone()]);
        assert_eq!(sent.level, NotificationLevel::Success);

        let other = center.error("Failed to sync database");
        assert_ne!(sent.id, other.id);
    }
}
