//! User-facing notifications
//!
//! Components that need to tell the user something (a failed remote fetch,
//! for instance) receive an `Arc<dyn Notifier>` at construction. The UI shell
//! decides how notifications are shown: [`NotificationCenter`] queues them for
//! the shell to drain, [`LogNotifier`] only writes them to the log.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use rust_i18n::t;
use serde::Serialize;
use std::collections::VecDeque;

use crate::constants::NOTIFICATION_QUEUE_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationLevel {
    Error,
    Warning,
    Info,
    Success,
}

impl NotificationLevel {
    /// Localized default title
    pub fn title(&self) -> String {
        match self {
            NotificationLevel::Error => t!("notify.error"),
            NotificationLevel::Warning => t!("notify.warning"),
            NotificationLevel::Info => t!("notify.info"),
            NotificationLevel::Success => t!("notify.success"),
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn new(level: NotificationLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            title: level.title(),
            content: content.into(),
            created_at: Local::now(),
        }
    }
}

/// Sink for user-facing notifications, non-blocking by contract
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn error(&self, content: &str) {
        self.notify(Notification::new(NotificationLevel::Error, content));
    }

    fn warning(&self, content: &str) {
        self.notify(Notification::new(NotificationLevel::Warning, content));
    }

    fn info(&self, content: &str) {
        self.notify(Notification::new(NotificationLevel::Info, content));
    }

    fn success(&self, content: &str) {
        self.notify(Notification::new(NotificationLevel::Success, content));
    }
}

/// Writes notifications to the log only, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => {
                log::error!("[{}] {}", notification.title, notification.content)
            }
            NotificationLevel::Warning => {
                log::warn!("[{}] {}", notification.title, notification.content)
            }
            NotificationLevel::Info | NotificationLevel::Success => {
                log::info!("[{}] {}", notification.title, notification.content)
            }
        }
    }
}

/// Bounded queue of pending notifications, drained by the UI shell
pub struct NotificationCenter {
    queue: Mutex<VecDeque<Notification>>,
    limit: usize,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_limit(NOTIFICATION_QUEUE_LIMIT)
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            limit: limit.max(1),
        }
    }

    /// Takes every pending notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        let mut queue = self.queue.lock();
        if queue.len() >= self.limit {
            if let Some(dropped) = queue.pop_front() {
                log::debug!("Notification queue full, dropping: {}", dropped.content);
            }
        }
        queue.push_back(notification);
    }
}
