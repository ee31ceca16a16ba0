use std::{fmt, time::Duration};

use tokio::{sync::Mutex, task::JoinHandle};

pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    LoadFailed,
    EmptyTitle,
    AddFailed,
    DeleteFailed,
    UpdateFailed,
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Notification::LoadFailed => "Unable to load items",
            Notification::EmptyTitle => "Title should not be empty",
            Notification::AddFailed => "Unable to add an item",
            Notification::DeleteFailed => "Unable to delete an item",
            Notification::UpdateFailed => "Unable to update an item",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Holds at most one pending auto-clear task.
#[derive(Default)]
pub(crate) struct NotificationTimer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationTimer {
    pub(crate) async fn restart(&self, next: JoinHandle<()>) {
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.replace(next) {
            previous.abort();
        }
    }

    pub(crate) async fn cancel(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.abort();
        }
    }
}

impl Drop for NotificationTimer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.get_mut().take() {
            pending.abort();
        }
    }
}
