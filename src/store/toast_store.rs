//! Bounded queue of transient notifications.
//!
//! Toasts with a positive duration remove themselves when their timer
//! fires. Timers hold only a weak reference to the store and are aborted
//! when their toast leaves the queue early or the store is dropped.

use crate::domain::id::generate_id;
use crate::error::KanbanError;
use crate::queue::BoundedQueue;
use crate::scheduler::ScheduledTask;
use crate::store::notify::Notifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

pub const DEFAULT_MAX_TOASTS: usize = 5;
pub const DEFAULT_TOAST_DURATION_MS: i64 = 5000;
const LONG_TOAST_DURATION_MS: i64 = 6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Error,
    Success,
    Warning,
    Info,
}

/// A notification in the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Milliseconds until auto-dismiss; zero or less never expires
    #[serde(rename = "duration")]
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_persistent(&self) -> bool {
        self.duration_ms <= 0
    }
}

/// A toast before it has been given an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToast {
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
    /// Falls back to the store's default duration when unset
    pub duration_ms: Option<i64>,
}

impl NewToast {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
            duration_ms: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

#[derive(Debug)]
struct ToastState {
    queue: BoundedQueue<Toast>,
    timers: HashMap<String, ScheduledTask>,
}

impl ToastState {
    /// Drops the timers of toasts that left the queue, aborting them
    fn forget(&mut self, toasts: &[Toast]) {
        for toast in toasts {
            self.timers.remove(&toast.id);
        }
    }
}

#[derive(Debug)]
struct ToastShared {
    state: Mutex<ToastState>,
    notifier: Notifier,
    default_duration_ms: i64,
}

impl ToastShared {
    fn lock(&self) -> MutexGuard<'_, ToastState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Timer callback: removes the toast whose duration elapsed
    fn expire(&self, toast_id: &str) {
        let removed = {
            let mut state = self.lock();
            if let Some(timer) = state.timers.remove(toast_id) {
                timer.detach();
            }
            state.queue.remove_where(|t| t.id == toast_id)
        };

        if !removed.is_empty() {
            debug!(%toast_id, "toast expired");
            self.notifier.notify();
        }
    }
}

/// Shared handle to the toast queue. Clones refer to the same queue.
#[derive(Debug, Clone)]
pub struct ToastStore {
    shared: Arc<ToastShared>,
}

impl ToastStore {
    pub fn new(max_toasts: usize, default_duration_ms: i64) -> Self {
        Self {
            shared: Arc::new(ToastShared {
                state: Mutex::new(ToastState {
                    queue: BoundedQueue::new(max_toasts),
                    timers: HashMap::new(),
                }),
                notifier: Notifier::new(),
                default_duration_ms,
            }),
        }
    }

    /// Queues a toast and returns its id.
    ///
    /// If the queue is full the oldest toasts are evicted. Toasts with a
    /// positive duration schedule their own removal.
    pub fn add_toast(&self, toast: NewToast) -> String {
        let id = generate_id();
        let duration_ms = toast.duration_ms.unwrap_or(self.shared.default_duration_ms);
        let toast = Toast {
            id: id.clone(),
            kind: toast.kind,
            title: toast.title,
            message: toast.message,
            duration_ms,
            created_at: Utc::now(),
        };

        {
            let mut state = self.shared.lock();
            let evicted = state.queue.push(toast);
            if !evicted.is_empty() {
                info!(count = evicted.len(), max = state.queue.capacity(), "evicted oldest toasts");
                state.forget(&evicted);
            }

            if let Some(timer) = self.schedule_expiry(&id, duration_ms) {
                state.timers.insert(id.clone(), timer);
            }
        }

        debug!(toast_id = %id, duration_ms, "toast added");
        self.shared.notifier.notify();
        id
    }

    pub fn remove_toast(&self, toast_id: &str) {
        let removed = {
            let mut state = self.shared.lock();
            state.timers.remove(toast_id);
            state.queue.remove_where(|t| t.id == toast_id)
        };

        if !removed.is_empty() {
            self.shared.notifier.notify();
        }
    }

    pub fn clear_all_toasts(&self) {
        let had_toasts = {
            let mut state = self.shared.lock();
            let had_toasts = !state.queue.is_empty();
            state.queue.clear();
            state.timers.clear();
            had_toasts
        };

        if had_toasts {
            self.shared.notifier.notify();
        }
    }

    /// Sets the queue bound (minimum one), evicting the oldest toasts if
    /// the queue is now over it
    pub fn set_max_toasts(&self, limit: usize) {
        let changed = {
            let mut state = self.shared.lock();
            let previous = state.queue.capacity();
            let evicted = state.queue.set_capacity(limit);
            state.forget(&evicted);
            debug!(
                max = state.queue.capacity(),
                evicted = evicted.len(),
                "toast limit changed"
            );
            previous != state.queue.capacity()
        };

        if changed {
            self.shared.notifier.notify();
        }
    }

    pub fn max_toasts(&self) -> usize {
        self.shared.lock().queue.capacity()
    }

    /// Current toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.shared.lock().queue.to_vec()
    }

    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().queue.is_empty()
    }

    pub fn show_error(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        duration_ms: Option<i64>,
    ) -> String {
        self.show(ToastKind::Error, title, message, duration_ms)
    }

    pub fn show_success(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        duration_ms: Option<i64>,
    ) -> String {
        self.show(ToastKind::Success, title, message, duration_ms)
    }

    pub fn show_warning(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        duration_ms: Option<i64>,
    ) -> String {
        self.show(ToastKind::Warning, title, message, duration_ms)
    }

    pub fn show_info(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        duration_ms: Option<i64>,
    ) -> String {
        self.show(ToastKind::Info, title, message, duration_ms)
    }

    pub fn network_error(&self) -> String {
        self.show_error(
            "Network Error",
            Some("Failed to connect to the server. Please check your internet connection."),
            Some(LONG_TOAST_DURATION_MS),
        )
    }

    pub fn validation_error(&self, field: &str, message: Option<&str>) -> String {
        let fallback = format!("Please check the {} field and try again.", field.to_lowercase());
        self.show_error(
            format!("{field} Validation Failed"),
            Some(message.unwrap_or(fallback.as_str())),
            None,
        )
    }

    pub fn permission_denied(&self) -> String {
        self.show_error(
            "Permission Denied",
            Some("You don't have permission to perform this action."),
            None,
        )
    }

    pub fn server_error(&self) -> String {
        self.show_error(
            "Server Error",
            Some("Something went wrong on our end. Please try again later."),
            Some(LONG_TOAST_DURATION_MS),
        )
    }

    pub fn not_found(&self, item: Option<&str>) -> String {
        let item = item.unwrap_or("resource");
        self.show_error(
            "Not Found",
            Some(format!("The {item} you're looking for could not be found.").as_str()),
            None,
        )
    }

    pub fn unauthorized(&self) -> String {
        self.show_error(
            "Authentication Required",
            Some("Please log in to continue."),
            Some(LONG_TOAST_DURATION_MS),
        )
    }

    /// Surfaces a failed operation to the user
    pub fn report_error(&self, error: &KanbanError) -> String {
        match error {
            KanbanError::Validation { field, message } => {
                self.validation_error(field, Some(message.as_str()))
            }
            KanbanError::TaskNotFound(_) => self.not_found(Some("task")),
            KanbanError::ColumnNotFound(_) => self.not_found(Some("column")),
            other => self.show_error(
                "Something went wrong",
                Some(other.to_string().as_str()),
                None,
            ),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.notifier.subscribe()
    }

    fn show(
        &self,
        kind: ToastKind,
        title: impl Into<String>,
        message: Option<&str>,
        duration_ms: Option<i64>,
    ) -> String {
        self.add_toast(NewToast {
            kind,
            title: title.into(),
            message: message.map(str::to_string),
            duration_ms,
        })
    }

    fn schedule_expiry(&self, toast_id: &str, duration_ms: i64) -> Option<ScheduledTask> {
        if duration_ms <= 0 {
            return None;
        }

        let shared = Arc::downgrade(&self.shared);
        let toast_id = toast_id.to_string();
        ScheduledTask::after(Duration::from_millis(duration_ms as u64), move || {
            if let Some(shared) = shared.upgrade() {
                shared.expire(&toast_id);
            }
        })
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOASTS, DEFAULT_TOAST_DURATION_MS)
    }
}
