//! Auto-dismissing toast notifications.
//!
//! Each toast owns its timers: it is shown on enqueue, hidden after its
//! display duration and dropped from the queue once the fade-out delay has
//! passed. Removal is keyed by id and is a no-op for ids already gone, so a
//! manual dismiss racing the automatic one needs no timer cancellation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{NotificationItem, Severity};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);
/// Time the view gets to animate a hidden toast out before it is removed.
pub const FADE_OUT_DELAY: Duration = Duration::from_millis(300);

#[derive(Clone, Default)]
pub struct ToastQueue {
    inner: Arc<QueueInner>,
}

#[derive(Default)]
struct QueueInner {
    items: Mutex<Vec<NotificationItem>>,
    counter: AtomicU64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` for `duration`. Must be called inside a tokio runtime.
    pub fn enqueue(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) -> String {
        let id = self.next_id();
        self.lock().push(NotificationItem {
            id: id.clone(),
            message: message.into(),
            severity,
            visible: true,
        });

        let queue = self.clone();
        let timer_id = id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            queue.dismiss(&timer_id);
        });

        id
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.enqueue(message, Severity::Info, DEFAULT_DURATION)
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.enqueue(message, Severity::Success, DEFAULT_DURATION)
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        self.enqueue(message, Severity::Warning, DEFAULT_DURATION)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.enqueue(message, Severity::Danger, DEFAULT_DURATION)
    }

    /// Hide the toast now and remove it after [`FADE_OUT_DELAY`].
    pub fn dismiss(&self, id: &str) {
        {
            let mut items = self.lock();
            match items.iter_mut().find(|item| item.id == id) {
                Some(item) => item.visible = false,
                None => return,
            }
        }

        let queue = self.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(FADE_OUT_DELAY).await;
            queue.lock().retain(|item| item.id != id);
        });
    }

    pub fn items(&self) -> Vec<NotificationItem> {
        self.lock().clone()
    }

    pub fn get(&self, id: &str) -> Option<NotificationItem> {
        self.lock().iter().find(|item| item.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NotificationItem>> {
        self.inner
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|dur| dur.as_millis())
            .unwrap_or_default();
        let seq = self.inner.counter.fetch_add(1, Ordering::Relaxed);
        format!("{millis}-{seq}")
    }
}
