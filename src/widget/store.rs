//! Registry of mounted widgets.
//!
//! Every page view mounts its own [`ChatWidget`]. The store only exists so
//! that HTTP handlers can find the widget belonging to a page; widgets never
//! share state with each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::state::ChatWidget;
use crate::endpoint::ChatEndpoint;

/// How often an open page pings its widget, and how often the sweeper runs.
///
/// A quarter of the idle timeout, so a live page refreshes its activity
/// several times before it could be considered abandoned.
#[must_use]
pub fn keepalive_interval(idle_timeout: Duration) -> Duration {
    (idle_timeout / 4).max(Duration::from_millis(10))
}

/// Handle to one mounted widget. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MountedWidget {
    inner: Arc<MountedInner>,
}

#[derive(Debug)]
struct MountedInner {
    id: String,
    widget: Mutex<ChatWidget>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl MountedWidget {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(MountedInner {
                id,
                widget: Mutex::new(ChatWidget::new()),
                last_activity: RwLock::new(now),
            }),
        }
    }

    /// The mount id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Run `f` with exclusive access to the widget state.
    ///
    /// The lock is released before this returns, so it must never be used
    /// to span an await.
    pub fn with<R>(&self, f: impl FnOnce(&mut ChatWidget) -> R) -> R {
        let mut guard = self
            .inner
            .widget
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let out = f(&mut *guard);
        drop(guard);
        self.touch();
        out
    }

    /// Run one exchange without holding the widget lock across the request.
    ///
    /// Returns `false` if the submission was rejected, in which case no
    /// request was issued.
    pub async fn submit(&self, endpoint: &dyn ChatEndpoint, text: &str) -> bool {
        let Some(outgoing) = self.with(|w| w.begin(text)) else {
            return false;
        };

        info!(
            name: "widget.submit.sent",
            widget = %self.id(),
            chars = outgoing.text.len(),
            "submitting message"
        );
        let result = endpoint.send(&outgoing.text).await;
        self.with(|w| {
            w.settle(result);
        });
        true
    }

    fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    /// Check if the widget has been idle longer than `timeout`.
    ///
    /// A widget with a request in flight is never considered idle.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let sending = self
            .inner
            .widget
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_sending();
        if sending {
            return false;
        }

        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative duration means the clock went backwards; treat as fresh.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe registry of mounted widgets.
#[derive(Debug, Clone, Default)]
pub struct WidgetStore {
    inner: Arc<RwLock<HashMap<String, MountedWidget>>>,
}

impl WidgetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a fresh, empty widget under a new id.
    #[must_use]
    pub fn mount(&self) -> MountedWidget {
        let id = Uuid::new_v4().to_string();
        let widget = MountedWidget::new(id.clone());
        self.write().insert(id, widget.clone());
        info!(name: "widget.mounted", widget = %widget.id(), "widget mounted");
        widget
    }

    /// Get a mounted widget by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<MountedWidget> {
        self.read().get(id).cloned()
    }

    /// Unmount a widget, discarding its conversation.
    pub fn remove(&self, id: &str) -> Option<MountedWidget> {
        let removed = self.write().remove(id);
        if removed.is_some() {
            info!(name: "widget.unmounted", widget = %id, "widget unmounted");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove widgets that have been idle longer than `timeout`.
    ///
    /// Returns the number of widgets removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.write();
        let before = guard.len();
        guard.retain(|_, widget| !widget.is_expired_with_timeout(timeout));
        before - guard.len()
    }

    /// Periodically sweep abandoned widgets until the runtime shuts down.
    ///
    /// Open pages keep their widget alive by pinging it every
    /// [`keepalive_interval`], so only widgets whose page is gone expire.
    pub fn spawn_sweeper(&self, timeout: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        let period = keepalive_interval(timeout);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = store.cleanup_expired_with_timeout(timeout);
                if removed > 0 {
                    info!(name: "widget.swept", removed, "idle widgets removed");
                }
            }
        })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, MountedWidget>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, MountedWidget>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
