use crate::model::{NewNotification, Notification, NotificationKind, Priority};
use crate::runtime::{Backend, IdGenerator};
use crate::store::{Store, Subscription};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Number of notifications shown in the header dropdown.
pub const RECENT_LIMIT: usize = 5;

/// Observable state of the notification store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl NotificationState {
    /// Recompute `unread_count` from the list.
    fn recount(&mut self) {
        self.unread_count = self.notifications.iter().filter(|n| !n.read).count();
    }
}

/// Selection criteria for the notifications page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Read,
    Priority(Priority),
    Kind(NotificationKind),
}

impl NotificationFilter {
    /// Whether `notification` passes this filter.
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.read,
            Self::Read => notification.read,
            Self::Priority(priority) => notification.priority == *priority,
            Self::Kind(kind) => notification.kind == *kind,
        }
    }
}

/// Holds the user's notifications and the unread badge count.
///
/// Every mutator recomputes `unread_count` from the list, so the badge can
/// never drift from the records. Unknown ids are ignored.
#[derive(Clone)]
pub struct NotificationStore {
    state: Store<NotificationState>,
    backend: Arc<dyn Backend>,
    ids: Arc<IdGenerator>,
}

impl NotificationStore {
    /// Create an empty store; call [`NotificationStore::fetch_notifications`] to load it.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_ids(backend, Arc::new(IdGenerator::new()))
    }

    pub(crate) fn with_ids(backend: Arc<dyn Backend>, ids: Arc<IdGenerator>) -> Self {
        Self {
            state: Store::new(NotificationState::default()),
            backend,
            ids,
        }
    }

    /// Replace the list with the backend's notifications.
    ///
    /// Repeated calls reset to the same seed state. A failure is recorded in
    /// [`NotificationStore::error`] rather than returned.
    pub async fn fetch_notifications(&self) {
        self.state.update(|s| s.is_loading = true);

        match self.backend.fetch_notifications().await {
            Ok(notifications) => {
                info!(count = notifications.len(), "fetched notifications");
                self.state.update(|s| {
                    s.notifications = notifications;
                    s.recount();
                    s.is_loading = false;
                    s.error = None;
                });
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch notifications");
                self.state.update(|s| {
                    s.is_loading = false;
                    s.error = Some(err.to_string());
                });
            }
        }
    }

    /// Raise a new unread notification at the top of the list.
    pub fn add_notification(&self, fields: NewNotification) -> Notification {
        let notification = fields.into_notification(self.ids.next_id(), Utc::now());
        debug!(id = %notification.id, kind = %notification.kind, "adding notification");

        let added = notification.clone();
        self.state.update(move |s| {
            s.notifications.insert(0, notification);
            s.recount();
        });
        added
    }

    /// Mark notification `id` as read.
    pub fn mark_as_read(&self, id: &str) {
        debug!(id, "marking notification as read");
        self.state.update(|s| {
            if let Some(notification) = s.notifications.iter_mut().find(|n| n.id == id) {
                notification.read = true;
            }
            s.recount();
        });
    }

    /// Mark every notification as read.
    pub fn mark_all_as_read(&self) {
        debug!("marking all notifications as read");
        self.state.update(|s| {
            for notification in &mut s.notifications {
                notification.read = true;
            }
            s.recount();
        });
    }

    /// Remove notification `id`.
    pub fn delete_notification(&self, id: &str) {
        debug!(id, "deleting notification");
        self.state.update(|s| {
            s.notifications.retain(|n| n.id != id);
            s.recount();
        });
    }

    /// Remove every notification.
    pub fn clear_all_notifications(&self) {
        debug!("clearing notifications");
        self.state.update(|s| {
            s.notifications.clear();
            s.recount();
        });
    }

    /// Get a clone of the notification list, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read(|s| s.notifications.clone())
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.state.read(|s| s.unread_count)
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read(|s| s.is_loading)
    }

    /// Message from the last failed fetch, if any.
    pub fn error(&self) -> Option<String> {
        self.state.read(|s| s.error.clone())
    }

    /// Get a clone of the whole store state.
    pub fn snapshot(&self) -> NotificationState {
        self.state.get()
    }

    /// The newest `limit` notifications.
    pub fn recent(&self, limit: usize) -> Vec<Notification> {
        self.state
            .read(|s| s.notifications.iter().take(limit).cloned().collect())
    }

    /// Notifications matching `filter`, in list order.
    pub fn filter(&self, filter: NotificationFilter) -> Vec<Notification> {
        self.state.read(|s| {
            s.notifications
                .iter()
                .filter(|n| filter.matches(n))
                .cloned()
                .collect()
        })
    }

    /// Re-render hook: `f` runs after every change.
    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&NotificationState) + Send + Sync + 'static,
    {
        self.state.subscribe(f)
    }

    /// Watch the unread badge; fires now and whenever the count changes.
    pub fn watch_unread_count<F>(&self, f: F) -> Subscription
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.state.select(|s| s.unread_count, move |count| f(*count))
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}
