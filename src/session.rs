//! The per-session context views receive instead of global stores.

use crate::config::Config;
use crate::notifications::NotificationStore;
use crate::runtime::{Backend, IdGenerator, MockBackend};
use crate::users::UserStore;
use std::sync::Arc;

/// One dashboard session: a notification store and a user store sharing a
/// backend and an id generator.
///
/// All state lives as long as the session does; a new session starts from an
/// empty state until its stores are fetched.
///
/// # Examples
///
/// ```
/// use pulseboard::{Config, Session};
/// use std::time::Duration;
///
/// # tokio::runtime::Builder::new_current_thread()
/// #     .enable_time()
/// #     .build()
/// #     .unwrap()
/// #     .block_on(async {
/// let session = Session::new(Config::default().with_latency(Duration::ZERO));
/// session.load().await;
/// assert_eq!(session.notifications().unread_count(), 3);
/// assert_eq!(session.users().users().len(), 5);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    notifications: NotificationStore,
    users: UserStore,
}

impl Session {
    /// Create a session backed by [`MockBackend`].
    pub fn new(config: Config) -> Self {
        Self::with_backend(Arc::new(MockBackend::new(config.latency)))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        let ids = Arc::new(IdGenerator::new());
        Self {
            notifications: NotificationStore::with_ids(Arc::clone(&backend), Arc::clone(&ids)),
            users: UserStore::with_ids(backend, ids),
        }
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Fetch both stores concurrently, as the dashboard does on mount.
    pub async fn load(&self) {
        tracing::debug!("loading session stores");
        tokio::join!(
            self.notifications.fetch_notifications(),
            self.users.fetch_users()
        );
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
