//! Integration tests for Pulseboard

use async_trait::async_trait;
use pulseboard::{
    Backend, Config, MockBackend, NewNotification, NewUser, Notification, NotificationKind,
    Priority, Role, Session, StoreError, User, UserPatch, UserStatus,
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

fn instant_session() -> Session {
    Session::new(Config::default().with_latency(Duration::ZERO))
}

/// Seed backend that can be taken offline, standing in for an unreachable server.
struct SwitchableBackend {
    offline: AtomicBool,
    seed: MockBackend,
}

impl SwitchableBackend {
    fn offline() -> Self {
        let backend = Self::online();
        backend.set_offline(true);
        backend
    }

    fn online() -> Self {
        Self {
            offline: AtomicBool::new(false),
            seed: MockBackend::new(Duration::ZERO),
        }
    }

    fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self, message: &str) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Backend(message.to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Backend for SwitchableBackend {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, StoreError> {
        self.check("Failed to fetch notifications")?;
        self.seed.fetch_notifications().await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, StoreError> {
        self.check("Failed to fetch users")?;
        self.seed.fetch_users().await
    }

    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        self.check("Failed to add user")?;
        self.seed.create_user(user).await
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<(), StoreError> {
        self.check("Failed to update user")?;
        self.seed.update_user(id, patch).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        self.check("Failed to delete user")?;
        self.seed.delete_user(id).await
    }
}

#[tokio::test]
async fn session_load_fills_both_stores() {
    let session = instant_session();
    session.load().await;

    assert_eq!(session.notifications().notifications().len(), 4);
    assert_eq!(session.notifications().unread_count(), 3);
    assert_eq!(session.users().users().len(), 5);
}

#[tokio::test]
async fn unread_count_always_matches_list() {
    let session = instant_session();
    let store = session.notifications();
    store.fetch_notifications().await;

    let consistent = |store: &pulseboard::NotificationStore| {
        let snapshot = store.snapshot();
        snapshot.unread_count == snapshot.notifications.iter().filter(|n| !n.read).count()
    };

    store.add_notification(NewNotification::new(
        "Invoice paid",
        "Invoice #1042 was paid.",
        Priority::Low,
        NotificationKind::Success,
    ));
    assert!(consistent(store));
    assert_eq!(store.unread_count(), 4);

    store.mark_as_read("1");
    assert!(consistent(store));
    assert_eq!(store.unread_count(), 3);

    store.delete_notification("4");
    assert!(consistent(store));
    assert_eq!(store.unread_count(), 2);

    store.mark_all_as_read();
    assert!(consistent(store));
    assert_eq!(store.unread_count(), 0);

    store.clear_all_notifications();
    assert!(consistent(store));
    assert!(store.notifications().is_empty());
}

#[tokio::test]
async fn mark_all_as_read_from_any_state() {
    let session = instant_session();
    let store = session.notifications();

    store.mark_all_as_read();
    assert_eq!(store.unread_count(), 0);

    store.fetch_notifications().await;
    store.mark_all_as_read();
    assert_eq!(store.unread_count(), 0);
    assert!(store.notifications().iter().all(|n| n.read));
}

#[tokio::test]
async fn added_user_is_lost_on_refetch() {
    let session = instant_session();
    let users = session.users();
    users.fetch_users().await;

    let added = users
        .add_user(
            NewUser::new("A", "a@x.com")
                .with_role(Role::User)
                .with_status(UserStatus::Active),
        )
        .await
        .unwrap();
    assert_eq!(users.users().len(), 6);

    users.fetch_users().await;

    assert_eq!(users.users().len(), 5);
    assert!(users.users().iter().all(|u| u.id != added.id));
}

#[tokio::test]
async fn update_unknown_user_does_not_throw() {
    let session = instant_session();
    let users = session.users();
    users.fetch_users().await;
    let before = users.users();

    let result = users
        .update_user("does-not-exist", UserPatch::status(UserStatus::Inactive))
        .await;

    assert!(result.is_ok());
    assert_eq!(users.users(), before);
}

#[tokio::test]
async fn fetch_reports_loading_transitions() {
    let session = instant_session();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let _guard = session
        .users()
        .subscribe(move |state| sink.lock().unwrap().push(state.is_loading));

    session.users().fetch_users().await;

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[tokio::test(start_paused = true)]
async fn fetch_respects_configured_latency() {
    let session = Session::new(Config::default());
    let store = session.notifications().clone();
    let started = tokio::time::Instant::now();

    let fetch = tokio::spawn(async move { store.fetch_notifications().await });
    tokio::task::yield_now().await;
    assert!(session.notifications().is_loading());

    fetch.await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(!session.notifications().is_loading());
    assert_eq!(session.notifications().unread_count(), 3);
}

#[tokio::test]
async fn backend_failures_are_recorded() {
    let session = Session::with_backend(Arc::new(SwitchableBackend::offline()));

    session.load().await;

    assert_eq!(
        session.notifications().error().as_deref(),
        Some("Failed to fetch notifications")
    );
    assert!(!session.notifications().is_loading());
    assert_eq!(session.users().error().as_deref(), Some("Failed to fetch users"));
    assert!(!session.users().is_loading());

    let err = session
        .users()
        .add_user(NewUser::new("A", "a@x.com"))
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::Backend("Failed to add user".into()));
    assert_eq!(session.users().error().as_deref(), Some("Failed to add user"));
    assert!(session.users().users().is_empty());
    assert!(!session.users().is_loading());
}

#[tokio::test]
async fn successful_fetch_clears_previous_error() {
    let backend = Arc::new(SwitchableBackend::offline());
    let session = Session::with_backend(backend.clone());

    session.load().await;
    assert!(session.notifications().error().is_some());
    assert!(session.users().error().is_some());

    backend.set_offline(false);
    session.load().await;

    assert_eq!(session.notifications().error(), None);
    assert_eq!(session.notifications().unread_count(), 3);
    assert_eq!(session.users().error(), None);
    assert_eq!(session.users().users().len(), 5);
}

#[tokio::test]
async fn failed_user_edits_leave_the_list_alone() {
    let backend = Arc::new(SwitchableBackend::online());
    let session = Session::with_backend(backend.clone());
    let users = session.users();
    users.fetch_users().await;
    let before = users.users();

    backend.set_offline(true);

    let err = users
        .update_user("1", UserPatch::status(UserStatus::Inactive))
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::Backend("Failed to update user".into()));
    assert_eq!(users.error().as_deref(), Some("Failed to update user"));
    assert!(!users.is_loading());
    assert_eq!(users.users(), before);

    let err = users.delete_user("1").await.unwrap_err();
    assert_eq!(err, StoreError::Backend("Failed to delete user".into()));
    assert_eq!(users.error().as_deref(), Some("Failed to delete user"));
    assert!(!users.is_loading());
    assert_eq!(users.users(), before);

    backend.set_offline(false);
    users.delete_user("1").await.unwrap();
    assert_eq!(users.error(), None);
    assert_eq!(users.users().len(), 4);
}

#[tokio::test]
async fn unread_badge_watcher() {
    let session = instant_session();
    let counts = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&counts);

    let guard = session
        .notifications()
        .watch_unread_count(move |count| sink.lock().unwrap().push(count));

    session.notifications().fetch_notifications().await;
    session.notifications().mark_as_read("2");
    session.notifications().mark_as_read("1");
    drop(guard);
    session.notifications().mark_all_as_read();

    assert_eq!(*counts.lock().unwrap(), vec![0, 3, 2]);
}

#[tokio::test]
async fn subscribers_see_every_mutation() {
    let session = instant_session();
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let _guard = session.notifications().subscribe(move |_| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
    });

    session.notifications().mark_all_as_read();
    session.notifications().clear_all_notifications();

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn records_serialize_for_views() {
    let user = pulseboard::seed::users().remove(3);
    let json = serde_json::to_value(&user).unwrap();

    assert_eq!(json["role"], "user");
    assert_eq!(json["status"], "pending");
    assert!(json.get("createdAt").is_some());
    assert!(json.get("lastLogin").is_none());

    let notification = &pulseboard::seed::notifications(chrono::Utc::now())[3];
    let json = serde_json::to_value(notification).unwrap();
    assert_eq!(json["type"], "error");
    assert_eq!(json["priority"], "high");

    let back: Notification = serde_json::from_value(json).unwrap();
    assert_eq!(&back, notification);
}
