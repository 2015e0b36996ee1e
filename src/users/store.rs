use crate::error::StoreError;
use crate::model::{NewUser, User, UserPatch};
use crate::runtime::{Backend, IdGenerator};
use crate::store::{Store, Subscription};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Observable state of the user store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub users: Vec<User>,
    /// Record focused by the edit and delete dialogs.
    pub selected_user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Holds the user list for the users page.
///
/// Mutators wait for the backend to acknowledge, then apply the change
/// locally. Unknown ids are ignored.
#[derive(Clone)]
pub struct UserStore {
    state: Store<UserState>,
    backend: Arc<dyn Backend>,
    ids: Arc<IdGenerator>,
}

impl UserStore {
    /// Create an empty store; call [`UserStore::fetch_users`] to load it.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_ids(backend, Arc::new(IdGenerator::new()))
    }

    pub(crate) fn with_ids(backend: Arc<dyn Backend>, ids: Arc<IdGenerator>) -> Self {
        Self {
            state: Store::new(UserState::default()),
            backend,
            ids,
        }
    }

    /// Record a backend failure for the view.
    fn fail(&self, err: &StoreError, action: &str) {
        warn!(error = %err, action, "user store call failed");
        let message = err.to_string();
        self.state.update(|s| {
            s.is_loading = false;
            s.error = Some(message);
        });
    }

    /// Replace the list with the backend's users.
    pub async fn fetch_users(&self) {
        self.state.update(|s| s.is_loading = true);

        match self.backend.fetch_users().await {
            Ok(users) => {
                info!(count = users.len(), "fetched users");
                self.state.update(|s| {
                    s.users = users;
                    s.is_loading = false;
                    s.error = None;
                });
            }
            Err(err) => self.fail(&err, "fetch"),
        }
    }

    /// Create a user and append it once the backend acknowledges.
    ///
    /// Forms failing [`NewUser::validate`] are rejected before any state
    /// changes.
    pub async fn add_user(&self, fields: NewUser) -> Result<User, StoreError> {
        fields.validate()?;

        self.state.update(|s| s.is_loading = true);
        let user = fields.into_user(self.ids.next_id(), Utc::now());

        if let Err(err) = self.backend.create_user(&user).await {
            self.fail(&err, "add");
            return Err(err);
        }

        debug!(id = %user.id, role = %user.role, "added user");
        let added = user.clone();
        self.state.update(move |s| {
            s.users.push(user);
            s.is_loading = false;
            s.error = None;
        });
        Ok(added)
    }

    /// Merge `patch` into user `id`, and into the selection if it matches.
    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<(), StoreError> {
        self.state.update(|s| s.is_loading = true);

        if let Err(err) = self.backend.update_user(id, &patch).await {
            self.fail(&err, "update");
            return Err(err);
        }

        debug!(id, "updating user");
        self.state.update(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == id) {
                patch.apply(user);
            }
            if let Some(selected) = s.selected_user.as_mut().filter(|u| u.id == id) {
                patch.apply(selected);
            }
            s.is_loading = false;
            s.error = None;
        });
        Ok(())
    }

    /// Remove user `id`, clearing the selection if it pointed there.
    pub async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        self.state.update(|s| s.is_loading = true);

        if let Err(err) = self.backend.delete_user(id).await {
            self.fail(&err, "delete");
            return Err(err);
        }

        debug!(id, "deleting user");
        self.state.update(|s| {
            s.users.retain(|u| u.id != id);
            if s.selected_user.as_ref().is_some_and(|u| u.id == id) {
                s.selected_user = None;
            }
            s.is_loading = false;
            s.error = None;
        });
        Ok(())
    }

    /// Set the record the edit and delete dialogs act on.
    pub fn select_user(&self, user: Option<User>) {
        self.state.update(|s| s.selected_user = user);
    }

    /// Get a clone of the user list.
    pub fn users(&self) -> Vec<User> {
        self.state.read(|s| s.users.clone())
    }

    /// Get a clone of the selected user.
    pub fn selected_user(&self) -> Option<User> {
        self.state.read(|s| s.selected_user.clone())
    }

    /// Whether a backend call is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read(|s| s.is_loading)
    }

    /// Message from the last failed backend call, if any.
    pub fn error(&self) -> Option<String> {
        self.state.read(|s| s.error.clone())
    }

    /// Get a clone of the whole store state.
    pub fn snapshot(&self) -> UserState {
        self.state.get()
    }

    /// Users whose name, email or role contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<User> {
        self.state
            .read(|s| s.users.iter().filter(|u| u.matches(query)).cloned().collect())
    }

    /// Re-render hook: `f` runs after every change.
    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&UserState) + Send + Sync + 'static,
    {
        self.state.subscribe(f)
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}
