use crate::error::StoreError;
use crate::model::{Notification, User, UserPatch};
use crate::seed;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

/// The server side of the dashboard stores.
///
/// Stores only talk to the backend through this trait, so a real API client
/// can replace [`MockBackend`] without touching store code.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, StoreError>;

    async fn fetch_users(&self) -> Result<Vec<User>, StoreError>;

    /// Acknowledge creation of `user`.
    async fn create_user(&self, user: &User) -> Result<(), StoreError>;

    /// Acknowledge an update of user `id`.
    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<(), StoreError>;

    /// Acknowledge deletion of user `id`.
    async fn delete_user(&self, id: &str) -> Result<(), StoreError>;
}

/// A backend that answers every call with seed data after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockBackend {
    latency: Duration,
}

impl MockBackend {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn simulate(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LATENCY)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, StoreError> {
        self.simulate().await;
        Ok(seed::notifications(Utc::now()))
    }

    async fn fetch_users(&self) -> Result<Vec<User>, StoreError> {
        self.simulate().await;
        Ok(seed::users())
    }

    async fn create_user(&self, _user: &User) -> Result<(), StoreError> {
        self.simulate().await;
        Ok(())
    }

    async fn update_user(&self, _id: &str, _patch: &UserPatch) -> Result<(), StoreError> {
        self.simulate().await;
        Ok(())
    }

    async fn delete_user(&self, _id: &str) -> Result<(), StoreError> {
        self.simulate().await;
        Ok(())
    }
}
