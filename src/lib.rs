//! # Pulseboard
//!
//! Observable state for an administration dashboard.
//!
//! Pulseboard provides two levels of abstraction:
//!
//! ## Store (Low-level primitive)
//!
//! - `Store<T>` - Thread-safe state container that notifies subscribers
//! - `Subscription` - RAII guard that unsubscribes when dropped
//! - `Store::select` - Watchers that fire only when a derived value changes
//!
//! ## Dashboard stores
//!
//! - `NotificationStore` - Notifications plus an always-consistent unread count
//! - `UserStore` - User records plus the row selected for editing
//! - `Session` - Owns one of each, sharing a backend
//!
//! No real server exists: the stores fetch through a [`Backend`], and the
//! bundled [`MockBackend`] answers with seed data after a simulated delay.

pub mod config;
pub mod error;
pub mod model;
pub mod notifications;
pub mod runtime;
pub mod seed;
pub mod session;
pub mod store;
pub mod users;

// Re-export main types for convenience
pub use config::Config;
pub use error::{ConfigError, StoreError, ValidationError};
pub use model::{
    NewNotification, NewUser, Notification, NotificationKind, Priority, Role, User, UserPatch,
    UserStatus,
};
pub use notifications::{NotificationFilter, NotificationStore};
pub use runtime::{Backend, MockBackend};
pub use session::Session;
pub use store::{Store, Subscription};
pub use users::UserStore;

/// Install a `tracing` subscriber writing human-readable logs to stderr.
///
/// Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=pulseboard=debug`). Returns
/// an error if a global subscriber is already installed.
///
/// # Example
///
/// ```
/// let _ = pulseboard::setup_logging();
/// ```
pub fn setup_logging() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init()
}
