//! Observable state containers.
//!
//! A [`Store`] wraps one state value behind a lock and notifies subscribers
//! after every mutation. The dashboard stores in [`crate::notifications`] and
//! [`crate::users`] are built on top of it.

mod store;

pub use store::{Store, Subscription};
