//! Notification store backing the header badge and the notifications page.

mod store;

pub use store::{NotificationFilter, NotificationState, NotificationStore, RECENT_LIMIT};
