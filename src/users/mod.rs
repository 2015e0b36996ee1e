//! User store backing the users page.

mod store;

pub use store::{UserState, UserStore};
