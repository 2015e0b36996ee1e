//! Runtime support for the dashboard stores.
//!
//! This module provides the backend seam the stores fetch through and the
//! identifier generator used for newly created records.

mod backend;
mod ids;

pub use backend::{Backend, MockBackend};
pub use ids::IdGenerator;
