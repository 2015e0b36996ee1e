use thiserror::Error;

/// Errors surfaced by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Form-level checks run before a record reaches a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a name is required")]
    MissingName,

    #[error("an email address is required")]
    MissingEmail,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid latency {value:?}: {source}")]
    InvalidLatency {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
