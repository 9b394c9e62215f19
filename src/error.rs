use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum HashError {
    /// The primitive failed while producing a hash (salt RNG, invalid cost).
    #[error("hashing failed: {0}")]
    Crypto(String),
    #[error("malformed hash: {0}")]
    MalformedToken(String),
    /// The token asks for more work than the app will do on the UI thread.
    #[error("work factor too high: {0}")]
    CostTooHigh(String),
}

/// Required-field violations, caught before a form runs its operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cost {0} is outside the allowed range {min}..={max}", min = crate::hasher::MIN_COST, max = crate::hasher::MAX_COST)]
    InvalidCost(u32),
    #[error("cost {0:?} is not a number")]
    CostNotANumber(String),
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),
}
