use thiserror::Error;

/// Everything that can go wrong in this crate.
///
/// All variants are raised synchronously at the point of violation, before
/// any array is allocated or mutated, so construction and iteration are
/// all-or-nothing.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed construction parameters: bad corner count, move fraction
    /// outside `(0, 1)`, weights not summing to 1, mismatched lengths, or
    /// an unknown variation name.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Iteration or point access requested before a starting point was set.
    #[error("no starting point has been set")]
    NotInitialized,

    /// Derived-property access requested before any iteration has run.
    #[error("no trajectory has been generated yet")]
    NotRun,
}

pub type Result<T> = std::result::Result<T, Error>;
