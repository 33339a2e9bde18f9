use thiserror::Error;

/// A caller-supplied field violated an invariant. Always surfaced
/// synchronously; the display strings are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("Amount is required.")]
    AmountRequired,
    #[error("Please enter dollars and cents (up to 2 decimals). Examples: 12, 12.30, 12.34.")]
    AmountFormat,
    #[error("Amount must be greater than 0.")]
    AmountNotPositive,
    #[error("{0} must be a non-empty string.")]
    EmptyField(&'static str),
    #[error("{0} must be a valid ISO timestamp.")]
    InvalidTimestamp(&'static str),
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to save transactions.")]
    Storage(#[source] anyhow::Error),
}
