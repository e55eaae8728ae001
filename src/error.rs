//! Error types for tree operations.
//!
//! Only conditions that reflect container state or an invalid index are errors. A key that
//! is simply absent is reported through `Option` or `bool`.

use thiserror::Error;

/// Result type alias using [`TreeError`].
pub type Result<T> = core::result::Result<T, TreeError>;

/// Errors that can occur in tree operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum TreeError {
    /// `first`, `last`, `pop_first` or `pop_last` was called on an empty container.
    #[error("operation requires a non-empty container")]
    EmptyContainer,

    /// A rank-based lookup was outside `0..len`.
    #[error("rank {index} out of range for container of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
