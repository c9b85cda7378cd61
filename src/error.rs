use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while building pixel buffers, extracting palettes or parsing colors.
///
/// Every error is local to the call that produced it; no partial palette is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("image has {pixels} pixels, more than the limit of {limit}")]
    ResourceExceeded { pixels: u64, limit: u64 },
    #[error("palette extraction was cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidInput(reason.into())
    }
}
