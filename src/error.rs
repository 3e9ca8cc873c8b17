use thiserror::Error;

/// Errors raised by the compositing and rendering pipeline.
///
/// Nothing in the crate fails silently: bad arguments and buffer contract
/// violations error at the call site, modifier failures abort the remaining
/// chain for the tick, and sink failures bubble up to the render loop.
#[derive(Debug, Error)]
pub enum Error {
    /// A construction parameter or factor was outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A pixel index outside `[0, len)` was used.
    #[error("index {index} out of range for image of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A supplied buffer did not have the required length.
    #[error("length mismatch: expected {expected} colors, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A modifier broke an internal precondition. The rest of the chain
    /// was skipped for this tick; the image keeps its partial state.
    #[error("modifier '{name}' failed: {reason}")]
    ModifierFailure { name: String, reason: String },

    /// The output sink rejected or could not accept a buffer.
    #[error("sink unavailable: {0}")]
    SinkUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
