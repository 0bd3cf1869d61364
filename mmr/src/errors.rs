use thiserror::Error;

/// Represents an error in decoding serialized accumulator state.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum MmrError {
    /// This error occurs when the byte string ends before the leaf count
    /// or the peaks it implies have been read.
    #[error("Accumulator encoding is truncated.")]
    Truncated,

    /// This error occurs when the byte string continues past the last peak
    /// implied by the leaf count.
    #[error("Accumulator encoding has trailing bytes.")]
    TrailingBytes,
}
