use thiserror::Error;

/// Share chain state machine error conditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShareChainError {
    /// Occurs when the header contains inconsistent data.
    #[error("Inconsistent data in the share header.")]
    InconsistentHeader,

    /// Occurs when the share's accumulator commitment does not match the
    /// set of shares preceding it on the tip it extends.
    #[error("Share commits to a different set of previous shares.")]
    PrevSharesMismatch,

    /// Occurs when a share extends a tip that is not tracked.
    #[error("Share extends an unknown tip.")]
    UnknownTip,
}
