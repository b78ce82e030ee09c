//! Error types for the packing engine.

/// Errors that end a packing run.
///
/// No partial partition is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    /// An item is longer than a whole folder, so no strategy can place it.
    #[error("item '{name}' ({size}s) exceeds folder capacity of {capacity}s")]
    ItemTooLarge {
        name: String,
        size: u64,
        capacity: u64,
    },

    /// The strategy selector is not a registered name.
    #[error("unknown strategy '{name}'. Available options are: {valid}")]
    UnknownStrategy { name: String, valid: String },

    /// The capacity cannot be used by the chosen strategy.
    #[error("invalid capacity {capacity}: {reason}")]
    InvalidCapacity { capacity: u64, reason: String },
}
