//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum DriftError {
    /// A batch was requested before the replay buffer held enough transitions.
    ///
    /// The training loop prevents this structurally with its warmup phase;
    /// the variant exists so that a violated invariant is a catchable
    /// condition rather than undefined behavior.
    #[error("insufficient data in replay buffer: len={len}, requested batch_size={batch_size}")]
    InsufficientData {
        /// Number of transitions currently held.
        len: usize,
        /// Requested batch size.
        batch_size: usize,
    },

    /// A failure raised by the environment backend.
    ///
    /// Environment errors abort the run; mid-episode state is not
    /// recoverable without backend-specific reset semantics.
    #[error("environment error: {0}")]
    Environment(String),

    /// Checkpoint files are missing, malformed, or incompatible with the
    /// configured network shapes.
    #[error("restore error: {0}")]
    Restore(String),

    /// Record key error.
    #[error("record key error: {0}")]
    RecordKey(String),

    /// Record value type error.
    #[error("record value type error: {0}")]
    RecordValueType(String),
}
