//! Error types for arithmetic coding.

use thiserror::Error;

/// Error variants for model updates and coding operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An update would push the model's total past 31 bits of precision.
    #[error("frequency total would exceed 2^31 - 1")]
    TotalOverflow,

    /// A negative update would drive a symbol's count below zero.
    #[error("count for symbol {0} would go negative")]
    CountUnderflow(u8),

    /// The coder refused the call because an earlier operation failed.
    ///
    /// Once an encoder or decoder hits an I/O failure its interval state can
    /// no longer be trusted, so every later call short-circuits with this.
    #[error("coder is unusable after an earlier failure")]
    Poisoned,

    /// An I/O error occurred while reading or writing the coded stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for arithmetic coding operations.
pub type Result<T> = std::result::Result<T, Error>;
