//! Error types for Reed-Solomon operations

use thiserror::Error;

/// Result type for Reed-Solomon operations
pub type RsResult<T> = Result<T, RsError>;

/// Broad failure category of an [`RsError`]
///
/// Callers that want to retry (for example with a different set of erasure
/// positions) only need to look at the kind, not the individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Codec or field could not be constructed with the requested parameters
    Configuration,
    /// The caller passed data the operation cannot accept
    InvalidInput,
    /// The damage exceeds what the code can correct
    Capacity,
    /// An internal decoding invariant did not hold; the data is uncorrectable
    Consistency,
}

/// Errors that can occur during Reed-Solomon operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsError {
    /// Field exponent outside the supported range
    #[error("Field exponent {0} is out of range (supported: 1..=8)")]
    InvalidExponent(u32),

    /// Polynomial does not generate the multiplicative group
    #[error("Polynomial {polynomial:#x} is not primitive for GF(2^{exponent})")]
    NotPrimitive { exponent: u32, polynomial: u32 },

    /// Zero error-correcting symbols requested
    #[error("Number of error correction symbols must be greater than zero")]
    NoCheckSymbols,

    /// No room left for data symbols in a codeword
    #[error("{nsym} error correction symbols leave no room for data (max codeword length {max})")]
    TooManyCheckSymbols { nsym: usize, max: usize },

    /// Data block size outside `1..=max`
    #[error("Block size {size} is invalid (must be between 1 and {max})")]
    InvalidBlockSize { size: usize, max: usize },

    /// Encode called with an empty message
    #[error("Cannot encode empty message")]
    EmptyMessage,

    /// Decode called with empty data
    #[error("Data to be decoded cannot have length zero")]
    EmptyData,

    /// Division by the zero field element
    #[error("Division by zero in Galois field")]
    DivisionByZero,

    /// Logarithm of the zero field element requested
    #[error("Zero has no discrete logarithm")]
    ZeroLogarithm,

    /// A word does not belong to the field
    #[error("Symbol {value:#04x} at index {index} is not an element of GF({cardinality})")]
    SymbolOutOfRange {
        index: usize,
        value: u8,
        cardinality: usize,
    },

    /// Codeword longer than the field can address
    #[error("Codeword of {len} symbols exceeds the maximum length of {max}")]
    CodewordTooLong { len: usize, max: usize },

    /// Codeword not longer than its check symbols
    #[error("Codeword of {len} symbols is too short for {nsym} error correction symbols")]
    CodewordTooShort { len: usize, nsym: usize },

    /// Erasure position outside the codeword
    #[error("Erasure position {position} is outside a codeword of {len} symbols")]
    ErasureOutOfRange { position: usize, len: usize },

    /// Resize request that cannot be satisfied
    #[error("Cannot resize polynomial of {len} coefficients by {amount}")]
    InvalidResize { len: usize, amount: usize },

    /// Polynomial division with a divisor longer than the dividend
    #[error("Divisor has more coefficients ({divisor}) than dividend ({dividend})")]
    DivisorTooLong { divisor: usize, dividend: usize },

    /// Fewer syndromes than the recurrence needs
    #[error("Expected at least {nsym} syndromes, got {len}")]
    SyndromeLength { len: usize, nsym: usize },

    /// Chunk size of zero
    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    /// More erasures than check symbols
    #[error("Too many erasures to be corrected: {erasures} erasures, {nsym} check symbols")]
    TooManyErasures { erasures: usize, nsym: usize },

    /// Errors and erasures exceed the Singleton bound
    #[error("Too many errors to correct: {errors} errors and {erasures} erasures with {nsym} check symbols")]
    TooManyErrors {
        errors: usize,
        erasures: usize,
        nsym: usize,
    },

    /// Forney denominator vanished
    #[error("Could not find error magnitude for position {0}")]
    ErrorMagnitude(usize),

    /// Root search disagrees with the locator degree
    #[error("Chien search found {found} errors but the error locator implies {expected}")]
    RootCountMismatch { found: usize, expected: usize },

    /// A locator root does not map to a codeword position
    #[error("Error locator root {index} is outside a codeword of {len} symbols")]
    RootOutOfRange { index: usize, len: usize },

    /// Syndromes are nonzero but no error positions were found
    #[error("Unable to locate errors")]
    UnableToLocateErrors,

    /// Syndromes are still nonzero after correction
    #[error("Message still corrupted after correction")]
    CorrectionFailed,

    /// A block of a multi-block buffer could not be processed
    #[error("Block {index}: {source}")]
    BlockFailed {
        index: usize,
        #[source]
        source: Box<RsError>,
    },
}

impl RsError {
    /// Failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RsError::InvalidExponent(_)
            | RsError::NotPrimitive { .. }
            | RsError::NoCheckSymbols
            | RsError::TooManyCheckSymbols { .. }
            | RsError::InvalidBlockSize { .. } => ErrorKind::Configuration,

            RsError::EmptyMessage
            | RsError::EmptyData
            | RsError::DivisionByZero
            | RsError::ZeroLogarithm
            | RsError::SymbolOutOfRange { .. }
            | RsError::CodewordTooLong { .. }
            | RsError::CodewordTooShort { .. }
            | RsError::ErasureOutOfRange { .. }
            | RsError::InvalidResize { .. }
            | RsError::DivisorTooLong { .. }
            | RsError::SyndromeLength { .. }
            | RsError::InvalidChunkSize => ErrorKind::InvalidInput,

            RsError::TooManyErasures { .. }
            | RsError::TooManyErrors { .. }
            | RsError::ErrorMagnitude(_) => ErrorKind::Capacity,

            RsError::RootCountMismatch { .. }
            | RsError::RootOutOfRange { .. }
            | RsError::UnableToLocateErrors
            | RsError::CorrectionFailed => ErrorKind::Consistency,

            RsError::BlockFailed { source, .. } => source.kind(),
        }
    }

    /// True when retrying with more redundancy or better erasure hints could help
    pub fn is_uncorrectable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Capacity | ErrorKind::Consistency)
    }
}
