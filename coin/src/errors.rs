//! Error types for coin parameters and witnesses.

use field::FieldError;

/// Errors that can occur while building parameters or coins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinError {
    /// The group order is not a usable prime modulus.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A generator is 0, 1 or not reduced below the modulus.
    ///
    /// Both degenerate values make the commitment `g^S * h^r` independent
    /// of one of its exponents.
    #[error("generator {name} must lie in [2, q)")]
    GeneratorOutOfRange { name: &'static str },

    /// A circuit dimension is zero, or the matrices have more cells than a
    /// `usize` can count.
    #[error(
        "invalid circuit dimensions (columns {columns}, rows {rows}, serial size {serial_size})"
    )]
    InvalidDimensions {
        columns: usize,
        rows: usize,
        serial_size: usize,
    },

    /// The randomness does not fit in the parameter set's bit length.
    #[error("randomness has {bits} bits but the parameter set allows {serial_size}")]
    RandomnessTooWide { bits: u64, serial_size: usize },

    /// A value was created in a different field than the parameters use.
    #[error("value does not belong to the parameter set's field")]
    ForeignElement,

    /// Encoding or decoding with bincode failed.
    #[error("encoding error: {0}")]
    Encoding(String),
}
