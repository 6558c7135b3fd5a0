//! Error types for prime-field construction.

use num_bigint::BigUint;

/// Errors raised while setting up a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The modulus is 0 or 1, which gives no field at all.
    #[error("field modulus must be at least 2")]
    ModulusTooSmall,
    /// The modulus failed the Miller-Rabin test.
    ///
    /// Inversion relies on Fermat's little theorem, so a composite modulus
    /// would silently produce wrong inverses.
    #[error("field modulus {0} is not prime")]
    NotPrime(BigUint),
}
