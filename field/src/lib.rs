//! Prime-field arithmetic over a modulus chosen at runtime.
//!
//! This crate provides [`PrimeField`], which validates a prime modulus and
//! creates elements, and [`FieldElement`], which supports the ring operations
//! through the standard operator traits plus exponentiation and an explicit
//! inverse. Arbitrary precision comes from `num-bigint`, so the same code
//! serves small test primes and production-size moduli.

mod element;
mod errors;
mod multiexp;
mod prime;
mod random;

pub use element::FieldElement;
pub use errors::FieldError;
pub use multiexp::double_exp;
pub use num_bigint::BigUint;
pub use prime::PrimeField;
pub use random::random_bits;
