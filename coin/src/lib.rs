//! Coins for the zero-knowledge spend circuit.
//!
//! A coin is a commitment `C = g^S * h^r` in a prime field, where `S` is the
//! serial number revealed at spend time and `r` is secret randomness. This
//! crate provides:
//! - [`GroupParameters`]: the generators, prime modulus and circuit shape
//!   shared by every coin of a deployment
//! - [`CoinWitness`]: the interface through which the spend circuit reads a
//!   coin's secret opening
//! - [`PrivateCoin`] and [`PublicCoin`]: the two halves of a minted coin
//!
//! # Example
//!
//! ```
//! use coin::{CoinWitness, GroupParameters, PrivateCoin};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let params = GroupParameters::demo().expect("demo parameters");
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let coin = PrivateCoin::mint(&params, &mut rng);
//! let public = coin.public_coin(&params);
//! assert!(public.opens_to(&params, &coin));
//!
//! // The spend circuit reads the randomness one bit per wire.
//! let mut bits = vec![false; params.dimensions().serial_size];
//! coin.randomness_bits(&mut bits);
//! ```
//!
//! # Security Considerations
//!
//! - Mint with a cryptographically secure random number generator
//! - Never reuse a serial number; it is the double-spend tag
//! - The demo parameters use small generators and are not for production

mod commitment;
mod constants;
mod errors;
mod params;
mod witness;

#[cfg(test)]
mod tests;

pub use commitment::PublicCoin;
pub use constants::{DEMO_COLUMNS, DEMO_PADS, DEMO_ROWS, DEMO_SERIAL_SIZE};
pub use errors::CoinError;
pub use params::{CircuitDimensions, GroupParameters};
pub use witness::{CoinWitness, PrivateCoin};
