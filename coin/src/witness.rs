//! The secret side of a coin: serial number, randomness and its bits.

use field::{FieldElement, random_bits};
use rand::Rng;

use crate::commitment::PublicCoin;
use crate::errors::CoinError;
use crate::params::GroupParameters;

/// Source of the secret opening `(S, r)` of a coin commitment.
///
/// The spend circuit consumes witnesses only through this trait, so wallets
/// can back it with whatever storage they keep coins in.
pub trait CoinWitness {
    /// The serial number `S`, revealed when the coin is spent.
    fn serial_number(&self) -> &FieldElement;

    /// The commitment randomness `r`.
    fn randomness(&self) -> &FieldElement;

    /// Writes the bits of `r` into `sink`, little-endian: `sink[i]` is the
    /// coefficient of `2^i`. Exactly `sink.len()` bits are written.
    fn randomness_bits(&self, sink: &mut [bool]) {
        let r = self.randomness();
        for (i, bit) in sink.iter_mut().enumerate() {
            *bit = r.bit(i as u64);
        }
    }
}

/// A minted coin held by its owner.
///
/// # Example
///
/// ```
/// use coin::{CircuitDimensions, GroupParameters, PrivateCoin};
/// use field::BigUint;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let dims = CircuitDimensions { columns: 4, rows: 4, serial_size: 8, pads: 2 };
/// let params = GroupParameters::new(BigUint::from(1_000_003u32), 2u32.into(), 3u32.into(), dims)
///     .expect("valid parameters");
/// let mut rng = StdRng::seed_from_u64(1);
/// let coin = PrivateCoin::mint(&params, &mut rng);
/// assert!(coin.public_coin(&params).opens_to(&params, &coin));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateCoin {
    serial: FieldElement,
    randomness: FieldElement,
}

impl PrivateCoin {
    /// Builds a coin from a chosen opening.
    ///
    /// Fails if either value comes from another field or if the randomness
    /// needs more than `serial_size` bits.
    pub fn new(
        params: &GroupParameters,
        serial: FieldElement,
        randomness: FieldElement,
    ) -> Result<Self, CoinError> {
        if !params.field().contains(&serial) || !params.field().contains(&randomness) {
            return Err(CoinError::ForeignElement);
        }
        let serial_size = params.dimensions().serial_size;
        let bits = randomness.value().bits();
        if bits > serial_size as u64 {
            return Err(CoinError::RandomnessTooWide { bits, serial_size });
        }
        Ok(Self { serial, randomness })
    }

    /// Mints a fresh coin with a random serial number and randomness.
    ///
    /// The randomness is drawn below `2^serial_size` and reduced into the
    /// field, so it never exceeds the circuit's bit budget.
    pub fn mint<R: Rng + ?Sized>(params: &GroupParameters, rng: &mut R) -> Self {
        let serial = params.field().random(rng);
        let raw = random_bits(rng, params.dimensions().serial_size as u64);
        let randomness = params.field().element(&raw);
        Self { serial, randomness }
    }

    /// The public value `g^S * h^r` published at mint time.
    pub fn public_coin(&self, params: &GroupParameters) -> PublicCoin {
        PublicCoin::new(params.commit(&self.serial, &self.randomness))
    }
}

impl CoinWitness for PrivateCoin {
    fn serial_number(&self) -> &FieldElement {
        &self.serial
    }

    fn randomness(&self) -> &FieldElement {
        &self.randomness
    }
}
