//! The public side of a coin: its commitment value.

use field::{BigUint, FieldElement};
use serde::{Deserialize, Serialize};

use crate::errors::CoinError;
use crate::params::GroupParameters;
use crate::witness::CoinWitness;

/// A coin as published on chain: the commitment `C = g^S * h^r`.
///
/// Only the integer value is stored, so the coin can be encoded without its
/// field; [`PublicCoin::value_in`] re-attaches it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicCoin {
    value: BigUint,
}

impl PublicCoin {
    pub(crate) fn new(commitment: FieldElement) -> Self {
        Self {
            value: commitment.value().clone(),
        }
    }

    /// The raw commitment value.
    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The commitment as an element of the parameter set's field.
    ///
    /// Fails if the value is not reduced below the modulus, which means it
    /// was produced under different parameters.
    pub fn value_in(&self, params: &GroupParameters) -> Result<FieldElement, CoinError> {
        if self.value >= *params.modulus() {
            return Err(CoinError::ForeignElement);
        }
        Ok(params.field().element(&self.value))
    }

    /// Checks that `witness` opens this commitment.
    pub fn opens_to<W: CoinWitness + ?Sized>(&self, params: &GroupParameters, witness: &W) -> bool {
        let expected = params.commit(witness.serial_number(), witness.randomness());
        *expected.value() == self.value
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CoinError> {
        bincode::serialize(self).map_err(|e| CoinError::Encoding(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoinError> {
        bincode::deserialize(bytes).map_err(|e| CoinError::Encoding(e.to_string()))
    }
}
