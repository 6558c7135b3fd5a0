use num_bigint::BigUint;
use rand::Rng;

use crate::{FieldElement, PrimeField};

/// Extra random bytes drawn beyond the modulus width, keeping the bias of
/// the final reduction below 2^-128.
const SAMPLE_SLACK_BYTES: usize = 16;

/// Samples a uniform integer in `[0, 2^bits)`.
pub fn random_bits<R: Rng + ?Sized>(rng: &mut R, bits: u64) -> BigUint {
    let mut bytes = vec![0u8; bits.div_ceil(8) as usize];
    rng.fill_bytes(&mut bytes);
    let excess = (bytes.len() as u64) * 8 - bits;
    if let Some(top) = bytes.last_mut() {
        *top &= 0xffu8 >> excess;
    }
    BigUint::from_bytes_le(&bytes)
}

impl PrimeField {
    /// Samples a field element, uniform up to negligible bias.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> FieldElement {
        let width = self.modulus().bits().div_ceil(8) as usize + SAMPLE_SLACK_BYTES;
        let mut bytes = vec![0u8; width];
        rng.fill_bytes(&mut bytes);
        self.element(&BigUint::from_bytes_le(&bytes))
    }

    /// Samples a nonzero field element.
    pub fn random_nonzero<R: Rng + ?Sized>(&self, rng: &mut R) -> FieldElement {
        loop {
            let candidate = self.random(rng);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }
}
