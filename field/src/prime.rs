//! The modulus context: validates a prime and mints elements of its field.

use std::sync::Arc;

use num_bigint::BigUint;

use crate::element::FieldElement;
use crate::errors::FieldError;

/// Bases for the Miller-Rabin test. Deterministic below 3.3 * 10^24 and a
/// strong probabilistic test above.
const WITNESS_BASES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// A prime field `Z/qZ` with a runtime modulus.
///
/// Cloning is cheap: the modulus is shared with every element created here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: Arc<BigUint>,
}

impl PrimeField {
    /// Creates the field, rejecting moduli that are not prime.
    pub fn new(modulus: BigUint) -> Result<Self, FieldError> {
        if modulus < BigUint::from(2u32) {
            return Err(FieldError::ModulusTooSmall);
        }
        if !is_probable_prime(&modulus) {
            return Err(FieldError::NotPrime(modulus));
        }
        Ok(Self {
            modulus: Arc::new(modulus),
        })
    }

    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    #[inline]
    pub fn zero(&self) -> FieldElement {
        FieldElement::from_reduced(BigUint::ZERO, Arc::clone(&self.modulus))
    }

    #[inline]
    pub fn one(&self) -> FieldElement {
        self.from_u64(1)
    }

    /// Reduces `value` modulo `q`.
    #[inline]
    pub fn element(&self, value: &BigUint) -> FieldElement {
        FieldElement::from_reduced(value % &*self.modulus, Arc::clone(&self.modulus))
    }

    #[inline]
    pub fn from_u64(&self, value: u64) -> FieldElement {
        self.element(&BigUint::from(value))
    }

    /// Maps a signed integer to its residue, so `-1` becomes `q - 1`.
    pub fn from_i64(&self, value: i64) -> FieldElement {
        let magnitude = self.from_u64(value.unsigned_abs());
        if value < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// True when `element` was created in this field.
    #[inline]
    pub fn contains(&self, element: &FieldElement) -> bool {
        *element.modulus() == *self.modulus
    }
}

/// Miller-Rabin over [`WITNESS_BASES`].
pub(crate) fn is_probable_prime(n: &BigUint) -> bool {
    let one = BigUint::from(1u32);
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for &p in WITNESS_BASES.iter() {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p) == BigUint::ZERO {
            return false;
        }
    }

    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while !d.bit(0) {
        d >>= 1u32;
        s += 1;
    }

    'witness: for &a in WITNESS_BASES.iter() {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
