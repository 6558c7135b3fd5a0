//! Elements of a prime field whose modulus is chosen at runtime.
//!
//! Every element carries a shared handle to its modulus, so the usual
//! operator traits work without a separate context argument. Values are kept
//! canonical (`0 <= value < q`) after every operation.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::Arc;

use num_bigint::BigUint;

/// An integer modulo a prime `q`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
    modulus: Arc<BigUint>,
}

impl FieldElement {
    /// Wraps a value that is already reduced modulo `modulus`.
    #[inline]
    pub(crate) fn from_reduced(value: BigUint, modulus: Arc<BigUint>) -> Self {
        debug_assert!(value < *modulus, "value is not reduced");
        Self { value, modulus }
    }

    #[inline]
    fn with_value(&self, value: BigUint) -> Self {
        Self {
            value,
            modulus: Arc::clone(&self.modulus),
        }
    }

    /// Canonical representative in `[0, q)`.
    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The field modulus `q`.
    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// True when both elements live in the same field.
    #[inline]
    pub fn same_field(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.modulus, &other.modulus) || self.modulus == other.modulus
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value == BigUint::ZERO
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.value == BigUint::from(1u32)
    }

    /// The zero element of this element's field.
    #[inline]
    pub fn zero_like(&self) -> Self {
        self.with_value(BigUint::ZERO)
    }

    /// The one element of this element's field.
    #[inline]
    pub fn one_like(&self) -> Self {
        self.with_value(BigUint::from(1u32) % &*self.modulus)
    }

    /// Lifts a small integer into this element's field.
    #[inline]
    pub fn from_u64_like(&self, value: u64) -> Self {
        self.with_value(BigUint::from(value) % &*self.modulus)
    }

    /// Returns the value as a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        match self.value.to_u64_digits().as_slice() {
            [] => Some(0),
            [digit] => Some(*digit),
            _ => None,
        }
    }

    #[inline]
    pub fn square(&self) -> Self {
        self * self
    }

    /// Raises `self` to a non-negative exponent.
    ///
    /// Negative exponents are deliberately not accepted; compose
    /// [`FieldElement::inverse`] with `pow` instead.
    #[inline]
    pub fn pow(&self, exponent: &BigUint) -> Self {
        self.with_value(self.value.modpow(exponent, &self.modulus))
    }

    #[inline]
    pub fn pow_u64(&self, exponent: u64) -> Self {
        self.pow(&BigUint::from(exponent))
    }

    /// Multiplicative inverse via Fermat's little theorem, `a^{q-2}`.
    ///
    /// Returns `None` for zero. The modulus is prime by construction of
    /// [`crate::PrimeField`].
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let exponent = &*self.modulus - BigUint::from(2u32);
        Some(self.pow(&exponent))
    }

    /// Bit `index` of the canonical representative, little-endian.
    #[inline]
    pub fn bit(&self, index: u64) -> bool {
        self.value.bit(index)
    }
}

impl<'a> Add<&'a FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn add(self, rhs: &'a FieldElement) -> FieldElement {
        debug_assert!(self.same_field(rhs), "mixed moduli in add");
        let mut sum = &self.value + &rhs.value;
        if sum >= *self.modulus {
            sum -= &*self.modulus;
        }
        self.with_value(sum)
    }
}

impl<'a> Sub<&'a FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn sub(self, rhs: &'a FieldElement) -> FieldElement {
        debug_assert!(self.same_field(rhs), "mixed moduli in sub");
        let diff = if self.value >= rhs.value {
            &self.value - &rhs.value
        } else {
            &self.value + &*self.modulus - &rhs.value
        };
        self.with_value(diff)
    }
}

impl<'a> Mul<&'a FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn mul(self, rhs: &'a FieldElement) -> FieldElement {
        debug_assert!(self.same_field(rhs), "mixed moduli in mul");
        self.with_value((&self.value * &rhs.value) % &*self.modulus)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        if self.is_zero() {
            return self.clone();
        }
        self.with_value(&*self.modulus - &self.value)
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        -&self
    }
}

macro_rules! forward_binop {
    ($tr:ident, $method:ident, $assign_tr:ident, $assign_method:ident) => {
        impl $tr<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                (&self).$method(&rhs)
            }
        }

        impl<'a> $tr<&'a FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &'a FieldElement) -> FieldElement {
                (&self).$method(rhs)
            }
        }

        impl $tr<FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                self.$method(&rhs)
            }
        }

        impl<'a> $assign_tr<&'a FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: &'a FieldElement) {
                *self = (&*self).$method(rhs);
            }
        }

        impl $assign_tr<FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: FieldElement) {
                *self = (&*self).$method(&rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value, f)
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.value)
    }
}

#[cfg(test)]
mod tests {
    use crate::PrimeField;
    use num_bigint::BigUint;

    fn field() -> PrimeField {
        PrimeField::new(BigUint::from(1_000_003u32)).expect("prime modulus")
    }

    #[test]
    fn test_zero_one() {
        let f = field();
        assert_eq!(f.zero() + f.zero(), f.zero());
        assert_eq!(f.one() * f.one(), f.one());
        assert_eq!(f.zero() * f.one(), f.zero());
        assert!(f.one().is_one());
        assert!(f.zero().is_zero());
    }

    #[test]
    fn test_addition_wraps() {
        let f = field();
        let a = f.from_u64(1_000_000);
        let b = f.from_u64(10);
        assert_eq!(a + b, f.from_u64(7));
    }

    #[test]
    fn test_subtraction_wraps() {
        let f = field();
        let a = f.from_u64(3);
        let b = f.from_u64(10);
        assert_eq!(&a - &b, f.from_u64(1_000_003 - 7));
        assert_eq!(&b - &a, f.from_u64(7));
    }

    #[test]
    fn test_multiplication() {
        let f = field();
        assert_eq!(f.from_u64(6) * f.from_u64(7), f.from_u64(42));
        assert_eq!(f.from_u64(1_000_002).square(), f.one());
    }

    #[test]
    fn test_negation() {
        let f = field();
        let a = f.from_u64(5);
        assert_eq!(&a + &(-&a), f.zero());
        assert_eq!(-f.zero(), f.zero());
        assert_eq!(f.from_i64(-1), -f.one());
    }

    #[test]
    fn test_inverse() {
        let f = field();
        for v in [1u64, 2, 5, 999_999, 1_000_002] {
            let a = f.from_u64(v);
            let inv = a.inverse().expect("nonzero");
            assert_eq!(&a * &inv, f.one());
        }
    }

    #[test]
    fn test_inverse_of_zero_is_none() {
        assert!(field().zero().inverse().is_none());
    }

    #[test]
    fn test_pow_matches_repeated_multiplication() {
        let f = field();
        let base = f.from_u64(3);
        let mut acc = f.one();
        for e in 0..40u64 {
            assert_eq!(base.pow_u64(e), acc);
            acc *= &base;
        }
    }

    #[test]
    fn test_negative_power_through_inverse() {
        let f = field();
        let y = f.from_u64(12_345);
        let y_neg_4 = y.inverse().expect("nonzero").pow_u64(4);
        assert_eq!(y_neg_4 * y.pow_u64(4), f.one());
    }

    #[test]
    fn test_to_u64_and_bits() {
        let f = field();
        let a = f.from_u64(170);
        assert_eq!(a.to_u64(), Some(170));
        let bits: Vec<bool> = (0..8).map(|i| a.bit(i)).collect();
        assert_eq!(
            bits,
            vec![false, true, false, true, false, true, false, true]
        );
    }
}
