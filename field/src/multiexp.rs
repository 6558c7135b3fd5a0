use num_bigint::BigUint;

use crate::FieldElement;

/// Compute `g^a * h^b` with a single shared squaring chain (Shamir's trick).
///
/// This is the commitment-opening operation `g^S * h^r`. The two exponents
/// are scanned together from the most significant bit, multiplying in `g`,
/// `h` or the precomputed `g * h` as the bit pair dictates.
pub fn double_exp(g: &FieldElement, a: &BigUint, h: &FieldElement, b: &BigUint) -> FieldElement {
    let gh = g * h;
    let mut result = g.one_like();

    for bit in (0..a.bits().max(b.bits())).rev() {
        result = result.square();
        match (a.bit(bit), b.bit(bit)) {
            (true, true) => result *= &gh,
            (true, false) => result *= g,
            (false, true) => result *= h,
            (false, false) => {}
        }
    }

    result
}
