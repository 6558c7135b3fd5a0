//! Witness wire values: the matrices A, B and C.

use coin::{CoinWitness, GroupParameters};
use field::FieldElement;

use crate::constraints::Wire;
use crate::errors::CircuitError;
use crate::layout::{Cell, CircuitLayout, Matrix};

/// The three M×N wire matrices of one spend.
///
/// Once assigned, `A[i][j] * B[i][j] == C[i][j]` holds for every cell and
/// the final wire of C is the coin commitment `g^S * h^r`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireAssignment {
    layout: CircuitLayout,
    a: Matrix<FieldElement>,
    b: Matrix<FieldElement>,
    c: Matrix<FieldElement>,
}

impl WireAssignment {
    /// Fills the wires for `witness`.
    ///
    /// Bit phase, `i < S`: `A = bit_i`, `B = bit_i - 1`, `C = 0`. The
    /// Hadamard product `bit * (bit - 1)` is zero exactly for boolean bits.
    ///
    /// Accumulation phase, step `k < S - 1` at wire `S + k`: `A` is the
    /// running product of selectors `0..=k`, `B` is selector `k + 1` and
    /// `C = A * B`. The final step also multiplies `A` (and so `C`) by `g^S`.
    ///
    /// Fails before any arithmetic if the parameters cannot hold the circuit
    /// or the randomness is wider than the bit budget.
    #[tracing::instrument(skip_all, name = "WireAssignment::assign")]
    pub fn assign<W: CoinWitness + ?Sized>(
        witness: &W,
        params: &GroupParameters,
    ) -> Result<Self, CircuitError> {
        let layout = CircuitLayout::new(params.dimensions())?;
        let serial_size = layout.serial_size();
        let bits_used = witness.randomness().value().bits();
        if bits_used > serial_size as u64 {
            return Err(CircuitError::RandomnessTooWide {
                bits: bits_used,
                serial_size,
            });
        }

        let mut bits = vec![false; serial_size];
        witness.randomness_bits(&mut bits);

        let field = params.field();
        let zero = field.zero();
        let one = field.one();
        let mut a = layout.matrix(zero.clone());
        let mut b = layout.matrix(zero.clone());
        let mut c = layout.matrix(zero.clone());

        for (k, &bit) in bits.iter().enumerate() {
            let cell = layout.bit_cell(k);
            let value = if bit { one.clone() } else { zero.clone() };
            b[cell] = &value - &one;
            a[cell] = value;
        }

        let serial_power = params.g().pow(witness.serial_number().value());
        let mut h_power = params.h().clone();
        let mut next = selector(bits[0], &h_power, &one);
        let mut product = one.clone();

        for k in 0..serial_size - 1 {
            product *= &next;
            h_power = h_power.square();
            next = selector(bits[k + 1], &h_power, &one);

            let cell = layout.accumulator_cell(k);
            let mut left = product.clone();
            if k == layout.final_step() {
                left *= &serial_power;
            }
            c[cell] = &left * &next;
            a[cell] = left;
            b[cell] = next.clone();
        }

        tracing::debug!(
            rows = layout.rows(),
            columns = layout.columns(),
            wires = layout.wire_count(),
            "assigned spend wires"
        );

        Ok(Self { layout, a, b, c })
    }

    #[inline]
    pub fn layout(&self) -> &CircuitLayout {
        &self.layout
    }

    #[inline]
    pub fn a(&self) -> &Matrix<FieldElement> {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &Matrix<FieldElement> {
        &self.b
    }

    #[inline]
    pub fn c(&self) -> &Matrix<FieldElement> {
        &self.c
    }

    #[inline]
    pub fn matrix(&self, wire: Wire) -> &Matrix<FieldElement> {
        match wire {
            Wire::A => &self.a,
            Wire::B => &self.b,
            Wire::C => &self.c,
        }
    }

    /// The value of wire `wire` at `cell`, or `None` outside the matrix.
    #[inline]
    pub fn value(&self, wire: Wire, cell: Cell) -> Option<&FieldElement> {
        self.matrix(wire).get(cell)
    }

    /// Overwrites a single wire value.
    ///
    /// Used by fault-injection tests and by callers that rebuild a circuit
    /// from received values; the result is not re-validated here.
    pub fn set(
        &mut self,
        wire: Wire,
        cell: Cell,
        value: FieldElement,
    ) -> Result<(), CircuitError> {
        let matrix = match wire {
            Wire::A => &mut self.a,
            Wire::B => &mut self.b,
            Wire::C => &mut self.c,
        };
        matrix.set(cell, value)
    }

    /// The C wire that must equal `g^S * h^r`.
    #[inline]
    pub fn final_wire(&self) -> &FieldElement {
        &self.c[self.layout.final_cell()]
    }
}

/// `bit * (h^{2^j} - 1) + 1`, which is `h^{2^j}` for a set bit and 1 otherwise.
#[inline]
fn selector(bit: bool, h_power: &FieldElement, one: &FieldElement) -> FieldElement {
    if bit {
        h_power.clone()
    } else {
        one.clone()
    }
}
