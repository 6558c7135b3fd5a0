//! Challenge-driven aggregation of all circuit constraints.
//!
//! Given a challenge `y`, every Hadamard cell and every checked linear row is
//! assigned its own power of `y`:
//!
//! ```text
//! Hadamard cell (m, col)   y^{m+1} * YDash[col] = y^{m+1 + M(col+1)}   exponents in [M+1, M(N+1)]
//! linear row i             y^{offset + i}, offset = M(N+1) + 1
//! ```
//!
//! The identity
//!
//! ```text
//! sum_m y^{m+1} <A_m o B_m, YDash> + sum_m (<A_m, wAj_m> + <B_m, wBj_m> + <C_m, wCj_m>) == Kconst
//! ```
//!
//! then holds for every `y` iff all constraints hold, and a violating
//! witness passes for at most `offset + 4S - 3` values of `y`.

use field::FieldElement;

use crate::constraints::{BoundConstraints, Wire};
use crate::errors::CircuitError;
use crate::layout::{Cell, CircuitLayout, Matrix};

/// Where each group of constraints takes its powers of `y` from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PowerLayout {
    /// First exponent used for linear rows.
    pub constraint_offset: usize,
    /// Length of the power table, `y^0 ..= y^{count - 1}`.
    pub count: usize,
}

impl PowerLayout {
    pub fn new(layout: &CircuitLayout) -> Self {
        let constraint_offset = layout.rows() * (layout.columns() + 1) + 1;
        Self {
            constraint_offset,
            count: constraint_offset + layout.checked_constraint_count(),
        }
    }
}

/// `[1, y, y^2, ..., y^{count-1}]`, one multiplication per entry.
pub fn derive_powers(y: &FieldElement, count: usize) -> Vec<FieldElement> {
    let mut powers = Vec::with_capacity(count);
    let mut current = y.one_like();
    for _ in 0..count {
        let next = &current * y;
        powers.push(current);
        current = next;
    }
    powers
}

/// `[y^{-M}, y^{-2M}, ..., y^{-count*M}]`.
///
/// Uses the explicit field inverse; a zero challenge is rejected.
pub fn derive_negative_powers(
    y: &FieldElement,
    rows: usize,
    count: usize,
) -> Result<Vec<FieldElement>, CircuitError> {
    let step = y
        .inverse()
        .ok_or(CircuitError::DegenerateChallenge)?
        .pow_u64(rows as u64);
    let mut powers = Vec::with_capacity(count);
    let mut current = step.clone();
    for _ in 0..count {
        let next = &current * &step;
        powers.push(current);
        current = next;
    }
    Ok(powers)
}

/// `YDash[col] = y^{M(col+1)}` for `col < N`.
///
/// # Panics
///
/// Panics if `powers` has no entry `y^{M*N}`.
pub fn select_y_dash(powers: &[FieldElement], rows: usize, columns: usize) -> Vec<FieldElement> {
    assert!(
        powers.len() > rows * columns,
        "power table too short for YDash"
    );
    (0..columns)
        .map(|col| powers[rows * (col + 1)].clone())
        .collect()
}

/// The aggregated per-row weight vectors `wAj`, `wBj`, `wCj`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WirePolynomials {
    pub a: Matrix<FieldElement>,
    pub b: Matrix<FieldElement>,
    pub c: Matrix<FieldElement>,
}

impl WirePolynomials {
    #[inline]
    pub fn matrix(&self, wire: Wire) -> &Matrix<FieldElement> {
        match wire {
            Wire::A => &self.a,
            Wire::B => &self.b,
            Wire::C => &self.c,
        }
    }
}

/// Folds every checked row into dense M×N weights.
///
/// `wXj[m][col] = sum_i wX_i[m][col] * y^{offset+i}`. The C weights also
/// carry `-y^{m+1} * YDash[col]`, which cancels the Hadamard fold on an
/// honest assignment.
pub fn aggregate_linear(
    constraints: &BoundConstraints<'_>,
    powers: &[FieldElement],
    y_dash: &[FieldElement],
    offset: usize,
) -> WirePolynomials {
    let layout = constraints.layout();
    let zero = powers[0].zero_like();
    let mut a = layout.matrix(zero.clone());
    let mut b = layout.matrix(zero.clone());
    let mut c = layout.matrix(zero);

    for m in 0..layout.rows() {
        for (col, y_dash_col) in y_dash.iter().enumerate() {
            let cell = Cell { row: m, col };
            c[cell] = -(&powers[m + 1] * y_dash_col);
        }
    }

    for (i, row) in constraints.system().checked_rows().iter().enumerate() {
        let weight = &powers[offset + i];
        for term in row.terms() {
            let target = match term.wire {
                Wire::A => &mut a,
                Wire::B => &mut b,
                Wire::C => &mut c,
            };
            target[term.cell] += constraints.coefficient(term) * weight;
        }
    }

    WirePolynomials { a, b, c }
}

/// `Kconst = sum_i K[i] * y^{offset+i}`.
pub fn aggregate_constant<'a, I>(
    constants: I,
    powers: &[FieldElement],
    offset: usize,
) -> FieldElement
where
    I: IntoIterator<Item = &'a FieldElement>,
{
    constants
        .into_iter()
        .enumerate()
        .fold(powers[0].zero_like(), |acc, (i, k)| acc + k * &powers[offset + i])
}

/// Everything derived from one challenge for one spend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregationState {
    challenge: FieldElement,
    power_layout: PowerLayout,
    powers: Vec<FieldElement>,
    y_dash: Vec<FieldElement>,
    negative_powers: Vec<FieldElement>,
    polynomials: WirePolynomials,
    k_const: FieldElement,
}

impl AggregationState {
    /// Derives powers, `YDash`, negative powers, wire polynomials and
    /// `Kconst` for challenge `y`.
    #[tracing::instrument(skip_all, name = "AggregationState::new")]
    pub fn new(
        challenge: FieldElement,
        constraints: &BoundConstraints<'_>,
        pads: usize,
    ) -> Result<Self, CircuitError> {
        if !challenge.same_field(constraints.serial_power()) {
            return Err(CircuitError::ForeignChallenge);
        }
        let layout = constraints.layout();
        let power_layout = PowerLayout::new(layout);

        let negative_powers =
            derive_negative_powers(&challenge, layout.rows(), layout.columns() + pads)?;
        let powers = derive_powers(&challenge, power_layout.count);
        let y_dash = select_y_dash(&powers, layout.rows(), layout.columns());
        let polynomials =
            aggregate_linear(constraints, &powers, &y_dash, power_layout.constraint_offset);
        let k_const = aggregate_constant(
            constraints
                .system()
                .checked_rows()
                .iter()
                .map(|row| row.constant()),
            &powers,
            power_layout.constraint_offset,
        );

        tracing::debug!(powers = powers.len(), "aggregated spend constraints");

        Ok(Self {
            challenge,
            power_layout,
            powers,
            y_dash,
            negative_powers,
            polynomials,
            k_const,
        })
    }

    #[inline]
    pub fn challenge(&self) -> &FieldElement {
        &self.challenge
    }

    #[inline]
    pub fn power_layout(&self) -> &PowerLayout {
        &self.power_layout
    }

    /// `y^0 ..= y^{count-1}`.
    #[inline]
    pub fn powers(&self) -> &[FieldElement] {
        &self.powers
    }

    #[inline]
    pub fn y_dash(&self) -> &[FieldElement] {
        &self.y_dash
    }

    /// `y^{-M(k+1)}` for `k < N + PADS`.
    #[inline]
    pub fn negative_powers(&self) -> &[FieldElement] {
        &self.negative_powers
    }

    #[inline]
    pub fn polynomials(&self) -> &WirePolynomials {
        &self.polynomials
    }

    #[inline]
    pub fn k_const(&self) -> &FieldElement {
        &self.k_const
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field::{BigUint, PrimeField};

    fn field() -> PrimeField {
        PrimeField::new(BigUint::from(1_000_003u32)).expect("prime")
    }

    #[test]
    fn test_powers_are_iterated() {
        let f = field();
        let y = f.from_u64(777);
        let powers = derive_powers(&y, 60);
        assert_eq!(powers.len(), 60);
        for (k, p) in powers.iter().enumerate() {
            assert_eq!(*p, y.pow_u64(k as u64));
        }
        assert!(derive_powers(&y, 0).is_empty());
    }

    #[test]
    fn test_negative_powers_invert_y_dash() {
        let f = field();
        let y = f.from_u64(4242);
        let (rows, columns) = (4, 4);
        let powers = derive_powers(&y, rows * (columns + 1) + 1);
        let y_dash = select_y_dash(&powers, rows, columns);
        let negative = derive_negative_powers(&y, rows, columns + 2).expect("nonzero");
        assert_eq!(negative.len(), 6);
        for (col, d) in y_dash.iter().enumerate() {
            assert_eq!(d * &negative[col], f.one());
        }
        assert_eq!(&negative[5] * &y.pow_u64(24), f.one());
    }

    #[test]
    fn test_zero_challenge_rejected() {
        let f = field();
        assert_eq!(
            derive_negative_powers(&f.zero(), 4, 6),
            Err(CircuitError::DegenerateChallenge)
        );
    }

    #[test]
    fn test_y_dash_selects_multiples_of_rows() {
        let f = field();
        let y = f.from_u64(3);
        let powers = derive_powers(&y, 21);
        let y_dash = select_y_dash(&powers, 4, 4);
        let expected: Vec<FieldElement> =
            [4u64, 8, 12, 16].iter().map(|e| y.pow_u64(*e)).collect();
        assert_eq!(y_dash, expected);
    }

    #[test]
    fn test_aggregate_constant_uses_offset() {
        let f = field();
        let y = f.from_u64(10);
        let powers = derive_powers(&y, 10);
        let constants = [f.from_u64(1), f.from_u64(2), f.from_u64(3)];
        let k = aggregate_constant(constants.iter(), &powers, 5);
        assert_eq!(k, f.from_u64(100_000 + 2 * 1_000_000 + 3 * 10_000_000));
    }

    #[test]
    fn test_power_layout_separates_families() {
        let layout = CircuitLayout::new(&coin::CircuitDimensions {
            columns: 4,
            rows: 4,
            serial_size: 8,
            pads: 2,
        })
        .expect("fits");
        let powers = PowerLayout::new(&layout);
        // Largest Hadamard exponent is M + M*N.
        assert!(powers.constraint_offset > 4 + 4 * 4);
        assert_eq!(powers.constraint_offset, 21);
        assert_eq!(powers.count, 21 + 30);
    }
}
