//! Sparse linear constraints of the spend circuit.
//!
//! A constraint row `i` states
//!
//! ```text
//! sum_cells (A * wA_i + B * wB_i + C * wC_i) == K[i]   (mod q)
//! ```
//!
//! Every row touches at most two wires, so rows are stored as lists of
//! `(wire, cell, coefficient)` terms instead of dense M×N matrices.
//!
//! | rows               | relation                                      |
//! |--------------------|-----------------------------------------------|
//! | `[0, S)`           | `A_i - B_i = 1`                               |
//! | `[S, 2S)`          | `C_i = 0` on bit wires                        |
//! | `[2S, 3S - 1)`     | `(h^{2^{k+1}} - 1) A_{k+1} - B_{S+k} = -1`    |
//! | `3S - 1`           | `A_S + (1 - h) B_0 = h`                       |
//! | `[3S, 4S - 2)`     | `A_{S+k+1} - C_{S+k} = 0`, last link `* g^S`  |
//! | `4S - 2`           | selects the final wire for external binding   |

use coin::{CircuitDimensions, GroupParameters};
use field::FieldElement;

use crate::errors::CircuitError;
use crate::layout::{Cell, CircuitLayout};
use crate::wires::WireAssignment;

/// One of the three wire matrices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Wire {
    A,
    B,
    C,
}

/// The family a constraint row belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    BitComplement,
    BitProduct,
    SelectorRecurrence,
    AccumulatorAnchor,
    ProductChain,
    FinalBinding,
}

/// A nonzero coefficient of a constraint row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub wire: Wire,
    pub cell: Cell,
    pub coefficient: FieldElement,
    /// When set, the coefficient is multiplied by `g^S` once the system is
    /// bound to a spend's serial number.
    pub serial_scaled: bool,
}

impl Term {
    fn new(wire: Wire, cell: Cell, coefficient: FieldElement) -> Self {
        Self {
            wire,
            cell,
            coefficient,
            serial_scaled: false,
        }
    }

    fn scaled_by_serial(mut self) -> Self {
        self.serial_scaled = true;
        self
    }
}

/// A sparse constraint row and its constant `K[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintRow {
    kind: ConstraintKind,
    terms: Vec<Term>,
    constant: FieldElement,
}

impl ConstraintRow {
    fn new(kind: ConstraintKind, terms: Vec<Term>, constant: FieldElement) -> Self {
        let terms = terms
            .into_iter()
            .filter(|term| !term.coefficient.is_zero())
            .collect();
        Self {
            kind,
            terms,
            constant,
        }
    }

    #[inline]
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The terms on one wire matrix: the sparse form of `wA_i`, `wB_i` or `wC_i`.
    pub fn terms_on(&self, wire: Wire) -> impl Iterator<Item = &Term> + '_ {
        self.terms.iter().filter(move |term| term.wire == wire)
    }

    #[inline]
    pub fn constant(&self) -> &FieldElement {
        &self.constant
    }
}

/// Witness-independent constraint rows for one parameter set.
///
/// Built once and shared read-only across every spend using the same
/// parameters; [`ConstraintSystem::bind`] attaches a spend's serial number
/// without copying the rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSystem {
    dimensions: CircuitDimensions,
    layout: CircuitLayout,
    g: FieldElement,
    h: FieldElement,
    rows: Vec<ConstraintRow>,
}

impl ConstraintSystem {
    /// Builds the `4S - 1` constraint rows from the parameters alone.
    #[tracing::instrument(skip_all, name = "ConstraintSystem::build")]
    pub fn build(params: &GroupParameters) -> Result<Self, CircuitError> {
        let layout = CircuitLayout::new(params.dimensions())?;
        let s = layout.serial_size();
        let field = params.field();
        let zero = field.zero();
        let one = field.one();
        let neg_one = -&one;
        let h = params.h();

        let mut rows = Vec::with_capacity(layout.constraint_count());

        for k in 0..s {
            let cell = layout.bit_cell(k);
            rows.push(ConstraintRow::new(
                ConstraintKind::BitComplement,
                vec![
                    Term::new(Wire::A, cell, one.clone()),
                    Term::new(Wire::B, cell, neg_one.clone()),
                ],
                one.clone(),
            ));
        }

        for k in 0..s {
            rows.push(ConstraintRow::new(
                ConstraintKind::BitProduct,
                vec![Term::new(Wire::C, layout.bit_cell(k), one.clone())],
                zero.clone(),
            ));
        }

        // B at step k is the selector of bit k + 1.
        let mut h_power = h.clone();
        for k in 0..s - 1 {
            h_power = h_power.square();
            rows.push(ConstraintRow::new(
                ConstraintKind::SelectorRecurrence,
                vec![
                    Term::new(Wire::A, layout.bit_cell(k + 1), &h_power - &one),
                    Term::new(Wire::B, layout.accumulator_cell(k), neg_one.clone()),
                ],
                neg_one.clone(),
            ));
        }

        // A at step 0 is the selector of bit 0, written through B_0 = bit_0 - 1.
        rows.push(ConstraintRow::new(
            ConstraintKind::AccumulatorAnchor,
            vec![
                Term::new(Wire::A, layout.accumulator_cell(0), one.clone()),
                Term::new(Wire::B, layout.bit_cell(0), &one - h),
            ],
            h.clone(),
        ));

        for k in 0..s - 2 {
            let mut link = Term::new(Wire::C, layout.accumulator_cell(k), neg_one.clone());
            if k + 1 == layout.final_step() {
                link = link.scaled_by_serial();
            }
            rows.push(ConstraintRow::new(
                ConstraintKind::ProductChain,
                vec![
                    Term::new(Wire::A, layout.accumulator_cell(k + 1), one.clone()),
                    link,
                ],
                zero.clone(),
            ));
        }

        rows.push(ConstraintRow::new(
            ConstraintKind::FinalBinding,
            vec![Term::new(Wire::C, layout.final_cell(), one.clone())],
            zero,
        ));

        debug_assert_eq!(rows.len(), layout.constraint_count());
        tracing::debug!(
            rows = rows.len(),
            nonzero = rows.iter().map(|row| row.terms.len()).sum::<usize>(),
            "built spend constraint system"
        );

        Ok(Self {
            dimensions: *params.dimensions(),
            layout,
            g: params.g().clone(),
            h: h.clone(),
            rows,
        })
    }

    #[inline]
    pub fn layout(&self) -> &CircuitLayout {
        &self.layout
    }

    #[inline]
    pub fn dimensions(&self) -> &CircuitDimensions {
        &self.dimensions
    }

    /// All rows, including the final binding row.
    #[inline]
    pub fn rows(&self) -> &[ConstraintRow] {
        &self.rows
    }

    /// Rows checked one by one and folded into the aggregated identity.
    #[inline]
    pub fn checked_rows(&self) -> &[ConstraintRow] {
        &self.rows[..self.layout.checked_constraint_count()]
    }

    /// The row selecting the final wire for the proof layer's binding.
    #[inline]
    pub fn binding_row(&self) -> &ConstraintRow {
        &self.rows[self.layout.checked_constraint_count()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of stored nonzero coefficients.
    pub fn nonzero_count(&self) -> usize {
        self.rows.iter().map(|row| row.terms.len()).sum()
    }

    /// True when this system was built from `params`.
    pub fn matches(&self, params: &GroupParameters) -> bool {
        self.dimensions == *params.dimensions() && self.g == *params.g() && self.h == *params.h()
    }

    /// Attaches a spend's public serial number.
    pub fn bind(&self, serial: &FieldElement) -> BoundConstraints<'_> {
        BoundConstraints {
            system: self,
            serial_power: self.g.pow(serial.value()),
        }
    }
}

/// A constraint system specialised to one serial number.
#[derive(Clone, Debug)]
pub struct BoundConstraints<'a> {
    system: &'a ConstraintSystem,
    serial_power: FieldElement,
}

impl<'a> BoundConstraints<'a> {
    #[inline]
    pub fn system(&self) -> &'a ConstraintSystem {
        self.system
    }

    #[inline]
    pub fn layout(&self) -> &'a CircuitLayout {
        &self.system.layout
    }

    /// `g^S` for the bound serial number.
    #[inline]
    pub fn serial_power(&self) -> &FieldElement {
        &self.serial_power
    }

    /// Effective coefficient of `term` for this spend.
    pub fn coefficient(&self, term: &Term) -> FieldElement {
        if term.serial_scaled {
            &term.coefficient * &self.serial_power
        } else {
            term.coefficient.clone()
        }
    }

    /// `sum (A * wA_i + B * wB_i + C * wC_i)` for row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or the wires come from a different
    /// layout.
    pub fn evaluate(&self, index: usize, wires: &WireAssignment) -> FieldElement {
        let row = &self.system.rows[index];
        row.terms.iter().fold(row.constant.zero_like(), |acc, term| {
            acc + self.coefficient(term) * &wires.matrix(term.wire)[term.cell]
        })
    }

    #[inline]
    pub fn constant(&self, index: usize) -> &FieldElement {
        &self.system.rows[index].constant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coin::PrivateCoin;
    use field::BigUint;

    fn params() -> GroupParameters {
        GroupParameters::new(
            BigUint::from(1_000_003u32),
            BigUint::from(2u32),
            BigUint::from(3u32),
            CircuitDimensions {
                columns: 4,
                rows: 4,
                serial_size: 8,
                pads: 2,
            },
        )
        .expect("params")
    }

    #[test]
    fn test_row_families() {
        let system = ConstraintSystem::build(&params()).expect("build");
        assert_eq!(system.len(), 31);
        let kinds: Vec<ConstraintKind> = system.rows().iter().map(|row| row.kind()).collect();
        assert!(kinds[..8].iter().all(|k| *k == ConstraintKind::BitComplement));
        assert!(kinds[8..16].iter().all(|k| *k == ConstraintKind::BitProduct));
        assert!(kinds[16..23].iter().all(|k| *k == ConstraintKind::SelectorRecurrence));
        assert_eq!(kinds[23], ConstraintKind::AccumulatorAnchor);
        assert!(kinds[24..30].iter().all(|k| *k == ConstraintKind::ProductChain));
        assert_eq!(kinds[30], ConstraintKind::FinalBinding);
        assert_eq!(system.checked_rows().len(), 30);
        assert_eq!(system.binding_row().kind(), ConstraintKind::FinalBinding);
    }

    #[test]
    fn test_rows_are_sparse() {
        let system = ConstraintSystem::build(&params()).expect("build");
        assert!(system.rows().iter().all(|row| row.terms().len() <= 2));
        assert_eq!(system.nonzero_count(), 8 * 2 + 8 + 7 * 2 + 2 + 6 * 2 + 1);
    }

    #[test]
    fn test_only_last_link_is_serial_scaled() {
        let system = ConstraintSystem::build(&params()).expect("build");
        let scaled: Vec<usize> = system
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.terms().iter().any(|t| t.serial_scaled))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(scaled, vec![29]);
    }

    #[test]
    fn test_selector_coefficients() {
        let params = params();
        let system = ConstraintSystem::build(&params).expect("build");
        let f = params.field();
        for k in 0..7usize {
            let row = &system.rows()[16 + k];
            let a: Vec<&Term> = row.terms_on(Wire::A).collect();
            assert_eq!(a.len(), 1);
            assert_eq!(a[0].cell, system.layout().bit_cell(k + 1));
            let expected = params.h().pow_u64(1u64 << (k + 1)) - f.one();
            assert_eq!(a[0].coefficient, expected);
            assert_eq!(row.constant(), &f.from_i64(-1));
        }
    }

    #[test]
    fn test_honest_rows_hold() {
        let params = params();
        let f = params.field();
        let system = ConstraintSystem::build(&params).expect("build");
        let coin = PrivateCoin::new(&params, f.from_u64(5), f.from_u64(170)).expect("coin");
        let wires = WireAssignment::assign(&coin, &params).expect("assign");
        let bound = system.bind(&f.from_u64(5));
        for i in 0..system.checked_rows().len() {
            assert_eq!(bound.evaluate(i, &wires), *bound.constant(i), "row {i}");
        }
    }

    #[test]
    fn test_wrong_serial_breaks_last_link() {
        let params = params();
        let f = params.field();
        let system = ConstraintSystem::build(&params).expect("build");
        let coin = PrivateCoin::new(&params, f.from_u64(5), f.from_u64(170)).expect("coin");
        let wires = WireAssignment::assign(&coin, &params).expect("assign");
        let bound = system.bind(&f.from_u64(6));
        assert_ne!(bound.evaluate(29, &wires), *bound.constant(29));
        assert_eq!(bound.evaluate(28, &wires), *bound.constant(28));
    }

    #[test]
    fn test_matches_parameters() {
        let params = params();
        let system = ConstraintSystem::build(&params).expect("build");
        assert!(system.matches(&params));
        let other = GroupParameters::new(
            BigUint::from(1_000_003u32),
            BigUint::from(2u32),
            BigUint::from(5u32),
            *params.dimensions(),
        )
        .expect("params");
        assert!(!system.matches(&other));
    }
}
