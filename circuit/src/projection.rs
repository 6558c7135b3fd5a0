//! Column-wise views of the sparse constraint rows.
//!
//! The proof layer commits to one wire row at a time, so it wants, for every
//! column, the constraints touching that column and their coefficients.

use field::FieldElement;

use crate::constraints::{ConstraintSystem, Wire};

/// A constraint touching a given wire cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectionEntry {
    /// Index of the constraint row.
    pub constraint: usize,
    /// Template coefficient, before any serial binding.
    pub coefficient: FieldElement,
}

/// For each column `k < N`, the constraints touching that column.
pub type ColumnProjection = Vec<Vec<ProjectionEntry>>;

/// Projects every constraint onto wire row `row` of `wire`.
///
/// Entries within a column are ordered by constraint index.
pub fn project_row(system: &ConstraintSystem, wire: Wire, row: usize) -> ColumnProjection {
    let mut columns: ColumnProjection = vec![Vec::new(); system.layout().columns()];
    for (constraint, constraint_row) in system.rows().iter().enumerate() {
        for term in constraint_row.terms_on(wire) {
            if term.cell.row == row {
                columns[term.cell.col].push(ProjectionEntry {
                    constraint,
                    coefficient: term.coefficient.clone(),
                });
            }
        }
    }
    columns
}

/// Projections of all three wire matrices onto one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireProjections {
    pub a: ColumnProjection,
    pub b: ColumnProjection,
    pub c: ColumnProjection,
}

impl WireProjections {
    fn for_row(system: &ConstraintSystem, row: usize) -> Self {
        Self {
            a: project_row(system, Wire::A, row),
            b: project_row(system, Wire::B, row),
            c: project_row(system, Wire::C, row),
        }
    }

    #[inline]
    pub fn get(&self, wire: Wire) -> &ColumnProjection {
        match wire {
            Wire::A => &self.a,
            Wire::B => &self.b,
            Wire::C => &self.c,
        }
    }
}

/// The two projections handed to the proof layer.
///
/// `second` is filled from the row-0 projection, so both slots are equal.
/// Use [`project_row`] directly for any other row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseProjections {
    pub first: WireProjections,
    pub second: WireProjections,
}

impl SparseProjections {
    #[tracing::instrument(skip_all, name = "SparseProjections::build")]
    pub fn build(system: &ConstraintSystem) -> Self {
        let first = WireProjections::for_row(system, 0);
        Self {
            second: first.clone(),
            first,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coin::{CircuitDimensions, GroupParameters};
    use field::BigUint;

    fn system(rows: usize) -> (GroupParameters, ConstraintSystem) {
        let params = GroupParameters::new(
            BigUint::from(1_000_003u32),
            BigUint::from(2u32),
            BigUint::from(3u32),
            CircuitDimensions {
                columns: 4,
                rows,
                serial_size: 8,
                pads: 2,
            },
        )
        .expect("params");
        let system = ConstraintSystem::build(&params).expect("build");
        (params, system)
    }

    fn indices(column: &[ProjectionEntry]) -> Vec<usize> {
        column.iter().map(|entry| entry.constraint).collect()
    }

    #[test]
    fn test_row_zero_projection() {
        let (params, system) = system(4);
        let f = params.field();
        let a = project_row(&system, Wire::A, 0);
        assert_eq!(a.len(), 4);
        assert_eq!(indices(&a[0]), vec![0]);
        assert_eq!(indices(&a[1]), vec![1, 16]);
        assert_eq!(indices(&a[3]), vec![3, 18]);
        assert_eq!(a[1][1].coefficient, params.h().pow_u64(2) - f.one());

        let b = project_row(&system, Wire::B, 0);
        // B_0 also appears in the anchor row.
        assert_eq!(indices(&b[0]), vec![0, 23]);
        assert_eq!(b[0][1].coefficient, f.one() - params.h());

        let c = project_row(&system, Wire::C, 0);
        assert_eq!(indices(&c[2]), vec![10]);
    }

    #[test]
    fn test_second_projection_mirrors_first() {
        let (_, system) = system(4);
        let projections = SparseProjections::build(&system);
        assert_eq!(projections.first, projections.second);
        assert_eq!(projections.first.get(Wire::B), &project_row(&system, Wire::B, 0));
    }

    #[test]
    fn test_row_one_differs_from_row_zero() {
        let (_, system) = system(4);
        let projections = SparseProjections::build(&system);
        let row_one = project_row(&system, Wire::A, 1);
        assert_ne!(projections.second.a, row_one);
        assert_eq!(indices(&row_one[0]), vec![4, 19]);
    }

    #[test]
    fn test_final_wire_projection() {
        let (_, system) = system(4);
        let final_cell = system.layout().final_cell();
        let c = project_row(&system, Wire::C, final_cell.row);
        // Only the binding row reads the final C wire.
        assert_eq!(indices(&c[final_cell.col]), vec![30]);
    }
}
