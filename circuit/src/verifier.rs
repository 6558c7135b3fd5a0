//! Deterministic validation of an assigned circuit.
//!
//! Four families are checked in order and the first failure is reported:
//! Hadamard products, the commitment binding, every checked linear row and
//! finally the challenge-aggregated identity.

use field::FieldElement;

use crate::aggregation::AggregationState;
use crate::constraints::BoundConstraints;
use crate::errors::CheckError;
use crate::wires::WireAssignment;

/// `A[i][j] * B[i][j] == C[i][j]` for every cell, in row-major order.
pub fn check_hadamard(wires: &WireAssignment) -> Result<(), CheckError> {
    let (a, b) = (wires.a(), wires.b());
    for (cell, c) in wires.c().cells() {
        if &a[cell] * &b[cell] != *c {
            return Err(CheckError::Hadamard {
                row: cell.row,
                col: cell.col,
            });
        }
    }
    Ok(())
}

/// The final wire equals the witness commitment `g^S * h^r`.
pub fn check_commitment(
    wires: &WireAssignment,
    commitment: &FieldElement,
) -> Result<(), CheckError> {
    let cell = wires.layout().final_cell();
    if wires.final_wire() != commitment {
        return Err(CheckError::CommitmentBinding {
            row: cell.row,
            col: cell.col,
        });
    }
    Ok(())
}

/// Every checked row evaluates to its constant.
pub fn check_linear(
    constraints: &BoundConstraints<'_>,
    wires: &WireAssignment,
) -> Result<(), CheckError> {
    for index in 0..constraints.system().checked_rows().len() {
        if constraints.evaluate(index, wires) != *constraints.constant(index) {
            return Err(CheckError::LinearConstraint { index });
        }
    }
    Ok(())
}

/// `sum_m y^{m+1} * <A_m o B_m, YDash>`.
pub fn hadamard_fold(wires: &WireAssignment, aggregation: &AggregationState) -> FieldElement {
    let powers = aggregation.powers();
    let y_dash = aggregation.y_dash();
    let (a, b) = (wires.a(), wires.b());
    let mut total = powers[0].zero_like();
    for m in 0..a.rows() {
        let inner = a
            .row(m)
            .iter()
            .zip(b.row(m))
            .zip(y_dash)
            .fold(total.zero_like(), |acc, ((a, b), d)| acc + a * b * d);
        total += &powers[m + 1] * &inner;
    }
    total
}

/// `<A, wAj> + <B, wBj> + <C, wCj>` over every row of the matrices.
fn linear_fold(wires: &WireAssignment, aggregation: &AggregationState) -> FieldElement {
    let polynomials = aggregation.polynomials();
    [
        (wires.a(), &polynomials.a),
        (wires.b(), &polynomials.b),
        (wires.c(), &polynomials.c),
    ]
    .into_iter()
    .flat_map(|(values, weights)| {
        values
            .cells()
            .map(move |(cell, value)| value * &weights[cell])
    })
    .fold(aggregation.k_const().zero_like(), |acc, term| acc + term)
}

/// The aggregated identity holds for this challenge.
pub fn check_aggregated(
    wires: &WireAssignment,
    aggregation: &AggregationState,
) -> Result<(), CheckError> {
    let lhs = hadamard_fold(wires, aggregation) + linear_fold(wires, aggregation);
    if lhs != *aggregation.k_const() {
        return Err(CheckError::AggregatedIdentity);
    }
    Ok(())
}

/// Runs all four families in order.
#[tracing::instrument(skip_all, name = "verifier::check")]
pub fn check(
    constraints: &BoundConstraints<'_>,
    wires: &WireAssignment,
    commitment: &FieldElement,
    aggregation: &AggregationState,
) -> Result<(), CheckError> {
    check_hadamard(wires)?;
    check_commitment(wires, commitment)?;
    check_linear(constraints, wires)?;
    check_aggregated(wires, aggregation)
}
