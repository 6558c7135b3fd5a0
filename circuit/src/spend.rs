//! Checking whole spends, one at a time or as a parallel batch.

use coin::{CoinWitness, GroupParameters};
use field::FieldElement;
use rayon::prelude::*;

use crate::circuit::ArithmeticCircuit;
use crate::constraints::ConstraintSystem;
use crate::errors::{CheckError, CircuitError};

/// Why a spend was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpendError {
    /// The circuit could not be built or aggregated.
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    /// The circuit was built but failed validation.
    #[error(transparent)]
    Check(#[from] CheckError),
}

/// A witness together with the challenge it is checked under.
#[derive(Clone, Debug)]
pub struct Spend<W> {
    pub witness: W,
    pub challenge: FieldElement,
}

/// Builds the circuit for one spend, aggregates under `challenge` and checks it.
pub fn check_spend<W: CoinWitness + ?Sized>(
    params: &GroupParameters,
    system: &ConstraintSystem,
    witness: &W,
    challenge: FieldElement,
) -> Result<(), SpendError> {
    ArithmeticCircuit::new(params, system, witness)?.check_with_challenge(challenge)
}

/// Checks independent spends in parallel, one rayon task per spend.
///
/// Results are returned in input order.
#[tracing::instrument(skip_all, name = "check_spends", fields(spends = spends.len()))]
pub fn check_spends<W: CoinWitness + Sync>(
    params: &GroupParameters,
    system: &ConstraintSystem,
    spends: &[Spend<W>],
) -> Vec<Result<(), SpendError>> {
    spends
        .par_iter()
        .enumerate()
        .map(|(index, spend)| {
            let result = check_spend(params, system, &spend.witness, spend.challenge.clone());
            if let Err(err) = &result {
                tracing::warn!(index, %err, "spend rejected");
            }
            result
        })
        .collect()
}
