//! The arithmetic circuit of one spend.

use coin::{CoinWitness, GroupParameters};
use field::FieldElement;

use crate::aggregation::AggregationState;
use crate::constraints::{BoundConstraints, ConstraintSystem};
use crate::errors::{CheckError, CircuitError};
use crate::wires::WireAssignment;

/// Wires and serial-bound constraints proving knowledge of `r` such that
/// the coin commitment equals `g^S * h^r` for the revealed serial `S`.
///
/// Borrows the shared parameters and constraint system; everything
/// witness-specific is owned, so circuits for different spends can be built
/// and checked on separate threads.
#[derive(Clone, Debug)]
pub struct ArithmeticCircuit<'a> {
    params: &'a GroupParameters,
    constraints: BoundConstraints<'a>,
    wires: WireAssignment,
    serial: FieldElement,
    commitment: FieldElement,
}

impl<'a> ArithmeticCircuit<'a> {
    /// Assigns the wires for `witness` and binds `system` to its serial number.
    ///
    /// # Errors
    ///
    /// `ParameterMismatch` if `system` was built from other parameters, plus
    /// every error of [`WireAssignment::assign`].
    #[tracing::instrument(skip_all, name = "ArithmeticCircuit::new")]
    pub fn new<W: CoinWitness + ?Sized>(
        params: &'a GroupParameters,
        system: &'a ConstraintSystem,
        witness: &W,
    ) -> Result<Self, CircuitError> {
        if !system.matches(params) {
            return Err(CircuitError::ParameterMismatch);
        }
        let wires = WireAssignment::assign(witness, params)?;
        let serial = witness.serial_number().clone();
        let commitment = params.commit(&serial, witness.randomness());
        Ok(Self {
            params,
            constraints: system.bind(&serial),
            wires,
            serial,
            commitment,
        })
    }

    /// Derives the aggregation state for challenge `y`.
    pub fn aggregate(&self, y: FieldElement) -> Result<AggregationState, CircuitError> {
        if !self.params.field().contains(&y) {
            return Err(CircuitError::ForeignChallenge);
        }
        AggregationState::new(y, &self.constraints, self.params.dimensions().pads)
    }

    /// Runs every validation family against an aggregation state.
    pub fn check(&self, aggregation: &AggregationState) -> Result<(), CheckError> {
        crate::verifier::check(&self.constraints, &self.wires, &self.commitment, aggregation)
    }

    /// Aggregates under `y` and checks; the usual single-call entry point.
    pub fn check_with_challenge(&self, y: FieldElement) -> Result<(), crate::SpendError> {
        let aggregation = self.aggregate(y)?;
        self.check(&aggregation)?;
        Ok(())
    }

    #[inline]
    pub fn params(&self) -> &'a GroupParameters {
        self.params
    }

    #[inline]
    pub fn constraints(&self) -> &BoundConstraints<'a> {
        &self.constraints
    }

    #[inline]
    pub fn wires(&self) -> &WireAssignment {
        &self.wires
    }

    /// Mutable wires, for fault injection.
    #[inline]
    pub fn wires_mut(&mut self) -> &mut WireAssignment {
        &mut self.wires
    }

    /// The public serial number `S`.
    #[inline]
    pub fn serial(&self) -> &FieldElement {
        &self.serial
    }

    /// `g^S * h^r` recomputed from the witness.
    #[inline]
    pub fn commitment(&self) -> &FieldElement {
        &self.commitment
    }
}
