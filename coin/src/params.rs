//! Group parameters shared by every coin and spend circuit of a deployment.

use field::{BigUint, FieldElement, PrimeField, double_exp};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEMO_COLUMNS, DEMO_G, DEMO_H, DEMO_MODULUS_EXPONENT, DEMO_MODULUS_OFFSET, DEMO_PADS,
    DEMO_ROWS, DEMO_SERIAL_SIZE,
};
use crate::errors::CoinError;

/// Shape of the spend circuit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitDimensions {
    /// Wire columns per row (`N`).
    pub columns: usize,
    /// Wire rows (`M`).
    pub rows: usize,
    /// Bit length of the coin randomness (`SERIALSIZE`).
    pub serial_size: usize,
    /// Padding columns used by the proof layer (`PADS`).
    pub pads: usize,
}

impl CircuitDimensions {
    /// Number of wire cells in each of the matrices A, B and C, or `None`
    /// if `columns * rows` does not fit in a `usize`.
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.columns.checked_mul(self.rows)
    }
}

/// Immutable cryptographic and circuit constants.
///
/// Built once per parameter set and shared read-only; cloning is cheap
/// because the modulus is reference counted.
///
/// # Example
///
/// ```
/// use coin::{CircuitDimensions, GroupParameters};
/// use field::BigUint;
///
/// let dims = CircuitDimensions { columns: 4, rows: 4, serial_size: 8, pads: 2 };
/// let params = GroupParameters::new(BigUint::from(1_000_003u32), 2u32.into(), 3u32.into(), dims)
///     .expect("valid parameters");
/// assert_eq!(params.dimensions().capacity(), Some(16));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters", into = "RawParameters")]
pub struct GroupParameters {
    field: PrimeField,
    g: FieldElement,
    h: FieldElement,
    dimensions: CircuitDimensions,
}

/// Wire form of [`GroupParameters`]; validated on the way in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct RawParameters {
    pub(crate) modulus: BigUint,
    pub(crate) g: BigUint,
    pub(crate) h: BigUint,
    pub(crate) dimensions: CircuitDimensions,
}

impl GroupParameters {
    /// Validates and builds a parameter set.
    ///
    /// The modulus must be prime, both generators must lie in `[2, q)` and
    /// the dimensions must be nonzero with `columns * rows` representable.
    /// Whether the dimensions leave room for the spend circuit is decided by
    /// the circuit itself when it lays out its wires.
    pub fn new(
        modulus: BigUint,
        g: BigUint,
        h: BigUint,
        dimensions: CircuitDimensions,
    ) -> Result<Self, CoinError> {
        let field = PrimeField::new(modulus)?;
        let g = checked_generator(&field, &g, "g")?;
        let h = checked_generator(&field, &h, "h")?;
        let empty = dimensions.columns == 0 || dimensions.rows == 0 || dimensions.serial_size == 0;
        if empty || dimensions.capacity().is_none() {
            return Err(CoinError::InvalidDimensions {
                columns: dimensions.columns,
                rows: dimensions.rows,
                serial_size: dimensions.serial_size,
            });
        }
        Ok(Self {
            field,
            g,
            h,
            dimensions,
        })
    }

    /// Demo parameter set over `q = 2^255 - 19` with small generators.
    ///
    /// Production deployments receive their parameters from the parameter
    /// management layer; this set exists for benchmarks and examples.
    pub fn demo() -> Result<Self, CoinError> {
        let modulus = (BigUint::from(1u32) << DEMO_MODULUS_EXPONENT)
            - BigUint::from(DEMO_MODULUS_OFFSET);
        Self::new(
            modulus,
            BigUint::from(DEMO_G),
            BigUint::from(DEMO_H),
            CircuitDimensions {
                columns: DEMO_COLUMNS,
                rows: DEMO_ROWS,
                serial_size: DEMO_SERIAL_SIZE,
                pads: DEMO_PADS,
            },
        )
    }

    #[inline]
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    #[inline]
    pub fn modulus(&self) -> &BigUint {
        self.field.modulus()
    }

    #[inline]
    pub fn g(&self) -> &FieldElement {
        &self.g
    }

    #[inline]
    pub fn h(&self) -> &FieldElement {
        &self.h
    }

    #[inline]
    pub fn dimensions(&self) -> &CircuitDimensions {
        &self.dimensions
    }

    /// The commitment `g^serial * h^randomness`.
    pub fn commit(&self, serial: &FieldElement, randomness: &FieldElement) -> FieldElement {
        double_exp(&self.g, serial.value(), &self.h, randomness.value())
    }

    /// Serializes the parameter set with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoinError> {
        bincode::serialize(self).map_err(|e| CoinError::Encoding(e.to_string()))
    }

    /// Deserializes and re-validates a parameter set.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoinError> {
        bincode::deserialize(bytes).map_err(|e| CoinError::Encoding(e.to_string()))
    }
}

fn checked_generator(
    field: &PrimeField,
    value: &BigUint,
    name: &'static str,
) -> Result<FieldElement, CoinError> {
    if *value < BigUint::from(2u32) || value >= field.modulus() {
        return Err(CoinError::GeneratorOutOfRange { name });
    }
    Ok(field.element(value))
}

impl TryFrom<RawParameters> for GroupParameters {
    type Error = CoinError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::new(raw.modulus, raw.g, raw.h, raw.dimensions)
    }
}

impl From<GroupParameters> for RawParameters {
    fn from(params: GroupParameters) -> Self {
        Self {
            modulus: params.field.modulus().clone(),
            g: params.g.value().clone(),
            h: params.h.value().clone(),
            dimensions: params.dimensions,
        }
    }
}
