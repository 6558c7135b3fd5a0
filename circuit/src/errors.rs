//! Error types for building and checking the spend circuit.

/// Errors raised while laying out, assigning or aggregating a circuit.
///
/// All of these are configuration or input mismatches detected before any
/// wire arithmetic; none of them is retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    /// The parameter set does not have room for every wire the circuit needs.
    #[error("circuit needs {needed} wires but a {rows}x{columns} matrix holds {capacity}")]
    CapacityExceeded {
        needed: usize,
        capacity: usize,
        rows: usize,
        columns: usize,
    },

    /// The dimensions are so large that wire, constraint or power counts
    /// overflow a `usize`.
    #[error(
        "circuit dimensions overflow (columns {columns}, rows {rows}, \
         serial size {serial_size}, pads {pads})"
    )]
    DimensionOverflow {
        columns: usize,
        rows: usize,
        serial_size: usize,
        pads: usize,
    },

    /// The recurrence needs an anchor, one chain link and a final step.
    #[error("serial size {serial_size} is below the minimum of {minimum}")]
    SerialSizeTooSmall { serial_size: usize, minimum: usize },

    /// The witness randomness has bits the circuit would drop.
    #[error("randomness has {bits} bits but the circuit decomposes {serial_size}")]
    RandomnessTooWide { bits: u64, serial_size: usize },

    /// A constraint system was paired with parameters it was not built for.
    #[error("constraint system was built for a different parameter set")]
    ParameterMismatch,

    /// The challenge is zero, which has no inverse and collapses every power.
    #[error("challenge must be nonzero")]
    DegenerateChallenge,

    /// The challenge belongs to a different field.
    #[error("challenge is not an element of the parameter set's field")]
    ForeignChallenge,

    /// A cell address fell outside its matrix.
    #[error("cell ({row}, {col}) is outside a {rows}x{columns} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },

    /// Encoding a parameter set for the cache failed.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Which validation family rejected a circuit.
///
/// Any of these means the circuit must not be used to produce or accept a
/// proof: the witness is malformed or the implementation is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// `A[row][col] * B[row][col] != C[row][col]`.
    #[error("hadamard relation fails at cell ({row}, {col})")]
    Hadamard { row: usize, col: usize },

    /// The final wire does not equal `g^S * h^r`.
    #[error("final wire at ({row}, {col}) does not open the coin commitment")]
    CommitmentBinding { row: usize, col: usize },

    /// A linear constraint row does not evaluate to its constant.
    #[error("linear constraint {index} is not satisfied")]
    LinearConstraint { index: usize },

    /// The challenge-aggregated identity does not hold.
    #[error("aggregated identity does not hold")]
    AggregatedIdentity,
}

impl CheckError {
    /// Family number, 1 through 4, in checking order.
    pub fn code(&self) -> u8 {
        match self {
            CheckError::Hadamard { .. } => 1,
            CheckError::CommitmentBinding { .. } => 2,
            CheckError::LinearConstraint { .. } => 3,
            CheckError::AggregatedIdentity => 4,
        }
    }
}
