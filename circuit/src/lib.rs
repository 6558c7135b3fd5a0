//! # Zero-Knowledge Coin Spend Circuit
//!
//! Arithmetic circuit proving knowledge of the randomness `r` behind a coin
//! commitment `C = g^S * h^r` when the coin's serial number `S` is revealed.
//!
//! ## Overview
//!
//! The circuit is a set of multiplication gates `A * B = C` laid out in three
//! M×N wire matrices, plus sparse linear constraints over those wires. A
//! verifier challenge `y` folds every gate and every constraint into one
//! identity, which is what the surrounding proof layer argues about.
//!
//! **Pipeline**:
//!
//! ```text
//! GroupParameters ──► ConstraintSystem (shared, cacheable)
//!                            │ bind(S)
//! CoinWitness ──► WireAssignment ──► ArithmeticCircuit ──► aggregate(y) ──► check
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use circuit::{ArithmeticCircuit, ConstraintSystem};
//! use coin::{CircuitDimensions, GroupParameters, PrivateCoin};
//! use field::BigUint;
//!
//! let dims = CircuitDimensions { columns: 4, rows: 4, serial_size: 8, pads: 2 };
//! let params = GroupParameters::new(BigUint::from(1_000_003u32), 2u32.into(), 3u32.into(), dims)
//!     .expect("valid parameters");
//! let f = params.field();
//!
//! let coin = PrivateCoin::new(&params, f.from_u64(5), f.from_u64(170)).expect("coin");
//! let system = ConstraintSystem::build(&params).expect("fits");
//! let circuit = ArithmeticCircuit::new(&params, &system, &coin).expect("assign");
//!
//! let aggregation = circuit.aggregate(f.from_u64(987_654)).expect("nonzero challenge");
//! assert!(circuit.check(&aggregation).is_ok());
//! ```
//!
//! ## Wire Layout
//!
//! Linear wire index `i` lives at row `i / N`, column `i % N`.
//!
//! | wires          | A                     | B              | C       |
//! |----------------|-----------------------|----------------|---------|
//! | `[0, S)`       | bit `r_i`             | `r_i - 1`      | 0       |
//! | `[S, 2S - 1)`  | running product       | next selector  | `A * B` |
//!
//! Selector `j` is `h^{2^j}` when bit `j` is set and 1 otherwise, so the
//! running product after all bits is `h^r`. The last step also multiplies
//! in `g^S`, making the final C wire equal to the commitment.
//!
//! ## Constraints
//!
//! `4S - 1` rows, see [`ConstraintSystem`]. The first `4S - 2` are checked
//! and aggregated; the last one selects the final wire for the proof
//! layer's external commitment binding.
//!
//! ## Aggregation
//!
//! Hadamard cell `(m, col)` is weighted by `y^{m+1} * YDash[col]` and
//! checked row `i` by `y^{offset + i}`. The exponent ranges never overlap,
//! so a single violated relation leaves a nonzero polynomial in `y` and the
//! identity fails for all but a handful of challenges. See
//! [`aggregation`] for the exact formulas.
//!
//! ## Validation
//!
//! [`ArithmeticCircuit::check`] runs four families in order and reports the
//! first failure as a [`CheckError`]:
//! 1. Hadamard products
//! 2. Commitment binding of the final wire
//! 3. Individual linear constraints
//! 4. The aggregated identity
//!
//! ## Sharing and Parallelism
//!
//! Constraint systems depend only on the parameters. [`ConstraintCache`]
//! memoizes them per parameter set and [`check_spends`] checks independent
//! spends on the rayon pool.
//!
//! Run benchmarks: `cargo bench -p circuit`

pub mod aggregation;
mod cache;
mod circuit;
mod constraints;
mod errors;
mod layout;
pub mod projection;
mod spend;
pub mod verifier;
mod wires;


pub use aggregation::{AggregationState, PowerLayout, WirePolynomials};
pub use cache::ConstraintCache;
pub use circuit::ArithmeticCircuit;
pub use constraints::{
    BoundConstraints, ConstraintKind, ConstraintRow, ConstraintSystem, Term, Wire,
};
pub use errors::{CheckError, CircuitError};
pub use layout::{Cell, CircuitLayout, Matrix, MIN_SERIAL_SIZE};
pub use projection::{project_row, SparseProjections};
pub use spend::{check_spend, check_spends, Spend, SpendError};
pub use wires::WireAssignment;
