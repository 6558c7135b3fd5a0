//! Wire addressing for the spend circuit.
//!
//! Every wire has a linear index `i`; it lives at row `i / N`, column `i % N`
//! of the M×N matrices A, B and C. [`CircuitLayout::cell`] is the only place
//! that performs this conversion.
//!
//! ```text
//! linear index   0 ........ S-1 | S ............. 2S-2 | 2S-1 .. N*M-1
//! phase          bits of r      | accumulation steps   | unused
//! A              bit_i          | running product      | 0
//! B              bit_i - 1      | next selector        | 0
//! C              0              | A * B                | 0
//! ```

use core::ops::{Index, IndexMut};

use coin::CircuitDimensions;

use crate::errors::CircuitError;

/// Smallest randomness bit length the circuit supports: one anchor step, one
/// chain link and the final step.
pub const MIN_SERIAL_SIZE: usize = 3;

/// Position of a wire inside an M×N matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

/// Dense row-major matrix with bounds-checked access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    columns: usize,
    values: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    pub fn filled(rows: usize, columns: usize, value: T) -> Self {
        Self {
            rows,
            columns,
            values: vec![value; rows * columns],
        }
    }
}

impl<T> Matrix<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn offset(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.columns)
            .then(|| cell.row * self.columns + cell.col)
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.offset(cell).map(|i| &self.values[i])
    }

    #[inline]
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.offset(cell).map(move |i| &mut self.values[i])
    }

    /// Overwrites one cell, reporting an out-of-range address as an error.
    pub fn set(&mut self, cell: Cell, value: T) -> Result<(), CircuitError> {
        let (rows, columns) = (self.rows, self.columns);
        let slot = self.get_mut(cell).ok_or(CircuitError::OutOfBounds {
            row: cell.row,
            col: cell.col,
            rows,
            columns,
        })?;
        *slot = value;
        Ok(())
    }

    /// One matrix row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row {row} out of range");
        &self.values[row * self.columns..(row + 1) * self.columns]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        let columns = self.columns;
        self.values.iter().enumerate().map(move |(i, value)| {
            (
                Cell {
                    row: i / columns,
                    col: i % columns,
                },
                value,
            )
        })
    }
}

impl<T> Index<Cell> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, cell: Cell) -> &T {
        match self.offset(cell) {
            Some(i) => &self.values[i],
            None => panic!(
                "cell ({}, {}) outside {}x{} matrix",
                cell.row, cell.col, self.rows, self.columns
            ),
        }
    }
}

impl<T> IndexMut<Cell> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        let (rows, columns) = (self.rows, self.columns);
        match self.offset(cell) {
            Some(i) => &mut self.values[i],
            None => panic!(
                "cell ({}, {}) outside {rows}x{columns} matrix",
                cell.row, cell.col
            ),
        }
    }
}

/// Validated circuit shape plus the wire-addressing rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CircuitLayout {
    columns: usize,
    rows: usize,
    serial_size: usize,
}

impl CircuitLayout {
    /// Validates that the dimensions can hold the circuit.
    ///
    /// The bit phase uses `S` wires and the accumulation phase `S - 1`, so
    /// the matrices need `2S - 1` cells. Every count derived from the
    /// dimensions later on (cells, constraint rows, powers of the challenge,
    /// negative powers) is checked here to fit in a `usize`.
    pub fn new(dimensions: &CircuitDimensions) -> Result<Self, CircuitError> {
        let serial_size = dimensions.serial_size;
        if serial_size < MIN_SERIAL_SIZE {
            return Err(CircuitError::SerialSizeTooSmall {
                serial_size,
                minimum: MIN_SERIAL_SIZE,
            });
        }
        let overflow = CircuitError::DimensionOverflow {
            columns: dimensions.columns,
            rows: dimensions.rows,
            serial_size,
            pads: dimensions.pads,
        };
        let (Some(capacity), Some(_)) = (dimensions.capacity(), power_count(dimensions)) else {
            return Err(overflow);
        };
        let needed = 2 * serial_size - 1;
        if needed > capacity {
            return Err(CircuitError::CapacityExceeded {
                needed,
                capacity,
                rows: dimensions.rows,
                columns: dimensions.columns,
            });
        }
        Ok(Self {
            columns: dimensions.columns,
            rows: dimensions.rows,
            serial_size,
        })
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn serial_size(&self) -> usize {
        self.serial_size
    }

    /// The cell holding linear wire `index`.
    #[inline]
    pub fn cell(&self, index: usize) -> Cell {
        Cell {
            row: index / self.columns,
            col: index % self.columns,
        }
    }

    /// Wire of randomness bit `k`.
    #[inline]
    pub fn bit_cell(&self, k: usize) -> Cell {
        debug_assert!(k < self.serial_size);
        self.cell(k)
    }

    /// Wire of accumulation step `k`, for `k` in `[0, S - 1)`.
    #[inline]
    pub fn accumulator_cell(&self, k: usize) -> Cell {
        debug_assert!(k + 1 < self.serial_size);
        self.cell(self.serial_size + k)
    }

    /// Index of the last accumulation step.
    #[inline]
    pub fn final_step(&self) -> usize {
        self.serial_size - 2
    }

    /// The wire whose C value is the commitment `g^S * h^r`.
    #[inline]
    pub fn final_cell(&self) -> Cell {
        self.accumulator_cell(self.final_step())
    }

    /// Wires in use, `2S - 1`.
    #[inline]
    pub fn wire_count(&self) -> usize {
        2 * self.serial_size - 1
    }

    /// Constraint rows including the final binding row, `4S - 1`.
    #[inline]
    pub fn constraint_count(&self) -> usize {
        4 * self.serial_size - 1
    }

    /// Rows checked individually and aggregated, `4S - 2`.
    #[inline]
    pub fn checked_constraint_count(&self) -> usize {
        4 * self.serial_size - 2
    }

    /// Fresh M×N matrix of `value`.
    pub fn matrix<T: Clone>(&self, value: T) -> Matrix<T> {
        Matrix::filled(self.rows, self.columns, value)
    }
}

/// Length of the challenge power table plus one, and the negative-power
/// count, or `None` if either overflows.
fn power_count(dimensions: &CircuitDimensions) -> Option<usize> {
    dimensions.columns.checked_add(dimensions.pads)?;
    let constraints = dimensions.serial_size.checked_mul(4)?;
    let hadamard = dimensions.rows.checked_mul(dimensions.columns.checked_add(1)?)?;
    hadamard.checked_add(constraints)
}
