//! Constants for the demo parameter set and coin encodings.

/// Bit length of the coin randomness in the demo parameter set.
///
/// The spend circuit decomposes the randomness into exactly this many bits.
pub const DEMO_SERIAL_SIZE: usize = 256;

/// Wire columns per row (`N`) in the demo parameter set.
///
/// Together with [`DEMO_ROWS`] this places the final accumulation wire,
/// linear index `2 * 256 - 2 = 510 = 15 * 34`, at the start of the last row.
pub const DEMO_COLUMNS: usize = 34;

/// Wire rows (`M`) in the demo parameter set.
pub const DEMO_ROWS: usize = 16;

/// Padding columns appended by the proof layer to blind the wire
/// polynomials.
pub const DEMO_PADS: usize = 2;

/// Generator `g` of the demo parameter set.
pub const DEMO_G: u32 = 2;

/// Generator `h` of the demo parameter set.
pub const DEMO_H: u32 = 3;

/// Exponent `e` of the demo modulus `q = 2^e - 19`.
pub(crate) const DEMO_MODULUS_EXPONENT: u32 = 255;

/// Offset `c` of the demo modulus `q = 2^e - c`.
pub(crate) const DEMO_MODULUS_OFFSET: u32 = 19;
