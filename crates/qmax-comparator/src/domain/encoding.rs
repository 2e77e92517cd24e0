//! Operand encoding
//!
//! This module converts two signed integers into the bit pairs stored in the
//! comparator's qubit triples.
//!
//! The sign bit is stored inverted (1 for non-negative, 0 for negative), which
//! turns two's complement into offset binary: comparing the bit sequences as
//! unsigned numbers then gives the signed order.

use crate::config::EncodingMode;
use crate::constants::{MAX_WIDTH, MIN_WIDTH};
use thiserror::Error;

/// One bit of each operand at the same position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitPair {
    /// Bit of `number_1`
    pub a: bool,
    /// Bit of `number_2`
    pub b: bool,
}

impl BitPair {
    pub fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }
}

/// Representable operand range for a width: `[-2^(w-1), 2^(w-1) - 1]`
pub fn operand_range(width: u32) -> (i64, i64) {
    let half = 1i64 << (width - 1);
    (-half, half - 1)
}

/// Encode two operands, most significant pair first
///
/// The first pair holds the (inverted) sign bits. In `Minimal` mode magnitude
/// bits are emitted only until both operands equal their sign extension, so
/// `(0, 0)` encodes to the single pair `(1, 1)`.
pub fn encode_operands(
    number_1: i64,
    number_2: i64,
    width: u32,
    mode: EncodingMode,
) -> Result<Vec<BitPair>, EncodingError> {
    if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        return Err(EncodingError::InvalidWidth(width));
    }

    let (min, max) = operand_range(width);
    for value in [number_1, number_2] {
        if value < min || value > max {
            return Err(EncodingError::OutOfRange {
                value,
                width,
                min,
                max,
            });
        }
    }

    // 0 if non-negative, -1 if negative
    let sign_1 = number_1 >> 63;
    let sign_2 = number_2 >> 63;

    let mut a = number_1;
    let mut b = number_2;
    let mut bits = Vec::with_capacity(width as usize);

    match mode {
        EncodingMode::Minimal => {
            while a != sign_1 || b != sign_2 {
                bits.push(BitPair::new(a & 1 == 1, b & 1 == 1));
                a >>= 1;
                b >>= 1;
            }
        }
        EncodingMode::Fixed => {
            for _ in 1..width {
                bits.push(BitPair::new(a & 1 == 1, b & 1 == 1));
                a >>= 1;
                b >>= 1;
            }
        }
    }

    bits.push(BitPair::new(sign_1 + 1 == 1, sign_2 + 1 == 1));
    bits.reverse();
    Ok(bits)
}

/// Operand encoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Operand does not fit in the configured width
    #[error("Value {value} does not fit in {width} bits (range {min}..={max})")]
    OutOfRange {
        value: i64,
        width: u32,
        min: i64,
        max: i64,
    },
    /// Width outside the supported range
    #[error("Unsupported operand width: {0}")]
    InvalidWidth(u32),
}
