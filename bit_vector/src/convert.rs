//! Conversions between bit vectors and text strings of `'0'`/`'1'`.
//!
//! ```rust
//! use bit_vector::BitVector;
//!
//! let bits: BitVector = "111000".parse().unwrap();
//! assert_eq!(bits.len(), 6);
//! assert_eq!(bits.to_string(), "111000");
//! ```
//!
//! Any other character is rejected, and the string is checked in full before
//! a single bit is appended.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use core::fmt;
use core::str::FromStr;

use crate::{BitVector, BitVectorError, Mode, Result};

/// Finds the first character that is neither `'0'` nor `'1'`.
fn validate_bit_str(bit_string: &str) -> Result<()> {
    match bit_string
        .chars()
        .enumerate()
        .find(|(_, c)| !matches!(c, '0' | '1'))
    {
        Some((position, found)) => Err(BitVectorError::InvalidBitChar { position, found }),
        None => Ok(()),
    }
}

impl BitVector {
    /// Appends every character of `bit_string` as one bit, in order.
    ///
    /// On an invalid character nothing is appended. An allocation failure
    /// part way through leaves the bits before it in place.
    pub fn append_str(&mut self, bit_string: &str) -> Result<()> {
        if self.mode() == Mode::Array {
            return Err(BitVectorError::UnsupportedMode(Mode::Array));
        }
        validate_bit_str(bit_string)?;
        for b in bit_string.bytes() {
            self.append_bit(b == b'1')?;
        }
        Ok(())
    }

    /// Builds a new stream holding the bits of `bit_string`.
    pub fn from_bit_str(bit_string: &str) -> Result<Self> {
        validate_bit_str(bit_string)?;
        let mut stream = BitVector::stream_with_hint(bit_string.len())?;
        stream.append_str(bit_string)?;
        Ok(stream)
    }

    /// The logical bits as a string of `'0'` and `'1'`.
    pub fn to_bit_string(&self) -> String {
        self.iter().map(|b| if b { '1' } else { '0' }).collect()
    }

    /// Writes the bits followed by a newline; an empty vector writes nothing.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        writeln!(out, "{}", self)
    }

    /// Prints the bits to stdout. See [`BitVector::write_to`].
    #[cfg(feature = "std")]
    pub fn print(&self) -> std::io::Result<()> {
        let stdout = std::io::stdout();
        self.write_to(stdout.lock())
    }
}

impl FromStr for BitVector {
    type Err = BitVectorError;

    fn from_str(s: &str) -> Result<Self> {
        BitVector::from_bit_str(s)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
