//! The bit vector itself: one packed byte buffer, a capacity in bits and a
//! stream cursor.
//!
//! # Examples
//!
//! ## Array mode
//!
//! ```rust
//! use bit_vector::{BitVector, Mode};
//!
//! let mut bits = BitVector::new(Mode::Array, 64).unwrap();
//! bits.set(2).unwrap();
//! assert_eq!(bits.get(2).unwrap(), true);
//! assert_eq!(bits.get(1).unwrap(), false);
//!
//! bits.resize(8).unwrap();
//! assert!(bits.get(8).is_err());
//! ```
//!
//! ## Stream mode
//!
//! ```rust
//! use bit_vector::BitVector;
//!
//! let mut stream = BitVector::stream();
//! stream.append_bit(true).unwrap();
//! stream.append_bit(false).unwrap();
//! assert_eq!(stream.len(), 2);
//!
//! assert_eq!(stream.detach_bit().unwrap(), false);
//! assert_eq!(stream.len(), 1);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use core::fmt;

use crate::bit_ops::{self, bytes_for_bits};
use crate::index::BitIndex;
use crate::{BitVectorError, Result};

/// Smallest capacity a stream starts with, and the floor its growth restarts
/// from when the capacity has dropped to zero.
pub const STREAM_MIN_CAPACITY_BITS: usize = 8;

/// How a [`BitVector`] interprets its length. Fixed for the vector's lifetime.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Logical length is the number of bits appended so far.
    Stream = 0,
    /// Logical length is the whole capacity.
    Array = 1,
}

impl TryFrom<u8> for Mode {
    type Error = BitVectorError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Mode::Stream),
            1 => Ok(Mode::Array),
            _ => Err(BitVectorError::Malformed("unknown mode tag")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Stream => f.write_str("stream"),
            Mode::Array => f.write_str("array"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BitVector {
    storage: Vec<u8>,
    capacity_bits: usize,
    cursor: usize,
    mode: Mode,
}

/// Allocates `bytes` zeroed bytes, reporting failure instead of aborting.
fn zeroed(bytes: usize) -> Result<Vec<u8>> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(bytes)
        .map_err(|_| BitVectorError::AllocationFailure(bytes))?;
    storage.resize(bytes, 0);
    Ok(storage)
}

fn stream_capacity_for(hint: usize) -> usize {
    hint.checked_next_power_of_two()
        .unwrap_or(hint)
        .max(STREAM_MIN_CAPACITY_BITS)
}

impl BitVector {
    /// Creates a zeroed bit vector.
    ///
    /// For [`Mode::Array`] `len` is the exact number of bits and must be
    /// non-zero. For [`Mode::Stream`] it is only a sizing hint: the capacity
    /// is rounded up to a power of two and the stream starts empty.
    pub fn new(mode: Mode, len: usize) -> Result<Self> {
        let capacity_bits = match mode {
            Mode::Array if len == 0 => return Err(BitVectorError::ZeroLength),
            Mode::Array => len,
            Mode::Stream => stream_capacity_for(len),
        };
        Self::from_parts(mode, capacity_bits, 0)
    }

    /// Fixed-length array of `len` clear bits.
    pub fn array(len: usize) -> Result<Self> {
        Self::new(Mode::Array, len)
    }

    /// Empty stream with the minimum capacity.
    pub fn stream() -> Self {
        BitVector {
            storage: vec![0; bytes_for_bits(STREAM_MIN_CAPACITY_BITS)],
            capacity_bits: STREAM_MIN_CAPACITY_BITS,
            cursor: 0,
            mode: Mode::Stream,
        }
    }

    /// Empty stream sized for roughly `hint` bits.
    pub fn stream_with_hint(hint: usize) -> Result<Self> {
        Self::new(Mode::Stream, hint)
    }

    /// Builds a zeroed vector with exactly the given counters; used when
    /// restoring a serialized vector.
    pub(crate) fn from_parts(mode: Mode, capacity_bits: usize, cursor: usize) -> Result<Self> {
        debug_assert!(mode == Mode::Array || cursor <= capacity_bits);
        Ok(BitVector {
            storage: zeroed(bytes_for_bits(capacity_bits))?,
            capacity_bits,
            cursor,
            mode,
        })
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of bits currently backed by storage.
    #[inline]
    pub fn capacity_bits(&self) -> usize {
        self.capacity_bits
    }

    /// Stream fill level. Kept but meaningless for arrays.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of valid bits: the capacity for arrays, the cursor for streams.
    #[inline]
    pub fn len(&self) -> usize {
        match self.mode {
            Mode::Array => self.capacity_bits,
            Mode::Stream => self.cursor,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The packed bytes covering the logical length, LSB-first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..bytes_for_bits(self.len())]
    }

    pub(crate) fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    fn checked_index(&self, index: usize) -> Result<BitIndex> {
        let len = self.len();
        if index >= len {
            return Err(BitVectorError::IndexOutOfBounds(index, len));
        }
        Ok(BitIndex(index))
    }

    fn require_stream(&self) -> Result<()> {
        match self.mode {
            Mode::Stream => Ok(()),
            Mode::Array => Err(BitVectorError::UnsupportedMode(Mode::Array)),
        }
    }

    pub fn set(&mut self, index: usize) -> Result<()> {
        let at = self.checked_index(index)?;
        bit_ops::set_bit(&mut self.storage, at);
        Ok(())
    }

    pub fn clear(&mut self, index: usize) -> Result<()> {
        let at = self.checked_index(index)?;
        bit_ops::clear_bit(&mut self.storage, at);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        let at = self.checked_index(index)?;
        Ok(bit_ops::get_bit(&self.storage, at))
    }

    /// Flips one bit and returns its new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let at = self.checked_index(index)?;
        let bit = !bit_ops::get_bit(&self.storage, at);
        bit_ops::write_bit(&mut self.storage, at, bit);
        Ok(bit)
    }

    /// Grows or shrinks the storage to back exactly `capacity_bits` bits.
    ///
    /// Existing bits below the new capacity are preserved; new bits are clear.
    /// An array cannot be resized to zero bits, and a stream cannot be cut
    /// below its cursor.
    pub fn resize(&mut self, capacity_bits: usize) -> Result<()> {
        match self.mode {
            Mode::Array if capacity_bits == 0 => return Err(BitVectorError::ZeroLength),
            Mode::Stream if capacity_bits < self.cursor => {
                return Err(BitVectorError::TruncatesStream {
                    requested: capacity_bits,
                    cursor: self.cursor,
                });
            }
            _ => {}
        }
        log::debug!(
            "resizing {} bit vector from {} to {} bits",
            self.mode,
            self.capacity_bits,
            capacity_bits
        );
        self.set_capacity(capacity_bits)
    }

    fn set_capacity(&mut self, capacity_bits: usize) -> Result<()> {
        let needed = bytes_for_bits(capacity_bits);
        let current = self.storage.len();

        if needed > current {
            self.storage
                .try_reserve_exact(needed - current)
                .map_err(|_| BitVectorError::AllocationFailure(needed))?;
            self.storage.resize(needed, 0);
        } else {
            self.storage.truncate(needed);
        }

        if capacity_bits < self.capacity_bits {
            // bits past the new end must read as clear if the vector grows again
            bit_ops::clear_tail(&mut self.storage, BitIndex(capacity_bits));
        }
        self.capacity_bits = capacity_bits;
        Ok(())
    }

    /// Appends one bit at the cursor, doubling the capacity when full.
    pub fn append_bit(&mut self, bit: bool) -> Result<()> {
        self.require_stream()?;

        if self.cursor == self.capacity_bits {
            let grown = self
                .capacity_bits
                .checked_mul(2)
                .ok_or(BitVectorError::AllocationFailure(usize::MAX))?
                .max(STREAM_MIN_CAPACITY_BITS);
            log::trace!("stream full at {} bits, growing to {}", self.capacity_bits, grown);
            self.set_capacity(grown)?;
        }

        bit_ops::write_bit(&mut self.storage, BitIndex(self.cursor), bit);
        self.cursor += 1;
        Ok(())
    }

    /// Removes and returns the most recently appended bit. Storage is kept.
    pub fn detach_bit(&mut self) -> Result<bool> {
        self.require_stream()?;
        if self.cursor == 0 {
            return Err(BitVectorError::EmptyStream);
        }
        self.cursor -= 1;
        Ok(bit_ops::get_bit(&self.storage, BitIndex(self.cursor)))
    }

    /// Number of bits an append of `max_bits` from `self` copies; zero means all.
    fn copy_len(&self, max_bits: usize) -> usize {
        if max_bits > 0 {
            max_bits.min(self.len())
        } else {
            self.len()
        }
    }

    /// Appends the first bits of `src` to this stream.
    ///
    /// Copies `min(max_bits, src.len())` bits, or all of `src` when
    /// `max_bits == 0`.
    pub fn append_vector(&mut self, src: &BitVector, max_bits: usize) -> Result<()> {
        self.require_stream()?;
        let n = src.copy_len(max_bits);
        for i in 0..n {
            let bit = src.get(i)?;
            self.append_bit(bit)?;
        }
        Ok(())
    }

    /// Appends the stream's own leading bits to itself.
    ///
    /// The count is fixed before the first append, so `append_self(0)` turns
    /// a stream holding `B` into `B ++ B`.
    pub fn append_self(&mut self, max_bits: usize) -> Result<()> {
        self.require_stream()?;
        let n = self.copy_len(max_bits);
        for i in 0..n {
            let bit = self.get(i)?;
            self.append_bit(bit)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            vector: self,
            index: 0,
            end: self.len(),
        }
    }
}

// Bits past the logical length are not part of the value.
impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.capacity_bits == other.capacity_bits
            && self.cursor == other.cursor
            && self.iter().eq(other.iter())
    }
}

impl Eq for BitVector {}

impl Default for BitVector {
    fn default() -> Self {
        Self::stream()
    }
}

pub struct Iter<'a> {
    vector: &'a BitVector,
    index: usize,
    end: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            None
        } else {
            let bit = bit_ops::get_bit(&self.vector.storage, BitIndex(self.index));
            self.index += 1;
            Some(bit)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            None
        } else {
            self.end -= 1;
            Some(bit_ops::get_bit(&self.vector.storage, BitIndex(self.end)))
        }
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a BitVector {
    type Item = bool;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
