//! Binary save/restore of a bit vector at an offset in a byte sink/source.
//!
//! Format, host byte order:
//!
//! | field         | size                    |
//! |---------------|-------------------------|
//! | mode          | 1 byte (0 stream, 1 array) |
//! | capacity_bits | 8 bytes                 |
//! | cursor        | 8 bytes                 |
//! | packed bits   | `ceil(len / 8)` bytes   |
//!
//! where `len` is the logical length: the capacity for arrays, the cursor
//! for streams.
//!
//! ```rust
//! use bit_vector::BitVector;
//!
//! let bits = BitVector::from_bit_str("1011").unwrap();
//!
//! let mut sink: Vec<u8> = Vec::new();
//! let end = bits.serialize(&mut sink, 3).unwrap();
//! assert_eq!(end, 3 + 17 + 1);
//!
//! let (restored, next) = BitVector::deserialize(&sink, 3).unwrap();
//! assert_eq!(restored, bits);
//! assert_eq!(next, end);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use byte_store::{ByteSink, ByteSource};
use bytemuck_derive::{Pod, Zeroable};

use crate::bit_ops::bytes_for_bits;
use crate::{BitVector, BitVectorError, Mode, Result};

pub const HEADER_SIZE: usize = 17;

/// Unused capacity a restored stream may carry regardless of its cursor.
///
/// Past this, a stream's capacity beyond the cursor may be at most the cursor
/// itself, which covers any stream grown by doubling.
pub const MAX_STREAM_SLACK_BITS: usize = 1 << 24;

#[repr(C, packed)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    mode: u8,
    capacity_bits: u64,
    cursor: u64,
}

const _: () = assert!(core::mem::size_of::<RawHeader>() == HEADER_SIZE);

fn write_exact<S: ByteSink + ?Sized>(sink: &mut S, bytes: &[u8], offset: u64) -> Result<u64> {
    let actual = sink.write_at(bytes, offset)?;
    if actual < bytes.len() {
        log::warn!(
            "short write at offset {}: {} of {} bytes",
            offset,
            actual,
            bytes.len()
        );
        return Err(BitVectorError::ShortWrite {
            expected: bytes.len(),
            actual,
        });
    }
    Ok(offset + bytes.len() as u64)
}

fn read_exact<S: ByteSource + ?Sized>(source: &S, buf: &mut [u8], offset: u64) -> Result<u64> {
    let actual = source.read_at(buf, offset)?;
    if actual < buf.len() {
        log::warn!(
            "short read at offset {}: {} of {} bytes",
            offset,
            actual,
            buf.len()
        );
        return Err(BitVectorError::ShortRead {
            expected: buf.len(),
            actual,
        });
    }
    Ok(offset + buf.len() as u64)
}

impl BitVector {
    /// Writes the header and packed bits at `offset`, returning the offset
    /// just past the written data.
    ///
    /// A sink that accepts fewer bytes than asked fails with
    /// [`BitVectorError::ShortWrite`]; bytes it did take are left as written.
    pub fn serialize<S: ByteSink + ?Sized>(&self, sink: &mut S, offset: u64) -> Result<u64> {
        let header = RawHeader {
            mode: self.mode() as u8,
            capacity_bits: self.capacity_bits() as u64,
            cursor: self.cursor() as u64,
        };

        let payload_at = write_exact(sink, bytemuck::bytes_of(&header), offset)?;
        let next = write_exact(sink, self.as_bytes(), payload_at)?;

        log::debug!(
            "serialized {} bit vector ({} bits) at offset {}..{}",
            self.mode(),
            self.len(),
            offset,
            next
        );
        Ok(next)
    }

    /// Reads a vector written by [`BitVector::serialize`] at `offset`,
    /// returning it with the offset just past its data.
    ///
    /// Headers that cannot describe a valid vector, or that promise more
    /// payload than the source holds, fail with [`BitVectorError::Malformed`].
    /// A stream's capacity is restored exactly, so it is bounded: capacity
    /// beyond the cursor may not exceed the larger of the cursor and
    /// [`MAX_STREAM_SLACK_BITS`].
    pub fn deserialize<S: ByteSource + ?Sized>(source: &S, offset: u64) -> Result<(Self, u64)> {
        let mut raw = [0u8; HEADER_SIZE];
        let payload_at = read_exact(source, &mut raw, offset)?;
        let header: RawHeader = bytemuck::pod_read_unaligned(&raw);

        // copy out of the packed struct before use
        let (tag, capacity_bits, cursor) = (header.mode, header.capacity_bits, header.cursor);

        let mode = Mode::try_from(tag).inspect_err(|_| {
            log::warn!("unknown mode tag {} at offset {}", tag, offset);
        })?;
        let capacity_bits = usize::try_from(capacity_bits)
            .map_err(|_| BitVectorError::Malformed("capacity does not fit in memory"))?;
        let cursor = usize::try_from(cursor)
            .map_err(|_| BitVectorError::Malformed("cursor does not fit in memory"))?;

        let len = match mode {
            Mode::Array if capacity_bits == 0 => {
                return Err(BitVectorError::Malformed("array with zero capacity"));
            }
            Mode::Array => capacity_bits,
            Mode::Stream if cursor > capacity_bits => {
                return Err(BitVectorError::Malformed("stream cursor beyond capacity"));
            }
            Mode::Stream if capacity_bits - cursor > cursor.max(MAX_STREAM_SLACK_BITS) => {
                log::warn!(
                    "stream header at offset {} claims {} bits of capacity for {} bits",
                    offset,
                    capacity_bits,
                    cursor
                );
                return Err(BitVectorError::Malformed("stream capacity out of proportion to cursor"));
            }
            Mode::Stream => cursor,
        };

        let payload_len = bytes_for_bits(len);
        let end = payload_at
            .checked_add(payload_len as u64)
            .ok_or(BitVectorError::Malformed("payload length overflows offset"))?;
        let available = source.size()?;
        if end > available {
            log::warn!(
                "header at offset {} promises {} payload bytes, source ends at {}",
                offset,
                payload_len,
                available
            );
            return Err(BitVectorError::Malformed("payload extends past end of source"));
        }

        let mut vector = BitVector::from_parts(mode, capacity_bits, cursor)?;
        let next = read_exact(source, &mut vector.storage_mut()[..payload_len], payload_at)?;

        log::debug!(
            "deserialized {} bit vector ({} bits) from offset {}..{}",
            mode,
            len,
            offset,
            next
        );
        Ok((vector, next))
    }

    /// Serialized form as a fresh byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(HEADER_SIZE + self.as_bytes().len());
        self.serialize(&mut buf, 0)?;
        Ok(buf)
    }

    /// Restores a vector serialized at the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::deserialize(bytes, 0).map(|(vector, _)| vector)
    }
}
