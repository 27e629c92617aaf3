//! # bit_vector
//!
//! A bit container with two modes, chosen at construction:
//!
//! - [`Mode::Array`]: a fixed number of directly addressed bits.
//! - [`Mode::Stream`]: a growing sequence of bits appended and detached at a
//!   cursor, with amortized doubling of the storage.
//!
//! Bits are packed LSB-first into bytes. A vector converts to and from
//! strings of `'0'`/`'1'`, and saves to any positioned byte sink in a compact
//! binary layout (see [`io`]).
//!
//! ```rust
//! use bit_vector::{BitVector, Mode};
//!
//! // A 64-bit array
//! let mut array = BitVector::new(Mode::Array, 64).expect("failed to create array");
//! array.set(10).unwrap();
//! assert!(array.get(10).unwrap());
//!
//! // A stream built up one bit at a time
//! let mut stream = BitVector::stream();
//! for bit in [true, true, false] {
//!     stream.append_bit(bit).unwrap();
//! }
//! assert_eq!(stream.to_bit_string(), "110");
//! ```
//!
//! ## Saving and restoring
//!
//! ```rust
//! use bit_vector::BitVector;
//! use byte_store::Storage;
//!
//! let stream = BitVector::from_bit_str("0110").unwrap();
//!
//! let mut storage = Storage::new_in_memory();
//! let next = stream.serialize(&mut storage, 0).unwrap();
//!
//! let (restored, end) = BitVector::deserialize(&storage, 0).unwrap();
//! assert_eq!(restored, stream);
//! assert_eq!(end, next);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub use error::{BitVectorError, ErrorKind};

mod bit_ops;
mod index;

pub mod convert;
pub mod io;
pub mod vector;

pub use io::{HEADER_SIZE, MAX_STREAM_SLACK_BITS};
pub use vector::{BitVector, Iter, Mode, STREAM_MIN_CAPACITY_BITS};

pub type Result<T> = core::result::Result<T, BitVectorError>;
