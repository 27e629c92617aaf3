//! # byte_store
//!
//! Positioned byte sinks and sources.
//!
//! A sink accepts "write these bytes at offset `o`" and reports how many bytes
//! it actually took; a source does the same for reads. Callers decide what a
//! short transfer means.
//!
//! ```rust
//! use byte_store::{ByteSink, ByteSource, Storage};
//!
//! let mut storage = Storage::new_in_memory();
//! assert_eq!(storage.write_at(b"abc", 4).unwrap(), 3);
//! assert_eq!(storage.size().unwrap(), 7);
//!
//! let mut buf = [0u8; 3];
//! assert_eq!(storage.read_at(&mut buf, 4).unwrap(), 3);
//! assert_eq!(&buf, b"abc");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod sink;
pub mod storage;

pub use error::StoreError;
pub use sink::{ByteSink, ByteSource};
pub use storage::Storage;
