use byte_store::StoreError;
#[cfg(feature = "std")]
use thiserror::Error;

use crate::Mode;

/// Broad classes of failure, for callers that only care which kind of
/// thing went wrong.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad index, bad bit, zero length, or an operation the mode does not allow.
    InvalidArgument,
    /// Growing the bit storage could not get memory.
    AllocationFailure,
    /// Detach on a stream holding no bits.
    EmptyStream,
    /// The sink or source failed or moved fewer bytes than requested.
    Io,
    /// Serialized data that cannot describe a valid bit vector.
    Malformed,
}

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug)]
pub enum BitVectorError {
    #[cfg_attr(feature = "std", error("an array bit vector needs at least one bit"))]
    ZeroLength,

    #[cfg_attr(feature = "std", error("Index {0} is out of bounds for length {1}"))]
    IndexOutOfBounds(usize, usize),

    #[cfg_attr(feature = "std", error("operation not supported on {0} bit vectors"))]
    UnsupportedMode(Mode),

    #[cfg_attr(
        feature = "std",
        error("invalid bit character {found:?} at position {position}")
    )]
    InvalidBitChar { position: usize, found: char },

    #[cfg_attr(
        feature = "std",
        error("resize to {requested} bits would cut below the stream cursor at {cursor}")
    )]
    TruncatesStream { requested: usize, cursor: usize },

    #[cfg_attr(feature = "std", error("failed to allocate {0} bytes of bit storage"))]
    AllocationFailure(usize),

    #[cfg_attr(feature = "std", error("cannot detach from an empty stream"))]
    EmptyStream,

    #[cfg_attr(feature = "std", error("short write: {actual} of {expected} bytes"))]
    ShortWrite { expected: usize, actual: usize },

    #[cfg_attr(feature = "std", error("short read: {actual} of {expected} bytes"))]
    ShortRead { expected: usize, actual: usize },

    #[cfg_attr(feature = "std", error("storage error: {0}"))]
    Store(#[cfg_attr(feature = "std", from)] StoreError),

    #[cfg_attr(feature = "std", error("malformed bit vector data: {0}"))]
    Malformed(&'static str),
}

impl BitVectorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BitVectorError::ZeroLength
            | BitVectorError::IndexOutOfBounds(..)
            | BitVectorError::UnsupportedMode(_)
            | BitVectorError::InvalidBitChar { .. }
            | BitVectorError::TruncatesStream { .. } => ErrorKind::InvalidArgument,
            BitVectorError::AllocationFailure(_) => ErrorKind::AllocationFailure,
            BitVectorError::EmptyStream => ErrorKind::EmptyStream,
            BitVectorError::ShortWrite { .. }
            | BitVectorError::ShortRead { .. }
            | BitVectorError::Store(_) => ErrorKind::Io,
            BitVectorError::Malformed(_) => ErrorKind::Malformed,
        }
    }
}

#[cfg(not(feature = "std"))]
impl From<StoreError> for BitVectorError {
    fn from(err: StoreError) -> Self {
        BitVectorError::Store(err)
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for BitVectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitVectorError::ZeroLength => write!(f, "an array bit vector needs at least one bit"),
            BitVectorError::IndexOutOfBounds(i, l) => {
                write!(f, "Index {} is out of bounds for length {}", i, l)
            }
            BitVectorError::UnsupportedMode(m) => {
                write!(f, "operation not supported on {} bit vectors", m)
            }
            BitVectorError::InvalidBitChar { position, found } => {
                write!(f, "invalid bit character {:?} at position {}", found, position)
            }
            BitVectorError::TruncatesStream { requested, cursor } => write!(
                f,
                "resize to {} bits would cut below the stream cursor at {}",
                requested, cursor
            ),
            BitVectorError::AllocationFailure(n) => {
                write!(f, "failed to allocate {} bytes of bit storage", n)
            }
            BitVectorError::EmptyStream => write!(f, "cannot detach from an empty stream"),
            BitVectorError::ShortWrite { expected, actual } => {
                write!(f, "short write: {} of {} bytes", actual, expected)
            }
            BitVectorError::ShortRead { expected, actual } => {
                write!(f, "short read: {} of {} bytes", actual, expected)
            }
            BitVectorError::Store(e) => write!(f, "storage error: {}", e),
            BitVectorError::Malformed(why) => write!(f, "malformed bit vector data: {}", why),
        }
    }
}
