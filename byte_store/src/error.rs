#[cfg(feature = "std")]
use thiserror::Error;

/// Byte store errors
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug)]
pub enum StoreError {
    /// IO error (only available in std builds)
    #[cfg(feature = "std")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Offset does not fit the backing store's address space
    #[cfg_attr(feature = "std", error("Offset {0} out of bounds"))]
    OutOfBounds(u64),

    #[cfg_attr(feature = "std", error("storage is read-only"))]
    ReadOnly,
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::OutOfBounds(o) => write!(f, "Offset {} out of bounds", o),
            StoreError::ReadOnly => write!(f, "storage is read-only"),
        }
    }
}
