//! Concrete backends behind [`ByteSink`] and [`ByteSource`].
//!
//! ```rust
//! use byte_store::storage::Storage;
//! use byte_store::{ByteSink, ByteSource};
//!
//! let mut storage = Storage::new_in_memory();
//! storage.write_at(&[0xAB], 2).unwrap();
//! assert_eq!(storage.size().unwrap(), 3);
//! assert_eq!(storage.as_bytes(), Some(&[0u8, 0, 0xAB][..]));
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::{fs::File, path::Path};

#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapMut};

use crate::{ByteSink, ByteSource, StoreError};

/// The backing store a bit vector is written to or read from.
///
/// - Always includes an in-memory `Vec<u8>`
/// - Includes an open file when feature = "std"
/// - Includes mmap only when feature = "mmap"
#[derive(Debug)]
pub enum Storage {
    /// Growable in-memory buffer
    InMemory(Vec<u8>),

    /// Open file, accessed with positioned reads and writes
    #[cfg(feature = "std")]
    File(File),

    /// Read-only memory mapped file
    #[cfg(feature = "mmap")]
    MmapReadOnly(Mmap),

    /// Read-write memory mapped file (fixed length)
    #[cfg(feature = "mmap")]
    MmapReadWrite(MmapMut),
}

impl Storage {
    /// Create empty in-memory storage
    pub fn new_in_memory() -> Self {
        Storage::InMemory(Vec::new())
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Storage::InMemory(bytes)
    }

    /// Create (or truncate) a file for writing and reading.
    #[cfg(feature = "std")]
    pub fn create_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Storage::File(file))
    }

    /// Open an existing file read-only.
    #[cfg(feature = "std")]
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Storage::File(File::open(path)?))
    }

    #[cfg(feature = "mmap")]
    pub fn from_mmap_readonly<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Storage::MmapReadOnly(mmap))
    }

    #[cfg(feature = "mmap")]
    pub fn from_mmap_readwrite<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::options().read(true).write(true).open(path)?;
        let mmap = unsafe { MmapMut::map_mut(&file)? };
        Ok(Storage::MmapReadWrite(mmap))
    }

    /// Byte view of the store, when it lives in addressable memory.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Storage::InMemory(vec) => Some(vec.as_slice()),

            #[cfg(feature = "std")]
            Storage::File(_) => None,

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(m) => Some(m.as_ref()),

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(m) => Some(m.as_ref()),
        }
    }

    /// Push pending writes down to the file, where there is one.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        match self {
            Storage::InMemory(_) => Ok(()),

            #[cfg(feature = "std")]
            Storage::File(f) => Ok(f.sync_data()?),

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(_) => Ok(()),

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(m) => Ok(m.flush()?),
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new_in_memory()
    }
}

impl ByteSink for Storage {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize, StoreError> {
        match self {
            Storage::InMemory(vec) => vec.write_at(buf, offset),

            #[cfg(feature = "std")]
            Storage::File(f) => crate::sink::write_all_at(f, buf, offset),

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(_) => Err(StoreError::ReadOnly),

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(m) => m[..].write_at(buf, offset),
        }
    }
}

impl ByteSource for Storage {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize, StoreError> {
        match self {
            Storage::InMemory(vec) => vec.read_at(buf, offset),

            #[cfg(feature = "std")]
            Storage::File(f) => crate::sink::read_all_at(f, buf, offset),

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(m) => m[..].read_at(buf, offset),

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(m) => m[..].read_at(buf, offset),
        }
    }

    fn size(&self) -> Result<u64, StoreError> {
        match self {
            Storage::InMemory(vec) => Ok(vec.len() as u64),

            #[cfg(feature = "std")]
            Storage::File(f) => Ok(f.metadata()?.len()),

            #[cfg(feature = "mmap")]
            Storage::MmapReadOnly(m) => Ok(m.len() as u64),

            #[cfg(feature = "mmap")]
            Storage::MmapReadWrite(m) => Ok(m.len() as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_basic_operations() -> Result<(), StoreError> {
        let mut storage = Storage::new_in_memory();
        assert_eq!(storage.size()?, 0);

        assert_eq!(storage.write_at(&[1, 2, 3], 0)?, 3);
        assert_eq!(storage.write_at(&[4], 5)?, 1);
        assert_eq!(storage.as_bytes(), Some(&[1u8, 2, 3, 0, 0, 4][..]));

        let mut out = [0u8; 2];
        assert_eq!(storage.read_at(&mut out, 1)?, 2);
        assert_eq!(out, [2, 3]);
        Ok(())
    }

    #[cfg(feature = "std")]
    #[test]
    fn file_operations() -> Result<(), StoreError> {
        let tmp = tempfile::NamedTempFile::new()?;

        let mut storage = Storage::create_file(tmp.path())?;
        assert_eq!(storage.write_at(b"0110", 2)?, 4);
        storage.flush()?;
        assert!(storage.as_bytes().is_none());

        let reopened = Storage::open_file(tmp.path())?;
        assert_eq!(reopened.size()?, 6);
        let mut out = [0u8; 4];
        assert_eq!(reopened.read_at(&mut out, 2)?, 4);
        assert_eq!(&out, b"0110");
        Ok(())
    }

    #[cfg(feature = "mmap")]
    #[test]
    fn mmap_readwrite_is_fixed_length() -> Result<(), StoreError> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new()?;
        file.write_all(&[0u8; 4])?;
        file.flush()?;

        let mut storage = Storage::from_mmap_readwrite(file.path())?;
        assert_eq!(storage.write_at(&[9, 9, 9], 2)?, 2);
        storage.flush()?;

        let ro = Storage::from_mmap_readonly(file.path())?;
        assert_eq!(ro.as_bytes(), Some(&[0u8, 0, 9, 9][..]));
        Ok(())
    }

    #[cfg(feature = "mmap")]
    #[test]
    fn mmap_readonly_rejects_writes() -> Result<(), StoreError> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new()?;
        file.write_all(&[1u8, 2])?;
        file.flush()?;

        let mut ro = Storage::from_mmap_readonly(file.path())?;
        assert!(matches!(ro.write_at(&[0], 0), Err(StoreError::ReadOnly)));
        Ok(())
    }
}
