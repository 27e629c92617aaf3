//! Positioned read/write traits and their implementations for plain byte
//! buffers and files.
//!
//! Both traits report the number of bytes actually transferred. A count lower
//! than the buffer length is not an error at this layer.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::StoreError;

type Result<T> = core::result::Result<T, StoreError>;

/// A destination that accepts bytes at an arbitrary offset.
pub trait ByteSink {
    /// Writes `buf` starting at `offset`, returning how many bytes were taken.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize>;
}

/// A source that yields bytes from an arbitrary offset.
pub trait ByteSource {
    /// Reads into `buf` starting at `offset`, returning how many bytes were filled.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize>;

    /// Total number of bytes currently held by the source.
    fn size(&self) -> Result<u64>;
}

#[inline]
fn to_index(offset: u64) -> Result<usize> {
    usize::try_from(offset).map_err(|_| StoreError::OutOfBounds(offset))
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize> {
        (**self).write_at(buf, offset)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        (**self).read_at(buf, offset)
    }

    fn size(&self) -> Result<u64> {
        (**self).size()
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        (**self).read_at(buf, offset)
    }

    fn size(&self) -> Result<u64> {
        (**self).size()
    }
}

// Fixed-size slice: writes past the end are cut short.
impl ByteSink for [u8] {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize> {
        let start = to_index(offset)?;
        if start >= self.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.len() - start);
        self[start..start + n].copy_from_slice(&buf[..n]);
        Ok(n)
    }
}

impl ByteSource for [u8] {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        let start = to_index(offset)?;
        if start >= self.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.len() - start);
        buf[..n].copy_from_slice(&self[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> Result<u64> {
        Ok(self.len() as u64)
    }
}

// Growable buffer: a write past the end zero-fills the gap.
impl ByteSink for Vec<u8> {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize> {
        let start = to_index(offset)?;
        let end = start
            .checked_add(buf.len())
            .ok_or(StoreError::OutOfBounds(offset))?;
        if end > self.len() {
            self.resize(end, 0);
        }
        self[start..end].copy_from_slice(buf);
        Ok(buf.len())
    }
}

impl ByteSource for Vec<u8> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        self.as_slice().read_at(buf, offset)
    }

    fn size(&self) -> Result<u64> {
        Ok(self.len() as u64)
    }
}

#[cfg(feature = "std")]
mod file {
    use super::{ByteSink, ByteSource, Result};
    use std::fs::File;
    use std::io::ErrorKind;

    #[cfg(unix)]
    use std::os::unix::fs::FileExt;

    #[cfg(windows)]
    use std::os::windows::fs::FileExt;

    #[cfg(unix)]
    fn pwrite(file: &File, buf: &[u8], offset: u64) -> std::io::Result<usize> {
        FileExt::write_at(file, buf, offset)
    }

    #[cfg(windows)]
    fn pwrite(file: &File, buf: &[u8], offset: u64) -> std::io::Result<usize> {
        FileExt::seek_write(file, buf, offset)
    }

    #[cfg(unix)]
    fn pread(file: &File, buf: &mut [u8], offset: u64) -> std::io::Result<usize> {
        FileExt::read_at(file, buf, offset)
    }

    #[cfg(windows)]
    fn pread(file: &File, buf: &mut [u8], offset: u64) -> std::io::Result<usize> {
        FileExt::seek_read(file, buf, offset)
    }

    /// Keeps issuing positioned writes until the buffer is drained or the
    /// file stops accepting bytes.
    pub(crate) fn write_all_at(file: &File, buf: &[u8], offset: u64) -> Result<usize> {
        let mut done = 0;
        while done < buf.len() {
            match pwrite(file, &buf[done..], offset + done as u64) {
                Ok(0) => {
                    log::warn!("file accepted {} of {} bytes at offset {}", done, buf.len(), offset);
                    break;
                }
                Ok(n) => done += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(done)
    }

    /// Reads until the buffer is full or end-of-file.
    pub(crate) fn read_all_at(file: &File, buf: &mut [u8], offset: u64) -> Result<usize> {
        let mut done = 0;
        while done < buf.len() {
            match pread(file, &mut buf[done..], offset + done as u64) {
                Ok(0) => break,
                Ok(n) => done += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(done)
    }

    impl ByteSink for File {
        fn write_at(&mut self, buf: &[u8], offset: u64) -> Result<usize> {
            write_all_at(self, buf, offset)
        }
    }

    impl ByteSource for File {
        fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
            read_all_at(self, buf, offset)
        }

        fn size(&self) -> Result<u64> {
            Ok(self.metadata()?.len())
        }
    }
}

#[cfg(feature = "std")]
pub(crate) use file::{read_all_at, write_all_at};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_grows_and_zero_fills() -> Result<()> {
        let mut v = vec![1u8, 2];
        assert_eq!(v.write_at(&[9, 9], 4)?, 2);
        assert_eq!(v, vec![1, 2, 0, 0, 9, 9]);
        assert_eq!(v.size()?, 6);
        Ok(())
    }

    #[test]
    fn slice_sink_reports_short_write() -> Result<()> {
        let mut buf = [0u8; 4];
        assert_eq!(buf.as_mut_slice().write_at(&[7, 7, 7], 2)?, 2);
        assert_eq!(buf, [0, 0, 7, 7]);
        assert_eq!(buf.as_mut_slice().write_at(&[1], 4)?, 0);
        Ok(())
    }

    #[test]
    fn slice_source_reports_short_read() -> Result<()> {
        let data = [1u8, 2, 3];
        let mut out = [0u8; 4];
        assert_eq!(data.as_slice().read_at(&mut out, 1)?, 2);
        assert_eq!(&out[..2], &[2, 3]);
        assert_eq!(data.as_slice().read_at(&mut out, 10)?, 0);
        Ok(())
    }

    #[cfg(feature = "std")]
    #[test]
    fn file_roundtrip_at_offset() -> core::result::Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::tempfile()?;
        assert_eq!(ByteSink::write_at(&mut file, b"bits", 3)?, 4);
        assert_eq!(ByteSource::size(&file)?, 7);

        let mut out = [0u8; 8];
        assert_eq!(ByteSource::read_at(&file, &mut out, 3)?, 4);
        assert_eq!(&out[..4], b"bits");
        Ok(())
    }

    #[cfg(feature = "std")]
    #[test]
    fn file_positioned_io_stops_at_eof() -> core::result::Result<(), Box<dyn std::error::Error>> {
        let file = tempfile::tempfile()?;
        assert_eq!(write_all_at(&file, &[1, 2, 3, 4], 2)?, 4);

        let mut out = [0u8; 6];
        assert_eq!(read_all_at(&file, &mut out, 4)?, 2);
        assert_eq!(&out[..2], &[3, 4]);
        assert_eq!(read_all_at(&file, &mut out, 0)?, 6);
        assert_eq!(out, [0, 0, 1, 2, 3, 4]);
        assert_eq!(read_all_at(&file, &mut out, 6)?, 0);
        Ok(())
    }
}
