//! Loading and writing whole ROM images.
//!
//! The image is read into memory in one piece, patched in place and written
//! back in one piece. Its length never changes in between.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

/// Smallest image that still has a size byte and a legacy correction byte.
pub const MIN_IMAGE_LEN: usize = 5;

/// Offset of the size byte (count of 512-byte blocks) in the ROM header.
pub const SIZE_BYTE_OFFSET: usize = 2;

/// Unit of the size byte.
pub const BLOCK_SIZE: usize = 512;

/// An in-memory ROM image of at least [`MIN_IMAGE_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    bytes: Vec<u8>,
}

impl RomImage {
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < MIN_IMAGE_LEN {
            return Err(Error::BufferTooShort {
                len: bytes.len(),
                min: MIN_IMAGE_LEN,
            });
        }
        Ok(RomImage { bytes })
    }

    /// Read the whole file at `path`.
    ///
    /// The expected length comes from the file's metadata; reading fewer
    /// bytes than that is an error rather than a shorter image.
    pub fn load(path: &Path) -> Result<Self> {
        let unavailable = |source| Error::InputUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let expected = fs::metadata(path).map_err(unavailable)?.len();
        tracing::info!("image size is {} bytes", expected);
        if expected < MIN_IMAGE_LEN as u64 {
            return Err(Error::BufferTooShort {
                len: expected as usize,
                min: MIN_IMAGE_LEN,
            });
        }

        let file = File::open(path).map_err(unavailable)?;
        Self::new(read_exact_len(file, expected, path)?)
    }

    /// Write the whole image to `path`, creating or truncating it.
    ///
    /// `mode` sets Unix permission bits on a newly created file (still
    /// subject to the umask); it is ignored elsewhere.
    pub fn write_to(&self, path: &Path, mode: Option<u32>) -> Result<()> {
        let mut options = File::options();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            if let Some(mode) = mode {
                options.mode(mode);
            }
        }
        #[cfg(not(unix))]
        let _ = mode;

        let mut file = options.open(path).map_err(|source| Error::OutputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        write_counted(&mut file, &self.bytes, path)?;
        tracing::debug!("wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Byte at [`SIZE_BYTE_OFFSET`].
    pub fn size_byte(&self) -> u8 {
        self.bytes[SIZE_BYTE_OFFSET]
    }

    /// ROM code size declared by the header: size byte times [`BLOCK_SIZE`].
    pub fn declared_size(&self) -> usize {
        usize::from(self.size_byte()) * BLOCK_SIZE
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Read `expected` bytes from `reader`; fewer is [`Error::InputTruncated`].
fn read_exact_len<R: Read>(reader: R, expected: u64, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(expected as usize);
    reader
        .take(expected)
        .read_to_end(&mut bytes)
        .map_err(|source| Error::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    let actual = bytes.len() as u64;
    if actual != expected {
        return Err(Error::InputTruncated {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(bytes)
}

/// Write all of `bytes` and flush. A writer that stops accepting bytes or
/// fails midway yields [`Error::OutputTruncated`] with the count so far.
fn write_counted<W: Write>(writer: &mut W, bytes: &[u8], path: &Path) -> Result<()> {
    let expected = bytes.len() as u64;
    let truncated = |written: usize, source: Option<io::Error>| Error::OutputTruncated {
        path: path.to_path_buf(),
        expected,
        written: written as u64,
        source,
    };

    let mut written = 0usize;
    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => return Err(truncated(written, None)),
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(truncated(written, Some(e))),
        }
    }
    writer.flush().map_err(|e| truncated(written, Some(e)))
}
