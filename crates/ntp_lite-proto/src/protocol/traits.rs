#[cfg(feature = "std")]
use std::io;

use crate::error::ParseError;

/// Wire size known at compile time.
pub trait ConstPackedSizeBytes {
    /// Number of bytes the type occupies on the wire.
    const PACKED_SIZE_BYTES: usize;
}

/// Decode from the front of a byte slice.
///
/// Works without `std` and without allocation.
pub trait FromBytes: Sized {
    /// Returns the value and the number of bytes consumed. Trailing bytes are
    /// left untouched.
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError>;
}

/// Encode into the front of a byte slice.
///
/// Works without `std` and without allocation.
pub trait ToBytes {
    /// Returns the number of bytes written, or [`ParseError::BufferTooShort`]
    /// without writing anything if `buf` cannot hold the value.
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError>;
}

// Largest fixed-size type; sizes the scratch buffer of the stream adapters.
#[cfg(feature = "std")]
const SCRATCH_BYTES: usize = 48;

/// Read fixed-size protocol values from any [`io::Read`].
///
/// Implemented for every reader. Requires the `std` feature.
#[cfg(feature = "std")]
pub trait ReadBytes: io::Read {
    /// Read exactly one `P` in network byte order.
    fn read_bytes<P: FromBytes + ConstPackedSizeBytes>(&mut self) -> io::Result<P> {
        let mut scratch = [0u8; SCRATCH_BYTES];
        let buf = scratch
            .get_mut(..P::PACKED_SIZE_BYTES)
            .ok_or_else(|| io::Error::from(io::ErrorKind::InvalidInput))?;
        self.read_exact(buf)?;
        let (value, _) = P::from_bytes(buf)?;
        Ok(value)
    }
}

#[cfg(feature = "std")]
impl<R: io::Read + ?Sized> ReadBytes for R {}

/// Write fixed-size protocol values to any [`io::Write`].
///
/// Implemented for every writer. Requires the `std` feature.
#[cfg(feature = "std")]
pub trait WriteBytes: io::Write {
    /// Write one `P` in network byte order.
    fn write_bytes<P: ToBytes + ConstPackedSizeBytes>(&mut self, value: &P) -> io::Result<()> {
        let mut scratch = [0u8; SCRATCH_BYTES];
        let buf = scratch
            .get_mut(..P::PACKED_SIZE_BYTES)
            .ok_or_else(|| io::Error::from(io::ErrorKind::InvalidInput))?;
        let written = value.to_bytes(buf)?;
        self.write_all(&buf[..written])
    }
}

#[cfg(feature = "std")]
impl<W: io::Write + ?Sized> WriteBytes for W {}
