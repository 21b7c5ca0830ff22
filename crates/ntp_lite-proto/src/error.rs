// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Codec errors.
//!
//! Decoding a fixed-size header can only fail one way: the buffer is too
//! small. [`ParseError`] says by how much and needs no allocator.

use core::fmt;

/// Failure of a slice-based encode or decode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// `available` bytes were supplied where `needed` are required.
    BufferTooShort {
        /// Bytes the value occupies on the wire.
        needed: usize,
        /// Bytes the caller supplied.
        available: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ParseError::BufferTooShort { needed, available } = self;
        write!(f, "buffer too short: needed {needed} bytes, got {available}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// A short buffer surfaces as [`std::io::ErrorKind::UnexpectedEof`] with the
/// `ParseError` kept as the inner error.
#[cfg(feature = "std")]
impl From<ParseError> for std::io::Error {
    fn from(err: ParseError) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::UnexpectedEof, err)
    }
}
