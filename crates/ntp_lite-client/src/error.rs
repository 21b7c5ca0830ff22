// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for the time client.
//!
//! Client operations return `Result<_, NtpError>`. `NtpError` converts into
//! `io::Error` via `From<NtpError> for io::Error`, so callers working in
//! `io::Result` can use `?` directly and still recover the typed error by
//! downcasting through `io::Error::get_ref()`:
//!
//! ```no_run
//! use std::io;
//! use std::net::{Ipv4Addr, UdpSocket};
//!
//! use ntp_client::Client;
//! use ntp_client::error::{NtpError, ProtocolError};
//!
//! fn fetch() -> io::Result<i64> {
//!     let socket = UdpSocket::bind("0.0.0.0:0")?;
//!     let mut client = Client::new(Some(socket), Ipv4Addr::new(192, 168, 1, 1), 0);
//!     Ok(client.try_current_epoch_seconds()?)
//! }
//!
//! if let Err(e) = fetch() {
//!     match e.get_ref().and_then(|inner| inner.downcast_ref::<NtpError>()) {
//!         Some(NtpError::Protocol(ProtocolError::ResponseSize { received })) => {
//!             eprintln!("server replied with {received} bytes")
//!         }
//!         Some(other) => eprintln!("NTP error: {other}"),
//!         None => eprintln!("I/O error: {e}"),
//!     }
//! }
//! ```

// Re-export proto error types.
pub use ntp_proto::error::ParseError;

use std::fmt;
use std::io;
use std::net::SocketAddrV4;

use crate::protocol::{ConstPackedSizeBytes, Packet};

/// Errors that can occur during a time request.
#[derive(Debug)]
pub enum NtpError {
    /// The exchange completed at the transport level but the reply was rejected.
    Protocol(ProtocolError),
    /// The client was constructed without a transport.
    BadSocket,
    /// Underlying transport failure.
    Io(io::Error),
}

/// Protocol-level rejections of a single exchange.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProtocolError {
    /// The transport sent a different number of bytes than the encoded request.
    ShortSend {
        /// Number of bytes the transport reported as sent.
        sent: usize,
    },
    /// The reply was not exactly one packet long.
    ResponseSize {
        /// Number of bytes received.
        received: usize,
    },
    /// The reply came from an address other than the configured server.
    UnexpectedSource {
        /// Address the reply came from.
        source: SocketAddrV4,
    },
    /// The zone-adjusted transmit time is zero, which is reserved for "no time".
    ZeroTime,
}

// ── Display implementations ─────────────────────────────────────────

impl fmt::Display for NtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NtpError::Protocol(e) => write!(f, "NTP protocol error: {e}"),
            NtpError::BadSocket => write!(f, "bad socket: client has no transport"),
            NtpError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::ShortSend { sent } => write!(
                f,
                "request not fully sent ({sent} of {} bytes)",
                Packet::PACKED_SIZE_BYTES
            ),
            ProtocolError::ResponseSize { received } => write!(
                f,
                "NTP response has wrong size ({received} bytes, expected {})",
                Packet::PACKED_SIZE_BYTES
            ),
            ProtocolError::UnexpectedSource { source } => {
                write!(f, "response from unexpected source address {source}")
            }
            ProtocolError::ZeroTime => write!(f, "server time resolves to zero"),
        }
    }
}

// ── Error trait implementations ─────────────────────────────────────

impl std::error::Error for NtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NtpError::Protocol(e) => Some(e),
            NtpError::Io(e) => Some(e),
            NtpError::BadSocket => None,
        }
    }
}

impl std::error::Error for ProtocolError {}

// ── From conversions ────────────────────────────────────────────────

impl From<NtpError> for io::Error {
    fn from(err: NtpError) -> io::Error {
        let kind = match &err {
            NtpError::Protocol(_) => io::ErrorKind::InvalidInput,
            NtpError::BadSocket => io::ErrorKind::NotConnected,
            NtpError::Io(e) => e.kind(),
        };
        // Preserve the original io::Error directly for the Io variant.
        if let NtpError::Io(e) = err {
            return e;
        }
        io::Error::new(kind, err)
    }
}

impl From<io::Error> for NtpError {
    fn from(err: io::Error) -> NtpError {
        NtpError::Io(err)
    }
}

impl From<ProtocolError> for NtpError {
    fn from(err: ProtocolError) -> NtpError {
        NtpError::Protocol(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
