//! The fixed NTPv4 header (RFC 5905, section 7.3) and its big-endian codec.
//!
//! [`Packet::encode`] and [`Packet::decode`] handle the whole 48-byte header.
//! The field types also implement the slice traits [`FromBytes`] and
//! [`ToBytes`]; with `std`, [`ReadBytes`] and [`WriteBytes`] lift those onto
//! `io::Read` and `io::Write`.

/// NTP server port number.
pub const PORT: u16 = 123;

/// Poll exponent emitted in client requests (2^6 = 64 s). Informational only; the client
/// performs single-shot queries and never paces itself by it.
pub const CLIENT_POLL: i8 = 6;

/// Precision exponent emitted in client requests (2^-20 s, about one microsecond).
pub const CLIENT_PRECISION: i8 = -20;

mod bytes;
mod traits;
mod types;

pub use self::bytes::{
    LEAP_BITS, LEAP_SHIFT, MODE_BITS, MODE_SHIFT, VERSION_BITS, VERSION_SHIFT, pack_li_vn_mode,
    unpack_li_vn_mode,
};
pub use self::traits::*;
pub use self::types::*;
