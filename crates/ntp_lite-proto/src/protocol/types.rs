use core::fmt;

use super::{CLIENT_POLL, CLIENT_PRECISION, ConstPackedSizeBytes};

/// 32-bit fixed point: 16 bits of seconds, 16 bits of fraction.
///
/// Carries root delay and root dispersion. The client never interprets either.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ShortFormat {
    /// Whole seconds.
    pub seconds: u16,
    /// Fraction of a second in units of 2^-16 s.
    pub fraction: u16,
}

/// 64-bit fixed point timestamp counted from 1900-01-01T00:00:00Z.
///
/// The seconds field wraps every 2^32 seconds (era 0 ends in February 2036).
/// See [`crate::unix_time`] for era-aware conversion.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimestampFormat {
    /// Whole seconds since the NTP epoch, modulo 2^32.
    pub seconds: u32,
    /// Fraction of a second in units of 2^-32 s.
    pub fraction: u32,
}

/// Leap second warning, the top two bits of the first header byte.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LeapIndicator {
    /// No warning.
    #[default]
    NoWarning = 0,
    /// The last minute of the day has 61 seconds.
    AddOne = 1,
    /// The last minute of the day has 59 seconds.
    SubOne = 2,
    /// Alarm condition: the clock is not synchronized.
    Unknown = 3,
}

impl LeapIndicator {
    /// Decode the low two bits of `bits`; higher bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => LeapIndicator::NoWarning,
            1 => LeapIndicator::AddOne,
            2 => LeapIndicator::SubOne,
            _ => LeapIndicator::Unknown,
        }
    }
}

/// Protocol version, three bits on the wire.
///
/// Any 3-bit value is accepted when decoding so that replies from older or
/// newer servers survive a decode/encode round trip unchanged.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version(pub(super) u8);

impl Version {
    /// NTPv1 (RFC 1059).
    pub const V1: Self = Version(1);
    /// NTPv2 (RFC 1119).
    pub const V2: Self = Version(2);
    /// NTPv3 (RFC 1305).
    pub const V3: Self = Version(3);
    /// NTPv4 (RFC 5905), the version this client sends.
    pub const V4: Self = Version(4);

    /// Wrap a raw version number, or `None` if it needs more than three bits.
    pub fn new(v: u8) -> Option<Self> {
        (v <= 0b111).then_some(Version(v))
    }

    /// The raw version number.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// `true` for versions 1 through 4.
    pub fn is_known(&self) -> bool {
        (1..=4).contains(&self.0)
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::V4
    }
}

/// Association mode, the low three bits of the first header byte.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// 0, reserved.
    Reserved = 0,
    /// 1, symmetric active.
    SymmetricActive = 1,
    /// 2, symmetric passive.
    SymmetricPassive = 2,
    /// 3, client. Every request this crate builds uses it.
    #[default]
    Client = 3,
    /// 4, server.
    Server = 4,
    /// 5, broadcast.
    Broadcast = 5,
    /// 6, NTP control message.
    NtpControlMessage = 6,
    /// 7, reserved for private use.
    ReservedForPrivateUse = 7,
}

impl Mode {
    /// Decode the low three bits of `bits`; higher bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Mode::Reserved,
            1 => Mode::SymmetricActive,
            2 => Mode::SymmetricPassive,
            3 => Mode::Client,
            4 => Mode::Server,
            5 => Mode::Broadcast,
            6 => Mode::NtpControlMessage,
            _ => Mode::ReservedForPrivateUse,
        }
    }
}

/// Hops from the reference clock. 0 is unspecified, 1 primary, 2-15 secondary,
/// 16 unsynchronized and anything above is reserved.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Stratum(pub u8);

impl Stratum {
    /// 0: unspecified or invalid.
    pub const UNSPECIFIED: Self = Stratum(0);
    /// 1: directly attached to a reference clock.
    pub const PRIMARY: Self = Stratum(1);
    /// Lowest secondary stratum.
    pub const SECONDARY_MIN: Self = Stratum(2);
    /// Highest secondary stratum.
    pub const SECONDARY_MAX: Self = Stratum(15);
    /// 16: unsynchronized.
    pub const UNSYNCHRONIZED: Self = Stratum(16);

    /// `true` for strata 2 through 15.
    pub fn is_secondary(&self) -> bool {
        (Self::SECONDARY_MIN..=Self::SECONDARY_MAX).contains(self)
    }
}

/// Four opaque octets naming the server's reference source, in wire order.
///
/// Nothing here depends on the stratum; the bytes are carried as-is in both
/// directions.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReferenceIdentifier(pub [u8; 4]);

impl ReferenceIdentifier {
    /// The tag placed in outgoing requests. Identifiers starting with `X` are
    /// reserved for unregistered experimentation.
    pub const CLIENT: Self = ReferenceIdentifier(*b"XNTL");

    /// The four octets in wire order.
    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }

    /// The octets read as a big-endian word.
    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Inverse of [`to_u32`](Self::to_u32).
    pub fn from_u32(word: u32) -> Self {
        ReferenceIdentifier(word.to_be_bytes())
    }
}

impl fmt::Display for ReferenceIdentifier {
    /// Printable ASCII up to the first NUL, `?` for anything else.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &b in self.0.iter().take_while(|&&b| b != 0) {
            let c = if b.is_ascii_graphic() { b as char } else { '?' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// The fixed 48-byte NTP header.
///
/// | Offset | Size | Field                          |
/// |--------|------|--------------------------------|
/// | 0      | 1    | leap / version / mode          |
/// | 1      | 1    | stratum                        |
/// | 2      | 1    | poll (log2 s, signed)          |
/// | 3      | 1    | precision (log2 s, signed)     |
/// | 4      | 4    | root delay                     |
/// | 8      | 4    | root dispersion                |
/// | 12     | 4    | reference id                   |
/// | 16     | 8    | reference timestamp            |
/// | 24     | 8    | origin timestamp               |
/// | 32     | 8    | receive timestamp              |
/// | 40     | 8    | transmit timestamp             |
///
/// All multi-byte fields are big-endian. Extension fields and MACs are not
/// part of this type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Packet {
    /// Byte 0, bits 6-7.
    pub leap_indicator: LeapIndicator,
    /// Byte 0, bits 3-5.
    pub version: Version,
    /// Byte 0, bits 0-2.
    pub mode: Mode,
    /// Byte 1.
    pub stratum: Stratum,
    /// Byte 2: maximum interval between messages, log2 seconds.
    pub poll: i8,
    /// Byte 3: system clock precision, log2 seconds.
    pub precision: i8,
    /// Round-trip delay to the reference clock.
    pub root_delay: ShortFormat,
    /// Dispersion to the reference clock.
    pub root_dispersion: ShortFormat,
    /// Reference source tag.
    pub reference_id: ReferenceIdentifier,
    /// When the sender's clock was last set.
    pub reference_timestamp: TimestampFormat,
    /// Client send time echoed by the server.
    pub origin_timestamp: TimestampFormat,
    /// Server receive time.
    pub receive_timestamp: TimestampFormat,
    /// Server send time; the only field the client reads.
    pub transmit_timestamp: TimestampFormat,
}

/// The three fields sharing the first header byte.
pub type PacketByte1 = (LeapIndicator, Version, Mode);

impl Packet {
    /// The request every query sends.
    ///
    /// Leap 3 (unsynchronized), version 4, client mode, poll 6, precision -20
    /// and [`ReferenceIdentifier::CLIENT`]. Everything else is zero, the
    /// timestamps included: the client performs no round-trip correction and
    /// so records no origin time.
    pub fn client_request() -> Self {
        Packet {
            leap_indicator: LeapIndicator::Unknown,
            version: Version::V4,
            mode: Mode::Client,
            stratum: Stratum::UNSPECIFIED,
            poll: CLIENT_POLL,
            precision: CLIENT_PRECISION,
            root_delay: ShortFormat::default(),
            root_dispersion: ShortFormat::default(),
            reference_id: ReferenceIdentifier::CLIENT,
            reference_timestamp: TimestampFormat::default(),
            origin_timestamp: TimestampFormat::default(),
            receive_timestamp: TimestampFormat::default(),
            transmit_timestamp: TimestampFormat::default(),
        }
    }
}

impl Default for Packet {
    fn default() -> Self {
        Packet::client_request()
    }
}

impl ConstPackedSizeBytes for ShortFormat {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for TimestampFormat {
    const PACKED_SIZE_BYTES: usize = 8;
}

impl ConstPackedSizeBytes for Stratum {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for ReferenceIdentifier {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for PacketByte1 {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for Packet {
    // li/vn/mode, stratum, poll, precision, two short formats, refid, four timestamps.
    const PACKED_SIZE_BYTES: usize = 4
        + 2 * ShortFormat::PACKED_SIZE_BYTES
        + ReferenceIdentifier::PACKED_SIZE_BYTES
        + 4 * TimestampFormat::PACKED_SIZE_BYTES;
}
