use byteorder::{BigEndian, ByteOrder};

use crate::error::ParseError;

use super::{
    ConstPackedSizeBytes, FromBytes, LeapIndicator, Mode, Packet, PacketByte1,
    ReferenceIdentifier, ShortFormat, Stratum, TimestampFormat, ToBytes, Version,
};

/// Width of the leap indicator in bits.
pub const LEAP_BITS: u8 = 2;
/// Width of the version number in bits.
pub const VERSION_BITS: u8 = 3;
/// Width of the mode in bits.
pub const MODE_BITS: u8 = 3;

/// Position of the mode's least significant bit in byte 0.
pub const MODE_SHIFT: u8 = 0;
/// Position of the version's least significant bit in byte 0.
pub const VERSION_SHIFT: u8 = MODE_SHIFT + MODE_BITS;
/// Position of the leap indicator's least significant bit in byte 0.
pub const LEAP_SHIFT: u8 = VERSION_SHIFT + VERSION_BITS;

const fn low_bits(width: u8) -> u8 {
    ((1u16 << width) - 1) as u8
}

const fn put(value: u8, width: u8, shift: u8) -> u8 {
    (value & low_bits(width)) << shift
}

const fn take(byte: u8, width: u8, shift: u8) -> u8 {
    (byte >> shift) & low_bits(width)
}

/// Combine leap indicator, version and mode into header byte 0.
///
/// Only the low three bits of the version are kept.
pub const fn pack_li_vn_mode(li: LeapIndicator, vn: Version, mode: Mode) -> u8 {
    put(li as u8, LEAP_BITS, LEAP_SHIFT)
        | put(vn.0, VERSION_BITS, VERSION_SHIFT)
        | put(mode as u8, MODE_BITS, MODE_SHIFT)
}

/// Split header byte 0 into leap indicator, version and mode.
pub const fn unpack_li_vn_mode(byte: u8) -> PacketByte1 {
    (
        LeapIndicator::from_bits(take(byte, LEAP_BITS, LEAP_SHIFT)),
        Version(take(byte, VERSION_BITS, VERSION_SHIFT)),
        Mode::from_bits(take(byte, MODE_BITS, MODE_SHIFT)),
    )
}

// Field offsets within the header.
const STRATUM_AT: usize = 1;
const POLL_AT: usize = 2;
const PRECISION_AT: usize = 3;
const ROOT_DELAY_AT: usize = 4;
const ROOT_DISPERSION_AT: usize = 8;
const REFERENCE_ID_AT: usize = 12;
const REFERENCE_TS_AT: usize = 16;
const ORIGIN_TS_AT: usize = 24;
const RECEIVE_TS_AT: usize = 32;
const TRANSMIT_TS_AT: usize = 40;

fn need<T: ConstPackedSizeBytes>(buf: &[u8]) -> Result<(), ParseError> {
    if buf.len() < T::PACKED_SIZE_BYTES {
        return Err(ParseError::BufferTooShort {
            needed: T::PACKED_SIZE_BYTES,
            available: buf.len(),
        });
    }
    Ok(())
}

impl ShortFormat {
    fn read_at(buf: &[u8]) -> Self {
        ShortFormat {
            seconds: BigEndian::read_u16(&buf[0..2]),
            fraction: BigEndian::read_u16(&buf[2..4]),
        }
    }

    fn write_at(&self, buf: &mut [u8]) {
        BigEndian::write_u16(&mut buf[0..2], self.seconds);
        BigEndian::write_u16(&mut buf[2..4], self.fraction);
    }
}

impl TimestampFormat {
    fn read_at(buf: &[u8]) -> Self {
        TimestampFormat {
            seconds: BigEndian::read_u32(&buf[0..4]),
            fraction: BigEndian::read_u32(&buf[4..8]),
        }
    }

    fn write_at(&self, buf: &mut [u8]) {
        BigEndian::write_u32(&mut buf[0..4], self.seconds);
        BigEndian::write_u32(&mut buf[4..8], self.fraction);
    }
}

impl Packet {
    /// Serialize into the 48-byte wire form.
    pub fn encode(&self) -> [u8; Packet::PACKED_SIZE_BYTES] {
        let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
        buf[0] = pack_li_vn_mode(self.leap_indicator, self.version, self.mode);
        buf[STRATUM_AT] = self.stratum.0;
        buf[POLL_AT] = self.poll as u8;
        buf[PRECISION_AT] = self.precision as u8;
        self.root_delay.write_at(&mut buf[ROOT_DELAY_AT..]);
        self.root_dispersion.write_at(&mut buf[ROOT_DISPERSION_AT..]);
        buf[REFERENCE_ID_AT..REFERENCE_ID_AT + 4].copy_from_slice(&self.reference_id.0);
        self.reference_timestamp.write_at(&mut buf[REFERENCE_TS_AT..]);
        self.origin_timestamp.write_at(&mut buf[ORIGIN_TS_AT..]);
        self.receive_timestamp.write_at(&mut buf[RECEIVE_TS_AT..]);
        self.transmit_timestamp.write_at(&mut buf[TRANSMIT_TS_AT..]);
        buf
    }

    /// Parse a 48-byte wire buffer.
    ///
    /// Every bit pattern is a valid header, so this cannot fail. A datagram
    /// of any other length must be rejected before calling it.
    pub fn decode(buf: &[u8; Packet::PACKED_SIZE_BYTES]) -> Packet {
        let (leap_indicator, version, mode) = unpack_li_vn_mode(buf[0]);
        let mut reference_id = [0u8; 4];
        reference_id.copy_from_slice(&buf[REFERENCE_ID_AT..REFERENCE_ID_AT + 4]);
        Packet {
            leap_indicator,
            version,
            mode,
            stratum: Stratum(buf[STRATUM_AT]),
            poll: buf[POLL_AT] as i8,
            precision: buf[PRECISION_AT] as i8,
            root_delay: ShortFormat::read_at(&buf[ROOT_DELAY_AT..]),
            root_dispersion: ShortFormat::read_at(&buf[ROOT_DISPERSION_AT..]),
            reference_id: ReferenceIdentifier(reference_id),
            reference_timestamp: TimestampFormat::read_at(&buf[REFERENCE_TS_AT..]),
            origin_timestamp: TimestampFormat::read_at(&buf[ORIGIN_TS_AT..]),
            receive_timestamp: TimestampFormat::read_at(&buf[RECEIVE_TS_AT..]),
            transmit_timestamp: TimestampFormat::read_at(&buf[TRANSMIT_TS_AT..]),
        }
    }
}

// Slice codec. Each impl checks the length once, then uses the infallible
// accessors above.

impl FromBytes for ShortFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        need::<Self>(buf)?;
        Ok((Self::read_at(buf), Self::PACKED_SIZE_BYTES))
    }
}

impl ToBytes for ShortFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        need::<Self>(buf)?;
        self.write_at(buf);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl FromBytes for TimestampFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        need::<Self>(buf)?;
        Ok((Self::read_at(buf), Self::PACKED_SIZE_BYTES))
    }
}

impl ToBytes for TimestampFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        need::<Self>(buf)?;
        self.write_at(buf);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl FromBytes for Stratum {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        need::<Self>(buf)?;
        Ok((Stratum(buf[0]), 1))
    }
}

impl ToBytes for Stratum {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        need::<Self>(buf)?;
        buf[0] = self.0;
        Ok(1)
    }
}

impl FromBytes for ReferenceIdentifier {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        need::<Self>(buf)?;
        Ok((Self::from_u32(BigEndian::read_u32(buf)), 4))
    }
}

impl ToBytes for ReferenceIdentifier {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        need::<Self>(buf)?;
        BigEndian::write_u32(&mut buf[..4], self.to_u32());
        Ok(4)
    }
}

impl FromBytes for PacketByte1 {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        need::<Self>(buf)?;
        Ok((unpack_li_vn_mode(buf[0]), 1))
    }
}

impl ToBytes for PacketByte1 {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        need::<Self>(buf)?;
        let (li, vn, mode) = *self;
        buf[0] = pack_li_vn_mode(li, vn, mode);
        Ok(1)
    }
}

impl FromBytes for Packet {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        let head = buf
            .first_chunk::<{ Packet::PACKED_SIZE_BYTES }>()
            .ok_or(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            })?;
        Ok((Packet::decode(head), Self::PACKED_SIZE_BYTES))
    }
}

impl ToBytes for Packet {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        need::<Self>(buf)?;
        buf[..Self::PACKED_SIZE_BYTES].copy_from_slice(&self.encode());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}
