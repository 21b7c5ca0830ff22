#![no_main]
use libfuzzer_sys::fuzz_target;
use ntp_proto::protocol::{ConstPackedSizeBytes, Packet};

fuzz_target!(|data: &[u8]| {
    let Ok(buf) = <&[u8; Packet::PACKED_SIZE_BYTES]>::try_from(data) else {
        return;
    };
    let packet = Packet::decode(buf);
    assert_eq!(&packet.encode(), buf);
    assert_eq!(Packet::decode(&packet.encode()), packet);
});
