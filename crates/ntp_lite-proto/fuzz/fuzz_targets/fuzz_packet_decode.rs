#![no_main]
use libfuzzer_sys::fuzz_target;
use ntp_proto::protocol::{FromBytes, Packet};

fuzz_target!(|data: &[u8]| {
    // Arbitrary datagrams must either parse or report a short buffer.
    match Packet::from_bytes(data) {
        Ok((_, consumed)) => assert_eq!(consumed, 48),
        Err(_) => assert!(data.len() < 48),
    }
});
