// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

mod common;

use std::io;
use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};
use std::thread;
use std::time::Duration;

use common::{MockTransport, RecordingDelay, SERVER, server_reply};
use ntp_client::protocol::{Mode, Packet};
use ntp_client::{Client, ClientBuilder, NtpError, ProtocolError, ZonedTime};
use proptest::prelude::*;

// The delay shares the transport's probe so one handle sees everything.
fn client_for(transport: MockTransport, zone: i8) -> Client<MockTransport, RecordingDelay> {
    let probe = transport.probe();
    ClientBuilder::new(SERVER)
        .zone_hours(zone)
        .build(Some(transport), RecordingDelay(probe))
}

#[test]
fn end_to_end_zone_plus_two() {
    let (transport, probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = client_for(transport, 2);

    assert_eq!(client.current_epoch_seconds(), 3_913_063_200);

    let sent = probe.sent.borrow();
    assert_eq!(sent.len(), 1);
    let (request, dest) = &sent[0];
    assert_eq!(*dest, SocketAddrV4::new(SERVER, 123));
    assert_eq!(request.len(), 48);
    let decoded = Packet::decode(<&[u8; 48]>::try_from(&request[..]).unwrap());
    assert_eq!(decoded, Packet::client_request());
    assert_eq!(decoded.mode, Mode::Client);
}

#[test]
fn waits_32_ms_between_send_and_receive() {
    let (transport, probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = client_for(transport, 0);
    client.current_epoch_seconds();
    assert_eq!(probe.waited_ns.get(), 32_000_000);
    assert_eq!(probe.recv_calls.get(), 1);
}

#[test]
fn short_receive_fails() {
    let (transport, _probe) = MockTransport::replying(&server_reply(3_913_056_000)[..20]);
    let mut client = client_for(transport, 0);

    assert_eq!(client.current_epoch_seconds(), 0);

    let mut out = ZonedTime::new(123, 4);
    let err = client.get_current_time(&mut out).unwrap_err();
    assert!(matches!(
        err,
        NtpError::Protocol(ProtocolError::ResponseSize { received: 20 })
    ));
    assert_eq!(out, ZonedTime::new(123, 4));
    assert_eq!(io::Error::from(err).kind(), io::ErrorKind::InvalidInput);
}

#[test]
fn long_receive_fails() {
    for len in [49, 68] {
        let mut reply = server_reply(3_913_056_000).to_vec();
        reply.resize(len, 0xA5);
        let (transport, _probe) = MockTransport::replying(&reply);
        let mut client = client_for(transport, 0);

        assert!(matches!(
            client.try_current_epoch_seconds(),
            Err(NtpError::Protocol(ProtocolError::ResponseSize { received })) if received == len
        ));
        assert_eq!(client.current_epoch_seconds(), 0);
    }
}

#[test]
fn long_udp_datagram_is_not_truncated_into_success() {
    let server = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let port = server.local_addr().unwrap().port();
    let responder = thread::spawn(move || {
        let mut buf = [0u8; 64];
        let (_, peer) = server.recv_from(&mut buf).unwrap();
        let mut reply = server_reply(3_913_056_000).to_vec();
        reply.extend_from_slice(&[0u8; 20]);
        server.send_to(&reply, peer).unwrap();
    });

    let sock = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    sock.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let mut client = ClientBuilder::new(Ipv4Addr::LOCALHOST)
        .port(port)
        .build_std(Some(sock));

    let result = client.try_current_epoch_seconds();
    responder.join().unwrap();
    assert!(matches!(
        result,
        Err(NtpError::Protocol(ProtocolError::ResponseSize { received: 68 }))
    ));
}

#[test]
fn short_send_skips_receive() {
    let (transport, probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = client_for(transport.short_send(47), 0);

    assert!(matches!(
        client.try_current_epoch_seconds(),
        Err(NtpError::Protocol(ProtocolError::ShortSend { sent: 47 }))
    ));
    assert_eq!(probe.recv_calls.get(), 0);
    assert_eq!(probe.waited_ns.get(), 0);
    assert_eq!(client.current_epoch_seconds(), 0);
}

#[test]
fn transport_error_passes_through() {
    let (transport, _probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = client_for(transport.failing_send(io::ErrorKind::HostUnreachable), 0);

    let err = client.current_time().unwrap_err();
    assert!(matches!(&err, NtpError::Io(e) if e.kind() == io::ErrorKind::HostUnreachable));
    assert_eq!(io::Error::from(err).kind(), io::ErrorKind::HostUnreachable);
}

#[test]
fn missing_transport_reports_bad_socket() {
    let mut client: Client<MockTransport> = Client::new(None, SERVER, 0);

    assert!(matches!(
        client.try_current_epoch_seconds(),
        Err(NtpError::BadSocket)
    ));
    assert_eq!(client.current_epoch_seconds(), 0);

    let mut out = ZonedTime::default();
    let err = client.get_current_time(&mut out).unwrap_err();
    assert!(matches!(err, NtpError::BadSocket));
    assert_eq!(out, ZonedTime::default());
    assert_eq!(io::Error::from(err).kind(), io::ErrorKind::NotConnected);
}

#[test]
fn get_current_time_writes_on_success() {
    let (transport, _probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = client_for(transport, 2);

    let mut out = ZonedTime::default();
    client.get_current_time(&mut out).unwrap();
    assert_eq!(out.ntp_seconds(), 3_913_063_200);
    assert_eq!(out.zone_hours(), 2);
    assert_eq!(out.unix_seconds(), 1_704_067_200);
    assert_eq!(out.to_string(), "2024-01-01T02:00:00+02:00");
}

#[test]
fn drop_closes_transport_once() {
    let (transport, probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = client_for(transport, 0);
    client.current_epoch_seconds();
    client.current_epoch_seconds();
    assert_eq!(probe.closes.get(), 0);
    drop(client);
    assert_eq!(probe.closes.get(), 1);
}

#[test]
fn drop_closes_after_failure() {
    let (transport, probe) = MockTransport::replying(&[]);
    {
        let mut client = client_for(transport, 0);
        assert_eq!(client.current_epoch_seconds(), 0);
    }
    assert_eq!(probe.closes.get(), 1);
}

#[test]
fn foreign_source_accepted_by_default() {
    let stranger = SocketAddrV4::new(Ipv4Addr::new(198, 51, 100, 7), 123);
    let (transport, _probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = client_for(transport.from_source(stranger), 0);
    assert_eq!(client.current_epoch_seconds(), 3_913_056_000);
}

#[test]
fn foreign_source_rejected_when_verifying() {
    let stranger = SocketAddrV4::new(Ipv4Addr::new(198, 51, 100, 7), 123);
    let (transport, probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = ClientBuilder::new(SERVER)
        .verify_source(true)
        .build(Some(transport.from_source(stranger)), RecordingDelay(probe));

    assert!(matches!(
        client.try_current_epoch_seconds(),
        Err(NtpError::Protocol(ProtocolError::UnexpectedSource { source })) if source == stranger
    ));
}

#[test]
fn verified_source_port_may_differ() {
    let (transport, probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = ClientBuilder::new(SERVER)
        .verify_source(true)
        .build(
            Some(transport.from_source(SocketAddrV4::new(SERVER, 40123))),
            RecordingDelay(probe),
        );
    assert_eq!(client.current_epoch_seconds(), 3_913_056_000);
}

#[test]
fn custom_port_and_wait() {
    let (transport, probe) = MockTransport::replying(&server_reply(3_913_056_000));
    let mut client = ClientBuilder::new(SERVER)
        .port(10123)
        .response_wait_ms(250)
        .build(Some(transport), RecordingDelay(probe.clone()));
    client.current_epoch_seconds();
    assert_eq!(probe.sent.borrow()[0].1.port(), 10123);
    assert_eq!(probe.waited_ns.get(), 250_000_000);
}

proptest! {
    #[test]
    fn zone_adjustment_is_exact(seconds in 1u32..=u32::MAX, zone in -12i8..=14) {
        let expected = i64::from(seconds) + i64::from(zone) * 3600;
        prop_assume!(expected != 0);
        let (transport, _probe) = MockTransport::replying(&server_reply(seconds));
        let mut client = client_for(transport, zone);
        prop_assert_eq!(client.current_epoch_seconds(), expected);
    }

    #[test]
    fn any_other_length_is_rejected(len in (0usize..48).prop_union(49usize..200)) {
        let mut reply = server_reply(3_913_056_000).to_vec();
        reply.resize(len, 0);
        let (transport, _probe) = MockTransport::replying(&reply);
        let mut client = client_for(transport, 0);
        prop_assert_eq!(client.current_epoch_seconds(), 0);
    }
}
