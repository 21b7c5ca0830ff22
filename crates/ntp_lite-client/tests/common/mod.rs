// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use ntp_client::Transport;
use ntp_client::protocol::{LeapIndicator, Mode, Packet, Stratum, TimestampFormat};

pub const SERVER: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 10);

/// What a [`MockTransport`] observed, shared with the test after the client takes ownership.
#[derive(Debug, Default)]
pub struct Probe {
    pub sent: RefCell<Vec<(Vec<u8>, SocketAddrV4)>>,
    pub recv_calls: Cell<usize>,
    pub closes: Cell<usize>,
    pub waited_ns: Cell<u64>,
}

/// A scripted datagram transport.
pub struct MockTransport {
    probe: Rc<Probe>,
    send_len: Option<usize>,
    send_error: Option<io::ErrorKind>,
    reply: Vec<u8>,
    source: SocketAddrV4,
}

impl MockTransport {
    /// A transport that accepts the whole request and answers with `reply` from the server.
    pub fn replying(reply: &[u8]) -> (Self, Rc<Probe>) {
        let probe = Rc::new(Probe::default());
        let transport = MockTransport {
            probe: Rc::clone(&probe),
            send_len: None,
            send_error: None,
            reply: reply.to_vec(),
            source: SocketAddrV4::new(SERVER, 123),
        };
        (transport, probe)
    }

    /// The shared observation handle.
    pub fn probe(&self) -> Rc<Probe> {
        Rc::clone(&self.probe)
    }

    /// Report `len` bytes sent regardless of the request size.
    pub fn short_send(mut self, len: usize) -> Self {
        self.send_len = Some(len);
        self
    }

    /// Fail every send with `kind`.
    pub fn failing_send(mut self, kind: io::ErrorKind) -> Self {
        self.send_error = Some(kind);
        self
    }

    /// Answer from `source` instead of the server.
    pub fn from_source(mut self, source: SocketAddrV4) -> Self {
        self.source = source;
        self
    }
}

impl Transport for MockTransport {
    fn send_to(&mut self, buf: &[u8], dest: SocketAddrV4) -> io::Result<usize> {
        if let Some(kind) = self.send_error {
            return Err(io::Error::new(kind, "scripted send failure"));
        }
        self.probe.sent.borrow_mut().push((buf.to_vec(), dest));
        Ok(self.send_len.unwrap_or(buf.len()))
    }

    fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddrV4)> {
        self.probe.recv_calls.set(self.probe.recv_calls.get() + 1);
        // Reports the full datagram length even when `buf` only holds a prefix.
        let copied = self.reply.len().min(buf.len());
        buf[..copied].copy_from_slice(&self.reply[..copied]);
        Ok((self.reply.len(), self.source))
    }

    fn close(&mut self) {
        self.probe.closes.set(self.probe.closes.get() + 1);
    }
}

/// A delay that records how long it was asked to wait instead of sleeping.
pub struct RecordingDelay(pub Rc<Probe>);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.waited_ns.set(self.0.waited_ns.get() + u64::from(ns));
    }
}

/// A well-formed server reply carrying `seconds` in its transmit timestamp.
pub fn server_reply(seconds: u32) -> [u8; 48] {
    Packet {
        leap_indicator: LeapIndicator::NoWarning,
        mode: Mode::Server,
        stratum: Stratum::SECONDARY_MIN,
        reference_id: ntp_client::protocol::ReferenceIdentifier(*b"GPS\0"),
        receive_timestamp: TimestampFormat {
            seconds: seconds.wrapping_sub(1),
            fraction: 0x4000_0000,
        },
        transmit_timestamp: TimestampFormat {
            seconds,
            fraction: 0x8000_0000,
        },
        ..Packet::client_request()
    }
    .encode()
}
