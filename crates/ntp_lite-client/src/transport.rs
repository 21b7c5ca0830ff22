// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Collaborators the client drives: a datagram transport and a blocking delay.
//!
//! The client never opens sockets itself. Anything that can send and receive
//! IPv4 datagrams can stand in for the network, which is how the tests script
//! replies without touching the wire.

use std::io;
use std::net::{SocketAddr, SocketAddrV4, UdpSocket};
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::debug;

/// A datagram-oriented send/receive primitive.
pub trait Transport {
    /// Send `buf` as a single datagram to `dest`, returning the number of bytes sent.
    fn send_to(&mut self, buf: &[u8], dest: SocketAddrV4) -> io::Result<usize>;

    /// Receive a single datagram into `buf`, returning the number of bytes read and the sender.
    fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddrV4)>;

    /// Release the underlying resource. Called exactly once by the owning client.
    fn close(&mut self);
}

impl Transport for UdpSocket {
    fn send_to(&mut self, buf: &[u8], dest: SocketAddrV4) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, dest)
    }

    fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddrV4)> {
        match UdpSocket::recv_from(self, buf)? {
            (len, SocketAddr::V4(src)) => Ok((len, src)),
            (_, SocketAddr::V6(src)) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("datagram from IPv6 peer {src}"),
            )),
        }
    }

    fn close(&mut self) {
        // The descriptor itself is released when the socket is dropped.
        debug!("closing {:?}", self.local_addr());
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_to(&mut self, buf: &[u8], dest: SocketAddrV4) -> io::Result<usize> {
        (**self).send_to(buf, dest)
    }

    fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddrV4)> {
        (**self).recv_from(buf)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// [`DelayNs`] backed by `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns.into()));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}
