// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::net::{Ipv4Addr, SocketAddrV4};

use embedded_hal::delay::DelayNs;

use crate::client::Client;
use crate::protocol;
use crate::transport::{StdDelay, Transport};

/// Default wait between sending the request and reading the reply, in milliseconds.
pub const DEFAULT_RESPONSE_WAIT_MS: u32 = 32;

/// Immutable settings of a [`Client`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    /// Server address.
    pub server: Ipv4Addr,
    /// Server port (default: 123).
    pub port: u16,
    /// Offset added to the server time, in whole hours. Not range-checked.
    pub zone_hours: i8,
    /// Fixed wait before reading the reply, in milliseconds (default: 32).
    pub response_wait_ms: u32,
    /// Reject replies whose source IP differs from `server` (default: off).
    pub verify_source: bool,
}

impl ClientConfig {
    /// Configuration for `server` with every other field at its default.
    pub fn new(server: impl Into<Ipv4Addr>) -> Self {
        ClientConfig {
            server: server.into(),
            port: protocol::PORT,
            zone_hours: 0,
            response_wait_ms: DEFAULT_RESPONSE_WAIT_MS,
            verify_source: false,
        }
    }

    /// The destination of every request.
    pub fn server_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.server, self.port)
    }

    /// The zone offset in seconds.
    pub fn zone_offset_seconds(&self) -> i64 {
        i64::from(self.zone_hours) * 3600
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// ```no_run
/// use std::net::{Ipv4Addr, UdpSocket};
///
/// use ntp_client::Client;
///
/// let socket = UdpSocket::bind("0.0.0.0:0")?;
/// let mut client = Client::builder(Ipv4Addr::new(192, 168, 1, 10))
///     .zone_hours(-5)
///     .verify_source(true)
///     .build_std(Some(socket));
/// let seconds = client.try_current_epoch_seconds()?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Start a builder for `server`.
    pub fn new(server: impl Into<Ipv4Addr>) -> Self {
        ClientBuilder {
            config: ClientConfig::new(server),
        }
    }

    /// Set the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the time-zone offset in whole hours.
    pub fn zone_hours(mut self, hours: i8) -> Self {
        self.config.zone_hours = hours;
        self
    }

    /// Set the fixed wait between send and receive.
    pub fn response_wait_ms(mut self, ms: u32) -> Self {
        self.config.response_wait_ms = ms;
        self
    }

    /// Enable or disable source address validation of replies.
    pub fn verify_source(mut self, enable: bool) -> Self {
        self.config.verify_source = enable;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> ClientConfig {
        self.config
    }

    /// Build a client driving `transport` and waiting with `delay`.
    ///
    /// A `None` transport yields a client whose every operation fails with
    /// [`NtpError::BadSocket`](crate::NtpError::BadSocket).
    pub fn build<T: Transport, D: DelayNs>(self, transport: Option<T>, delay: D) -> Client<T, D> {
        Client::with_config(transport, self.config, delay)
    }

    /// Build a client that waits with [`StdDelay`].
    pub fn build_std<T: Transport>(self, transport: Option<T>) -> Client<T> {
        self.build(transport, StdDelay)
    }
}
