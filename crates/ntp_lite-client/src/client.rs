// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv4Addr;

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::config::{ClientBuilder, ClientConfig};
use crate::error::{NtpError, ProtocolError};
use crate::protocol::{ConstPackedSizeBytes, Packet, ReadBytes};
use crate::time::ZonedTime;
use crate::transport::{StdDelay, Transport};

// Large enough that an oversized reply is seen as oversized instead of truncated.
const RECV_BUF_BYTES: usize = 1024;

/// A single-shot SNTP client.
///
/// Owns its transport exclusively and closes it exactly once when dropped.
/// Calls are independent: every one performs a full send, wait and receive
/// cycle, and nothing is carried over between them.
pub struct Client<T: Transport, D: DelayNs = StdDelay> {
    transport: Option<T>,
    config: ClientConfig,
    delay: D,
}

impl<T: Transport> Client<T> {
    /// Create a client for `server` with a zone offset of `zone_hours`.
    ///
    /// Pass `None` for `transport` to get a client that reports
    /// [`NtpError::BadSocket`] from every operation.
    pub fn new(transport: Option<T>, server: impl Into<Ipv4Addr>, zone_hours: i8) -> Self {
        let mut config = ClientConfig::new(server);
        config.zone_hours = zone_hours;
        Client::with_config(transport, config, StdDelay)
    }
}

impl Client<std::net::UdpSocket> {
    /// Start building a client for `server`.
    pub fn builder(server: impl Into<Ipv4Addr>) -> ClientBuilder {
        ClientBuilder::new(server)
    }
}

impl<T: Transport, D: DelayNs> Client<T, D> {
    /// Create a client from a complete configuration.
    pub fn with_config(transport: Option<T>, config: ClientConfig, delay: D) -> Self {
        Client {
            transport,
            config,
            delay,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a transport is attached.
    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Perform one request/response exchange and return the decoded reply.
    ///
    /// The request is sent, the configured wait elapses unconditionally and
    /// then one datagram is read. The reply is accepted only if it is exactly
    /// one packet long (and, with `verify_source`, came from the server).
    pub fn exchange(&mut self) -> Result<Packet, NtpError> {
        let transport = self.transport.as_mut().ok_or(NtpError::BadSocket)?;
        let server = self.config.server_addr();

        let request = Packet::client_request().encode();
        let sent = transport.send_to(&request, server)?;
        debug!("sent: {} bytes to {}", sent, server);
        if sent != Packet::PACKED_SIZE_BYTES {
            return Err(ProtocolError::ShortSend { sent }.into());
        }

        self.delay.delay_ms(self.config.response_wait_ms);

        let mut recv_buf = [0u8; RECV_BUF_BYTES];
        let (received, source) = transport.recv_from(&mut recv_buf[..])?;
        debug!("recv: {} bytes from {}", received, source);
        if received != Packet::PACKED_SIZE_BYTES {
            return Err(ProtocolError::ResponseSize { received }.into());
        }
        if self.config.verify_source && *source.ip() != self.config.server {
            return Err(ProtocolError::UnexpectedSource { source }.into());
        }

        Ok((&recv_buf[..received]).read_bytes::<Packet>()?)
    }

    /// The server's transmit seconds plus the zone offset, in NTP epoch seconds.
    ///
    /// No epoch translation is applied. A result of exactly zero is reported
    /// as [`ProtocolError::ZeroTime`].
    pub fn try_current_epoch_seconds(&mut self) -> Result<i64, NtpError> {
        let reply = self.exchange()?;
        let seconds =
            i64::from(reply.transmit_timestamp.seconds) + self.config.zone_offset_seconds();
        debug!(
            "transmit: {} s, zone {:+} h, result {}",
            reply.transmit_timestamp.seconds, self.config.zone_hours, seconds
        );
        if seconds == 0 {
            return Err(ProtocolError::ZeroTime.into());
        }
        Ok(seconds)
    }

    /// Sentinel form of [`try_current_epoch_seconds`](Self::try_current_epoch_seconds).
    ///
    /// Returns `0` on any failure, including a missing transport.
    pub fn current_epoch_seconds(&mut self) -> i64 {
        match self.try_current_epoch_seconds() {
            Ok(seconds) => seconds,
            Err(e) => {
                warn!("time request failed: {}", e);
                0
            }
        }
    }

    /// Fetch the current zone-adjusted time.
    pub fn current_time(&mut self) -> Result<ZonedTime, NtpError> {
        let seconds = self.try_current_epoch_seconds()?;
        Ok(ZonedTime::new(seconds, self.config.zone_hours))
    }

    /// Fetch the current time into `out`.
    ///
    /// `out` is written only on success. Converted to `io::Error`, protocol
    /// failures carry [`std::io::ErrorKind::InvalidInput`].
    pub fn get_current_time(&mut self, out: &mut ZonedTime) -> Result<(), NtpError> {
        *out = self.current_time()?;
        Ok(())
    }
}

impl<T: Transport, D: DelayNs> Drop for Client<T, D> {
    fn drop(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            debug!("closing transport");
            transport.close();
        }
    }
}
