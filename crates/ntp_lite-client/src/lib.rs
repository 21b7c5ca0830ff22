// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/*!
Minimal single-shot SNTP client.

A [`Client`] owns a datagram [`Transport`], a configured IPv4 server and a
time-zone offset in whole hours. Each call sends one 48-byte NTPv4 request,
waits a fixed interval, reads one reply and returns the server's transmit
seconds shifted by the zone offset. There is no retry, no clock filtering and
no round-trip correction.

# Example

```rust,no_run
use std::net::{Ipv4Addr, UdpSocket};
use std::time::Duration;

use ntp_client::Client;

fn main() -> std::io::Result<()> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.set_read_timeout(Some(Duration::from_secs(5)))?;

    let mut client = Client::new(Some(socket), Ipv4Addr::new(129, 6, 15, 28), 2);
    let now = client.current_time()?;
    println!("NTP seconds (UTC+2): {}", now.ntp_seconds());
    if let Some(local) = now.to_local() {
        println!("{}", local);
    }
    Ok(())
}
```

Callers that only want the legacy contract can use
[`Client::current_epoch_seconds`], which returns `0` on any failure.
*/

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Re-export protocol types from ntp_proto for convenience.
pub use ntp_proto::{protocol, unix_time};

/// The single-shot time client.
pub mod client;

/// Client configuration and builder.
pub mod config;

/// Error types for the time client.
pub mod error;

/// Zone-adjusted time values returned by the client.
pub mod time;

/// Datagram transport and delay collaborators.
pub mod transport;

pub use client::Client;
pub use config::{ClientBuilder, ClientConfig};
pub use error::{NtpError, ProtocolError};
pub use time::ZonedTime;
pub use transport::{StdDelay, Transport};
