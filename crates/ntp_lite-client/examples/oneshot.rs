// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

// Query one NTP server once and print the zone-adjusted result.
//
// Usage: cargo run -p ntp_lite-client --example oneshot -- <server-ipv4> [zone-hours]
//
// Set RUST_LOG=debug to see the bytes sent and received.

use std::env;
use std::error::Error;
use std::net::{Ipv4Addr, UdpSocket};
use std::time::Duration;

use ntp_client::{Client, ZonedTime};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let server: Ipv4Addr = args.next().as_deref().unwrap_or("129.6.15.28").parse()?;
    let zone_hours: i8 = args.next().as_deref().unwrap_or("0").parse()?;

    let socket = UdpSocket::bind("0.0.0.0:0")?;
    // The client itself never times out a receive.
    socket.set_read_timeout(Some(Duration::from_secs(5)))?;

    let mut client = Client::builder(server)
        .zone_hours(zone_hours)
        .build_std(Some(socket));

    let mut now = ZonedTime::default();
    match client.get_current_time(&mut now) {
        Ok(()) => {
            println!("Server:          {}", server);
            println!("NTP seconds:     {}", now.ntp_seconds());
            println!("Unix seconds:    {}", now.unix_seconds());
            println!("Local time:      {}", now);
        }
        Err(e) => {
            eprintln!("Failed to get time from {}: {}", server, e);
            return Err(e.into());
        }
    }

    Ok(())
}
