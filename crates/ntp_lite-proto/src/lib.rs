// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! NTP packet codec for minimal single-shot time clients.
//!
//! This crate provides the fixed 48-byte NTPv4 header (RFC 5905, fig. 8) and
//! its conversion to and from network byte order. Extension fields and
//! message authentication codes are not supported.
//!
//! The slice-based [`protocol::FromBytes`] / [`protocol::ToBytes`] traits and
//! [`protocol::Packet::encode`] / [`protocol::Packet::decode`] work without
//! `std` and without an allocator.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Error type for buffer-based NTP packet parsing and serialization.
pub mod error;

/// NTP protocol types and constants (RFC 5905).
pub mod protocol;

/// Unix time conversion utilities for NTP timestamps.
pub mod unix_time;
