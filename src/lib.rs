//! # espat - ESP8266 AT driver
//!
//! A Rust driver for ESP8266 WiFi modems controlled over their serial AT
//! command set, with a minimal HTTP client layered on the modem's built-in
//! TCP socket commands. The library is designed for embedded systems and
//! supports `no_std` environments.
//!
//! ## Features
//!
//! ### AT transaction engine
//! - One send/settle/wait/drain/classify cycle per command
//! - Per-command settle delay and timeout budgets
//! - Replies classified against the modem's fixed terminator literals
//!
//! ### WiFi management
//! - Mode queries and configuration (station, soft-AP, both)
//! - Access-point scan, join with decoded failure reasons, disconnect
//!
//! ### HTTP client
//! - GET and POST over the modem's single TCP link
//! - `+IPD` payload-frame extraction, including the modem's double-prefix
//!   quirk
//! - Segmented downloads streamed chunk-by-chunk into an append-only sink
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! espat = "0.1.0"
//! ```
//!
//! ### Basic driver setup
//!
//! ```rust,no_run
//! use espat::modem::Esp8266;
//! use espat::serial::{Clock, Delay, Read, ReadReady, SerialPort, Write};
//! # struct MockPort;
//! # impl Read for MockPort {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockPort {
//! #     type Error = ();
//! #     fn write(&mut self, _buf: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl ReadReady for MockPort {
//! #     fn bytes_available(&mut self) -> usize { 0 }
//! # }
//! # impl SerialPort for MockPort {}
//! # struct MockTime(u64);
//! # impl Clock for MockTime {
//! #     fn now_ms(&mut self) -> u64 { self.0 += 1; self.0 }
//! # }
//! # impl Delay for MockTime {
//! #     fn delay_ms(&mut self, ms: u32) { self.0 += u64::from(ms); }
//! # }
//!
//! let mut modem = Esp8266::new(MockPort, MockTime(0));
//!
//! // modem.startup()?;
//! // modem.set_echo(false)?;
//! //
//! // while modem.join("ssid", "password")? != espat::wifi::JoinOutcome::Connected {
//! //     // retry with a fixed delay; retry policy belongs to the caller
//! // }
//! //
//! // let response = modem.http_get("www.httpbin.org", "/ip", "espat", 80);
//! ```
//!
//! ### Segmented download into a sink
//!
//! ```rust,ignore
//! let mut sink: heapless::Vec<u8, 8192> = heapless::Vec::new();
//! let segments = modem.http_download("example.com", "/firmware/part", 4, "espat", 80, &mut sink)?;
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support, including a file-backed
//!   download sink (default: disabled)
//! - `defmt`: Enable defmt formatting support for embedded debugging
//! - `log`: Enable logging on best-effort cleanup paths

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Serial transport and time abstractions consumed by the driver.
///
/// The driver is generic over these traits; implement them for a UART
/// peripheral, an OS serial device, or a test double.
pub mod serial;

/// The AT-command transaction engine and modem-level operations.
pub mod modem;

/// Lifecycle of the modem's single TCP link.
pub mod socket;

/// WiFi mode, scan, and access-point join operations.
pub mod wifi;

/// HTTP client operations over the modem's TCP socket commands.
pub mod http;

/// Append-only sinks for streamed downloads.
pub mod storage;
