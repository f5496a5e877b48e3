//! Serial transport and time abstractions for the modem driver
//!
//! The driver never talks to hardware directly. It is generic over a small
//! set of capability traits so that the same code runs against a UART
//! peripheral, an OS serial device, or a scripted mock in tests. The traits
//! deliberately model what AT-command traffic actually needs: non-blocking
//! reads, an available-byte count for polling, a monotonic millisecond
//! clock, and a blocking delay.

#![allow(missing_docs)]

/// Re-exports of the transport and time traits
pub mod prelude {
    pub use super::{Clock, Delay, Read, ReadReady, SerialPort, Write};
}

pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read up to `buf.len()` bytes without blocking.
    ///
    /// Returns the number of bytes copied, 0 when nothing is buffered.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write all of `buf` to the port.
    fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

pub trait ReadReady {
    /// Number of received bytes waiting to be read.
    fn bytes_available(&mut self) -> usize;
}

/// A byte-oriented serial port connected to the modem
pub trait SerialPort: Read + Write + ReadReady {}

/// A monotonic millisecond clock
///
/// Only elapsed-time comparisons are performed on the returned values; wall
/// clock semantics are never assumed.
pub trait Clock {
    /// Current monotonic time in milliseconds.
    fn now_ms(&mut self) -> u64;
}

/// A blocking delay source
pub trait Delay {
    /// Block the caller for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
