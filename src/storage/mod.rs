//! Append-only sinks for streamed downloads
//!
//! The segmented HTTP download path writes response bodies straight to a
//! sink as chunks are drained from the port, so large resources never have
//! to fit in memory. A sink is single-writer and append-only for the
//! lifetime of one download; no random access or truncation is required.

/// Common error types for sink operations
pub mod error;

use heapless::Vec;

/// An append-only byte sink.
pub trait Sink {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Append `bytes` at the end of the sink.
    fn append(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<const N: usize> Sink for Vec<u8, N> {
    type Error = error::Error;

    fn append(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(bytes).map_err(|_| error::Error::Full)
    }
}

#[cfg(feature = "std")]
impl Sink for std::fs::File {
    type Error = std::io::Error;

    fn append(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        use std::io::Write;
        self.write_all(bytes)
    }
}
