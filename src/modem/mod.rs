//! AT-command transaction engine
//!
//! One transaction is one `send → settle → wait → drain → classify` cycle
//! against the serial port. The modem correlates replies with requests only
//! by temporal ordering, so the driver keeps exactly one command in flight
//! and blocks the caller for the settle-plus-timeout budget of each call.
//!
//! Replies are classified by substring containment against the modem's
//! fixed terminator literals, most specific first. The accumulated reply
//! buffer is local to each transaction and moved out to the caller, so no
//! stale bytes can leak between commands.

pub mod error;

use crate::serial::{Clock, Delay, SerialPort};
use crate::socket::LinkState;
use error::Error;
use heapless::Vec;

/// Terminator of a successful reply.
pub const OK_TERMINATOR: &[u8] = b"OK\r\n";
/// Terminator of a rejected command.
pub const ERROR_TERMINATOR: &[u8] = b"ERROR\r\n";
/// Terminator of an accepted-but-failed command.
pub const FAIL_TERMINATOR: &[u8] = b"FAIL\r\n";
/// Phrase emitted while the modem is still processing a previous command.
pub const BUSY_TERMINATOR: &[u8] = b"busy p...\r\n";

/// Capacity of the per-transaction reply buffer.
pub const RX_BUFFER_LEN: usize = 2048;
/// Capacity of the outbound command/request build buffers.
pub const TX_BUFFER_LEN: usize = 1024;

// Upper bound for a single drain read.
const RX_CHUNK_LEN: usize = 512;

const STARTUP_SETTLE_MS: u32 = 1_000;
const STARTUP_TIMEOUT_MS: u32 = 1_000;

/// Classification of one transaction's reply.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// The reply carried the `OK` terminator.
    Ok,
    /// The reply carried the `ERROR` terminator.
    Error,
    /// The reply carried the `FAIL` terminator.
    Fail,
    /// The modem reported itself busy.
    Busy,
    /// No terminator was found before the budget elapsed.
    Timeout,
}

impl CommandOutcome {
    /// Classifies an accumulated reply buffer.
    ///
    /// Containment tests run in a fixed priority order, `OK` first: some
    /// replies echo an intermediate status and still finish with the
    /// terminal `OK`, and whole-literal matching ahead of the negative
    /// terminators keeps such echoes from misclassifying the reply.
    pub fn classify(raw: &[u8]) -> Self {
        if find_slice(raw, OK_TERMINATOR).is_some() {
            CommandOutcome::Ok
        } else if find_slice(raw, ERROR_TERMINATOR).is_some() {
            CommandOutcome::Error
        } else if find_slice(raw, FAIL_TERMINATOR).is_some() {
            CommandOutcome::Fail
        } else if find_slice(raw, BUSY_TERMINATOR).is_some() {
            CommandOutcome::Busy
        } else {
            CommandOutcome::Timeout
        }
    }

    /// The error equivalent of a non-`Ok` outcome.
    pub fn failure(self) -> Option<Error> {
        match self {
            CommandOutcome::Ok => None,
            CommandOutcome::Error => Some(Error::ModemError),
            CommandOutcome::Fail => Some(Error::ModemFail),
            CommandOutcome::Busy => Some(Error::ModemBusy),
            CommandOutcome::Timeout => Some(Error::Timeout),
        }
    }
}

/// The result of one transaction: the classified outcome plus the raw reply
/// bytes, moved out of the engine.
#[derive(Debug)]
pub struct Reply {
    /// Classification of the reply.
    pub outcome: CommandOutcome,
    /// Every byte drained from the port during the transaction.
    pub raw: Vec<u8, RX_BUFFER_LEN>,
}

impl Reply {
    /// Returns the raw reply when the outcome is `Ok`, the matching error
    /// otherwise.
    pub fn require_ok(self) -> Result<Vec<u8, RX_BUFFER_LEN>, Error> {
        match self.outcome.failure() {
            None => Ok(self.raw),
            Some(e) => Err(e),
        }
    }

    /// Whether the reply contains `needle` anywhere.
    pub fn contains(&self, needle: &[u8]) -> bool {
        find_slice(&self.raw, needle).is_some()
    }
}

/// An ESP8266 modem driven over a serial port.
///
/// The driver owns the port, the time source, and the state of the modem's
/// single TCP link. Nothing else may touch the port while the driver lives.
pub struct Esp8266<S: SerialPort, T: Clock + Delay> {
    pub(crate) serial: S,
    pub(crate) time: T,
    pub(crate) link: LinkState,
}

impl<S: SerialPort, T: Clock + Delay> Esp8266<S, T> {
    /// Creates a driver over an already-configured serial port.
    pub fn new(serial: S, time: T) -> Self {
        Self {
            serial,
            time,
            link: LinkState::Closed,
        }
    }

    /// Consumes the driver and returns the port and time source.
    pub fn free(self) -> (S, T) {
        (self.serial, self.time)
    }

    /// Runs one complete AT transaction.
    ///
    /// The command bytes are written immediately, then the driver sleeps for
    /// `settle_ms` without reading (the modem needs processing latency
    /// before it produces output), then busy-polls the port for up to
    /// `timeout_ms` until the first byte is available, and finally drains
    /// whatever is buffered.
    ///
    /// The drain stops the first time the port reports zero available
    /// bytes; a reply arriving in bursts separated by gaps longer than the
    /// poll granularity is truncated at the first gap. A truncated or
    /// absent reply classifies as [`CommandOutcome::Timeout`].
    pub fn transact(&mut self, cmd: &[u8], settle_ms: u32, timeout_ms: u32) -> Result<Reply, Error> {
        self.send_and_wait(cmd, settle_ms, timeout_ms)?;

        let mut raw: Vec<u8, RX_BUFFER_LEN> = Vec::new();
        while self.serial.bytes_available() > 0 {
            let mut chunk = [0u8; RX_CHUNK_LEN];
            let n = self.serial.read(&mut chunk).map_err(|_| Error::ReadError)?;
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n])
                .map_err(|_| Error::BufferOverflow)?;
        }

        Ok(Reply {
            outcome: CommandOutcome::classify(&raw),
            raw,
        })
    }

    /// Runs one transaction, handing each drained chunk to `on_chunk`
    /// instead of accumulating a reply buffer.
    ///
    /// Used by the segmented download path, where every chunk carries its
    /// own payload frame and must be processed before the next read. The
    /// first `on_chunk` error aborts the drain.
    pub(crate) fn transact_chunks<F>(
        &mut self,
        cmd: &[u8],
        settle_ms: u32,
        timeout_ms: u32,
        mut on_chunk: F,
    ) -> Result<(), Error>
    where
        F: FnMut(&[u8]) -> Result<(), Error>,
    {
        self.send_and_wait(cmd, settle_ms, timeout_ms)?;

        while self.serial.bytes_available() > 0 {
            let mut chunk = [0u8; RX_CHUNK_LEN];
            let n = self.serial.read(&mut chunk).map_err(|_| Error::ReadError)?;
            if n == 0 {
                break;
            }
            on_chunk(&chunk[..n])?;
        }

        Ok(())
    }

    fn send_and_wait(&mut self, cmd: &[u8], settle_ms: u32, timeout_ms: u32) -> Result<(), Error> {
        self.serial.write(cmd).map_err(|_| Error::WriteError)?;

        self.time.delay_ms(settle_ms);

        let stamp = self.time.now_ms();
        while self.time.now_ms().saturating_sub(stamp) < u64::from(timeout_ms) {
            if self.serial.bytes_available() > 0 {
                break;
            }
        }
        Ok(())
    }

    /// Verifies communication with the modem (`AT`).
    pub fn startup(&mut self) -> Result<(), Error> {
        self.transact(b"AT\r\n", STARTUP_SETTLE_MS, STARTUP_TIMEOUT_MS)?
            .require_ok()
            .map(|_| ())
    }

    /// Enables or disables command echo (`ATE1` / `ATE0`).
    pub fn set_echo(&mut self, enabled: bool) -> Result<(), Error> {
        let cmd: &[u8] = if enabled { b"ATE1\r\n" } else { b"ATE0\r\n" };
        self.transact(cmd, STARTUP_SETTLE_MS, STARTUP_TIMEOUT_MS)?
            .require_ok()
            .map(|_| ())
    }

    /// Queries the AT firmware version details (`AT+GMR`).
    ///
    /// Returns the reply bytes preceding the `OK` terminator, with trailing
    /// line terminators trimmed.
    pub fn firmware_version(&mut self) -> Result<Vec<u8, RX_BUFFER_LEN>, Error> {
        let raw = self
            .transact(b"AT+GMR\r\n", STARTUP_SETTLE_MS, STARTUP_TIMEOUT_MS)?
            .require_ok()?;

        let end = find_slice(&raw, OK_TERMINATOR).unwrap_or(raw.len());
        let mut version = raw;
        version.truncate(end);
        while version.last() == Some(&b'\r') || version.last() == Some(&b'\n') {
            version.pop();
        }
        Ok(version)
    }
}

/// Finds the first occurrence of a slice in another slice and returns its
/// starting position.
pub(crate) fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
