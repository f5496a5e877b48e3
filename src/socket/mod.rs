//! Single-TCP-link lifecycle
//!
//! The modem profile this driver targets carries at most one TCP connection
//! at a time, so the link is modeled as a small state machine owned by the
//! driver. Opening, announcing a payload send, and writing the payload are
//! ordinary transactions; closing is best-effort and idempotent because it
//! is issued from failure paths as well as success paths.

use core::fmt::Write as _;

use crate::modem::error::Error;
use crate::modem::{Esp8266, Reply};
use crate::serial::{Clock, Delay, SerialPort};
use heapless::String;

/// Byte the modem prints when it is ready to accept a raw payload write.
///
/// This is a distinct signal, not a reply terminator; it is checked
/// independently of the status classifier.
pub const SEND_PROMPT: u8 = b'>';

const CLOSE_SETTLE_MS: u32 = 1_000;
const CLOSE_TIMEOUT_MS: u32 = 1_000;

/// State of the modem's single TCP link.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No connection.
    Closed,
    /// A connect command is in flight.
    Opening,
    /// Connected, no payload announced.
    Open,
    /// A payload send was announced and accepted.
    Sending,
    /// A close command is in flight.
    Closing,
}

impl<S: SerialPort, T: Clock + Delay> Esp8266<S, T> {
    /// Current state of the TCP link.
    pub fn link_state(&self) -> LinkState {
        self.link
    }

    /// Opens a TCP connection to `host:port` (`AT+CIPSTART`).
    ///
    /// Any failure leaves the link `Closed`; callers should still issue
    /// [`close`](Self::close) before reporting the failure upward, to guard
    /// against the modem being left with a half-open connection.
    pub fn open_tcp(
        &mut self,
        host: &str,
        port: u16,
        settle_ms: u32,
        timeout_ms: u32,
    ) -> Result<(), Error> {
        let mut cmd: String<160> = String::new();
        write!(cmd, "AT+CIPSTART=\"TCP\",\"{}\",{}\r\n", host, port)
            .map_err(|_| Error::BufferOverflow)?;

        self.link = LinkState::Opening;
        match self
            .transact(cmd.as_bytes(), settle_ms, timeout_ms)
            .and_then(Reply::require_ok)
        {
            Ok(_) => {
                self.link = LinkState::Open;
                Ok(())
            }
            Err(e) => {
                self.link = LinkState::Closed;
                Err(e)
            }
        }
    }

    /// Announces an upcoming payload write of `len` bytes (`AT+CIPSEND`).
    ///
    /// Success is the prompt byte `>` appearing anywhere in the reply.
    pub fn announce_send(
        &mut self,
        len: usize,
        settle_ms: u32,
        timeout_ms: u32,
    ) -> Result<(), Error> {
        if self.link != LinkState::Open {
            return Err(Error::NotOpen);
        }

        let mut cmd: String<32> = String::new();
        write!(cmd, "AT+CIPSEND={}\r\n", len).map_err(|_| Error::BufferOverflow)?;

        let reply = match self.transact(cmd.as_bytes(), settle_ms, timeout_ms) {
            Ok(reply) => reply,
            Err(e) => {
                self.link = LinkState::Closed;
                return Err(e);
            }
        };

        if reply.contains(&[SEND_PROMPT]) {
            self.link = LinkState::Sending;
            Ok(())
        } else {
            self.link = LinkState::Closed;
            Err(Error::NotReady)
        }
    }

    /// Writes the announced payload as one transaction and returns the
    /// reply, which carries the inbound payload framing.
    ///
    /// The reply is returned regardless of its classification; the caller
    /// decides what the frame means.
    pub fn send_payload(
        &mut self,
        payload: &[u8],
        settle_ms: u32,
        timeout_ms: u32,
    ) -> Result<Reply, Error> {
        if self.link != LinkState::Sending {
            return Err(Error::NotOpen);
        }

        match self.transact(payload, settle_ms, timeout_ms) {
            Ok(reply) => {
                self.link = LinkState::Open;
                Ok(reply)
            }
            Err(e) => {
                self.link = LinkState::Closed;
                Err(e)
            }
        }
    }

    /// Closes the TCP link (`AT+CIPCLOSE`), best-effort.
    ///
    /// Failures are logged and swallowed: close runs on cleanup paths where
    /// surfacing an error would mask the one that got us here. Calling it
    /// on an already-closed link is indistinguishable from calling it once.
    pub fn close(&mut self) {
        self.link = LinkState::Closing;

        if let Err(e) = self
            .transact(b"AT+CIPCLOSE\r\n", CLOSE_SETTLE_MS, CLOSE_TIMEOUT_MS)
            .and_then(Reply::require_ok)
        {
            #[cfg(feature = "log")]
            log::warn!("link close failed: {:?}", e);
            #[cfg(feature = "defmt")]
            defmt::warn!("link close failed");
            let _ = e;
        }

        self.link = LinkState::Closed;
    }
}
