//! WiFi mode queries and access-point operations
//!
//! Thin one-command sequences over the transaction engine. Outcomes are
//! decoded with fixed substring and digit-containment checks against the
//! reply buffer, matching the modem's reporting conventions.

use core::fmt::Write as _;

use crate::modem::error::Error;
use crate::modem::{CommandOutcome, Esp8266, Reply, TX_BUFFER_LEN};
use crate::serial::{Clock, Delay, SerialPort};
use heapless::{String, Vec};

/// Link-established notification.
pub const WIFI_CONNECTED: &[u8] = b"WIFI CONNECTED\r\n";
/// Address-acquired notification; only together with [`WIFI_CONNECTED`]
/// does it mean a usable connection.
pub const WIFI_GOT_IP: &[u8] = b"WIFI GOT IP\r\n";
/// Link-lost notification.
pub const WIFI_DISCONNECT: &[u8] = b"WIFI DISCONNECT\r\n";

const MODE_SETTLE_MS: u32 = 1_000;
const MODE_TIMEOUT_MS: u32 = 1_000;
const JOIN_SETTLE_MS: u32 = 1_000;
const JOIN_TIMEOUT_MS: u32 = 5_000;
const SCAN_SETTLE_MS: u32 = 1_000;
const SCAN_TIMEOUT_MS: u32 = 5_000;

/// Capacity of one raw scan record.
pub const AP_RECORD_LEN: usize = 80;
/// Maximum number of scan records returned.
pub const MAX_AP_RECORDS: usize = 16;

/// WiFi operating mode of the modem.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WifiMode {
    /// Station only.
    Station,
    /// Software access point only.
    SoftAp,
    /// Station and software access point simultaneously.
    SoftApStation,
}

impl WifiMode {
    fn digit(self) -> u8 {
        match self {
            WifiMode::Station => 1,
            WifiMode::SoftAp => 2,
            WifiMode::SoftApStation => 3,
        }
    }
}

/// Which stored configuration a mode operation targets.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeScope {
    /// The active configuration (`CWMODE_CUR`).
    Current,
    /// The power-on default configuration (`CWMODE_DEF`).
    Default,
}

impl ModeScope {
    fn suffix(self) -> &'static str {
        match self {
            ModeScope::Current => "CUR",
            ModeScope::Default => "DEF",
        }
    }
}

/// Result of a join attempt.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoinOutcome {
    /// Connected and an address was acquired.
    Connected,
    /// Not connected, or link-only without an address.
    Disconnected,
    /// The target access point was not found.
    ApNotFound,
    /// The access point rejected the password.
    WrongPassword,
}

impl<S: SerialPort, T: Clock + Delay> Esp8266<S, T> {
    /// Queries the WiFi mode (`AT+CWMODE_CUR?` / `AT+CWMODE_DEF?`).
    ///
    /// Returns `None` when the reply carries no recognizable mode digit.
    pub fn wifi_mode(&mut self, scope: ModeScope) -> Result<Option<WifiMode>, Error> {
        let mut cmd: String<32> = String::new();
        write!(cmd, "AT+CWMODE_{}?\r\n", scope.suffix()).map_err(|_| Error::BufferOverflow)?;

        let reply = self.transact(cmd.as_bytes(), MODE_SETTLE_MS, MODE_TIMEOUT_MS)?;
        if reply.outcome == CommandOutcome::Timeout {
            return Err(Error::Timeout);
        }

        // Digit containment over the whole buffer, checked in fixed order.
        let mode = if reply.contains(b"1") {
            Some(WifiMode::Station)
        } else if reply.contains(b"2") {
            Some(WifiMode::SoftAp)
        } else if reply.contains(b"3") {
            Some(WifiMode::SoftApStation)
        } else {
            None
        };
        Ok(mode)
    }

    /// Sets the WiFi mode (`AT+CWMODE_CUR=` / `AT+CWMODE_DEF=`).
    pub fn set_wifi_mode(&mut self, scope: ModeScope, mode: WifiMode) -> Result<(), Error> {
        let mut cmd: String<32> = String::new();
        write!(cmd, "AT+CWMODE_{}={}\r\n", scope.suffix(), mode.digit())
            .map_err(|_| Error::BufferOverflow)?;

        self.transact(cmd.as_bytes(), MODE_SETTLE_MS, MODE_TIMEOUT_MS)?
            .require_ok()
            .map(|_| ())
    }

    /// Scans for access points (`AT+CWLAP`).
    ///
    /// Returns the raw record bytes of each `+CWLAP:` reply line, in the
    /// order the modem listed them. Records beyond the collection capacity
    /// are dropped.
    pub fn scan_aps(&mut self) -> Result<Vec<Vec<u8, AP_RECORD_LEN>, MAX_AP_RECORDS>, Error> {
        let raw = self
            .transact(b"AT+CWLAP\r\n", SCAN_SETTLE_MS, SCAN_TIMEOUT_MS)?
            .require_ok()?;

        let mut records: Vec<Vec<u8, AP_RECORD_LEN>, MAX_AP_RECORDS> = Vec::new();
        for line in lines(&raw) {
            if let Some(record) = line.strip_prefix(b"+CWLAP:") {
                let mut owned: Vec<u8, AP_RECORD_LEN> = Vec::new();
                let take = record.len().min(AP_RECORD_LEN);
                owned.extend_from_slice(&record[..take]).ok();
                if records.push(owned).is_err() {
                    break;
                }
            }
        }
        Ok(records)
    }

    /// Joins an access point (`AT+CWJAP_CUR`).
    ///
    /// The outcome is decoded from the reply: a `+CWJAP` reason code when
    /// the modem reports why the join failed, otherwise the connected
    /// notification gated by the got-address notification. Retry policy
    /// belongs to the caller; a common pattern is a loop with a fixed delay
    /// until [`JoinOutcome::Connected`].
    pub fn join(&mut self, ssid: &str, password: &str) -> Result<JoinOutcome, Error> {
        let mut cmd: String<TX_BUFFER_LEN> = String::new();
        write!(cmd, "AT+CWJAP_CUR=\"{}\",\"{}\"\r\n", ssid, password)
            .map_err(|_| Error::BufferOverflow)?;

        let reply = self.transact(cmd.as_bytes(), JOIN_SETTLE_MS, JOIN_TIMEOUT_MS)?;
        Ok(join_outcome(&reply))
    }

    /// Disconnects from the current access point (`AT+CWQAP`).
    pub fn disconnect(&mut self) -> Result<(), Error> {
        self.transact(b"AT+CWQAP\r\n", MODE_SETTLE_MS, MODE_TIMEOUT_MS)?
            .require_ok()
            .map(|_| ())
    }
}

fn join_outcome(reply: &Reply) -> JoinOutcome {
    if reply.contains(b"+CWJAP") {
        // Reason code, checked by digit containment in fixed order:
        // 1 and 4 both report a failed/lost connection.
        if reply.contains(b"1") {
            JoinOutcome::Disconnected
        } else if reply.contains(b"2") {
            JoinOutcome::WrongPassword
        } else if reply.contains(b"3") {
            JoinOutcome::ApNotFound
        } else {
            JoinOutcome::Disconnected
        }
    } else if reply.contains(WIFI_CONNECTED) {
        if reply.contains(WIFI_GOT_IP) {
            JoinOutcome::Connected
        } else {
            JoinOutcome::Disconnected
        }
    } else {
        JoinOutcome::Disconnected
    }
}

fn lines(raw: &[u8]) -> impl Iterator<Item = &[u8]> {
    raw.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}
