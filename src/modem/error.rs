//! Common error type for modem operations

/// A common error type for modem operations.
///
/// This enum defines the set of errors that can occur while exchanging AT
/// commands with the modem. It is designed to be simple and portable for
/// `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An error occurred while writing to the serial port.
    WriteError,
    /// An error occurred while reading from the serial port.
    ReadError,
    /// No reply terminator arrived within the time budget.
    Timeout,
    /// The modem replied with its `ERROR` terminator.
    ModemError,
    /// The modem replied with its `FAIL` terminator.
    ModemFail,
    /// The modem reported itself busy. Retrying the command without backoff
    /// may succeed, unlike `ModemError`.
    ModemBusy,
    /// The `>` payload prompt did not appear after a send announcement.
    NotReady,
    /// The inbound-data marker or the status-code token was missing from a
    /// payload frame.
    FrameError,
    /// A reply did not fit in the transaction buffer.
    BufferOverflow,
    /// A payload operation was attempted without an open link.
    NotOpen,
    /// A download chunk carried a status code other than 200.
    BadStatus,
    /// The download sink rejected an append.
    SinkError,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::ModemError => defmt::write!(f, "ModemError"),
            Error::ModemFail => defmt::write!(f, "ModemFail"),
            Error::ModemBusy => defmt::write!(f, "ModemBusy"),
            Error::NotReady => defmt::write!(f, "NotReady"),
            Error::FrameError => defmt::write!(f, "FrameError"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::NotOpen => defmt::write!(f, "NotOpen"),
            Error::BadStatus => defmt::write!(f, "BadStatus"),
            Error::SinkError => defmt::write!(f, "SinkError"),
        }
    }
}
