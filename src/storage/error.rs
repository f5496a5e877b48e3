//! Common error type for sink operations

/// A common error type for download sinks.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The sink has no room for the appended bytes.
    Full,
    /// An error occurred during a write operation.
    WriteError,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Full => defmt::write!(f, "Full"),
            Error::WriteError => defmt::write!(f, "WriteError"),
        }
    }
}
