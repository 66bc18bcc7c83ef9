//! Driver error types.

/// Errors surfaced by socket reservation primitives and card drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// A reservation primitive reported contention for the requested
    /// I/O range, interrupt line, or memory window.
    ResourceUnavailable,
    /// The protocol driver rejected the configured hardware.
    ProbeFailed,
    /// The device record or driver state block could not be allocated.
    AllocationFailed,
    /// A lifecycle operation was invoked from a state that does not
    /// permit it.
    InvalidState,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ResourceUnavailable => write!(f, "resource unavailable"),
            Self::ProbeFailed => write!(f, "device probe failed"),
            Self::AllocationFailed => write!(f, "allocation failed"),
            Self::InvalidState => write!(f, "invalid lifecycle state"),
        }
    }
}

impl core::error::Error for DriverError {}
