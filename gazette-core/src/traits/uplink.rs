//! Network uplink trait

use core::fmt;

/// Errors that can occur bringing up the network uplink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UplinkError {
    /// Association did not complete within the configured timeout
    Timeout,
    /// The interface refused to start (bad credentials, radio fault)
    Rejected,
}

impl fmt::Display for UplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UplinkError::Timeout => f.write_str("uplink association timed out"),
            UplinkError::Rejected => f.write_str("uplink refused to start"),
        }
    }
}

/// Trait for the network interface the sources depend on
///
/// Only startup is modelled: begin association, then poll until connected.
pub trait Uplink {
    /// Start associating with the network
    fn begin(&mut self) -> Result<(), UplinkError>;

    /// Check whether association has completed
    fn is_connected(&mut self) -> bool;
}
