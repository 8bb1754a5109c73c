//! Errors reported by the driver

pub use display_interface::DisplayError;

use crate::il0373::driver::PanelState;

/// Everything that can go wrong while drawing or talking to the panel.
///
/// Hardware errors are never retried inside the driver. After a
/// [`PanelError::Transport`] or [`PanelError::Timeout`] the panel is in an
/// unknown electrical state and must be initialized again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// Strict pixel write outside the panel
    #[error("pixel ({x}, {y}) is outside the panel")]
    InvalidCoordinate {
        /// Requested column
        x: u16,
        /// Requested row
        y: u16,
    },
    /// Orientation outside 0..=3
    #[error("orientation {0} is not one of 0, 1, 2, 3")]
    InvalidOrientation(u8),
    /// Frame handed to the update sequence has the wrong length
    #[error("frame has {actual} bytes, the panel needs {expected}")]
    InvalidBuffer {
        /// Bytes in one full frame
        expected: usize,
        /// Bytes received
        actual: usize,
    },
    /// SPI write or GPIO line failure
    #[error("transport failure on {0}")]
    Transport(TransportError),
    /// Operation needs an initialized, awake panel
    #[error("panel is {0:?}, call initialize first")]
    NotReady(PanelState),
    /// Busy line still asserted when the wait limit ran out
    #[error("panel still busy after {waited_ms} ms")]
    Timeout {
        /// Time spent polling
        waited_ms: u32,
    },
}

/// Which wire of the panel connection failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// SPI byte transfer
    #[error("SPI bus")]
    Bus,
    /// Data/command select line
    #[error("D/C line")]
    DataCommand,
    /// Reset line
    #[error("reset line")]
    Reset,
    /// Busy line could not be read
    #[error("busy line")]
    Busy,
    /// Any other interface error
    #[error("display interface")]
    Other,
}

impl From<DisplayError> for TransportError {
    fn from(error: DisplayError) -> Self {
        match error {
            DisplayError::BusWriteError => TransportError::Bus,
            DisplayError::DCError => TransportError::DataCommand,
            DisplayError::RSError => TransportError::Reset,
            _ => TransportError::Other,
        }
    }
}

impl From<DisplayError> for PanelError {
    fn from(error: DisplayError) -> Self {
        PanelError::Transport(error.into())
    }
}
