//! Driver for the 2.13" 104x212 monochrome e-paper panel (IL0373 controller).
//!
//! The firmware binary in `main.rs` wires this to the ESP32 SPI peripheral;
//! everything in here only depends on the `embedded-hal` traits so it can be
//! exercised on the host.
#![deny(missing_docs)]

pub mod il0373;

pub use crate::il0373::cmd::Cmd;
pub use crate::il0373::color::Color;
pub use crate::il0373::config::PanelConfig;
pub use crate::il0373::driver::{Il0373, PanelState};
pub use crate::il0373::error::{PanelError, TransportError};
pub use crate::il0373::flag::Flag;
pub use crate::il0373::framebuffer::{DisplayRotation, Framebuffer};
pub use crate::il0373::pins::Pins;
pub use crate::il0373::{BUFFER_SIZE, BYTES_PER_ROW, HEIGHT, WIDTH};
