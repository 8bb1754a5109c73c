//! IL0373 ePaper Display Driver
//!
//! Used in the 2.13" flexible monochrome panel (104x212, black/white only).
//!
//! ### Usage
//! This driver does not hide that you're working with one buffer for black/white. To
//! display something you:
//!
//! 1. create the driver with [`driver::Il0373::new`] and run [`driver::Il0373::initialize`]
//! 1. pick an orientation with [`driver::Il0373::set_orientation`], then draw pixels with
//!    [`driver::Il0373::draw_pixel`] or, preferably, with
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//! 1. push the frame to the glass with [`driver::Il0373::update`]
//! 1. put the panel to sleep with [`driver::Il0373::sleep`] and re-initialize before the
//!    next frame
//!
//! Bit polarity in the framebuffer is inverted relative to the logical color:
//! logical color 0 (background, white) is stored as bit 1, anything else as bit 0.

pub mod cmd;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod flag;
pub mod flush;
pub mod framebuffer;
pub mod interface;
pub mod pins;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 104;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 212;

/// Bytes needed for one row of pixels
pub const BYTES_PER_ROW: usize = WIDTH as usize / 8;

/// Size of the packed 1bpp framebuffer, also the byte count of each transmission phase
pub const BUFFER_SIZE: usize = WIDTH as usize * HEIGHT as usize / 8;
