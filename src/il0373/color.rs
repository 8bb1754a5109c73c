//! Logical pixel colors and their stored bit polarity

use embedded_graphics::pixelcolor::BinaryColor;

use crate::il0373::flag::Flag;

/// Logical color of a pixel.
///
/// The panel inverts the usual convention: a set bit in the framebuffer is
/// white. `White` is the background (logical value 0) and is stored as bit 1,
/// `Black` is every non-zero logical value and is stored as bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Background, logical value 0
    #[default]
    White,
    /// Ink, any non-zero logical value
    Black,
}

impl Color {
    /// Value of the framebuffer bit that stores this color
    pub fn bit_value(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 0,
        }
    }

    /// Color stored by a framebuffer bit
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Byte that fills a full row segment of eight pixels with this color
    pub fn fill_byte(self) -> u8 {
        match self {
            Color::White => Flag::RAM_ALL_WHITE,
            Color::Black => Flag::RAM_ALL_BLACK,
        }
    }
}

impl From<u16> for Color {
    fn from(value: u16) -> Self {
        if value == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::Off => Color::White,
            BinaryColor::On => Color::Black,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => BinaryColor::Off,
            Color::Black => BinaryColor::On,
        }
    }
}
