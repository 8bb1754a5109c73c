//! Packed 1bpp framebuffer with the rotation and page transforms
//!
//! Pixels are stored MSB first: pixel `x` of a row lives in byte `x / 8` at
//! bit `7 - x % 8`, rows are [`BYTES_PER_ROW`] bytes apart.

use crate::il0373::color::Color;
use crate::il0373::error::PanelError;
use crate::il0373::{BUFFER_SIZE, BYTES_PER_ROW, HEIGHT, WIDTH};

const W: i32 = WIDTH as i32;
const H: i32 = HEIGHT as i32;

/// Display rotation, applied to logical coordinates before they are addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees
    Rotate180,
    /// Rotate by 270 degrees clockwise
    Rotate270,
}

impl DisplayRotation {
    /// Map a logical point to the physical panel point.
    ///
    /// The result may lie outside the panel, callers have to check it.
    pub fn transform(self, x: i32, y: i32) -> (i32, i32) {
        match self {
            DisplayRotation::Rotate0 => (x, y),
            // swap, then mirror x
            DisplayRotation::Rotate90 => (W - y - 1, x),
            DisplayRotation::Rotate180 => (W - x - 1, H - y - 1),
            // swap, then mirror y
            DisplayRotation::Rotate270 => (y, H - x - 1),
        }
    }
}

impl TryFrom<u8> for DisplayRotation {
    type Error = PanelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DisplayRotation::Rotate0),
            1 => Ok(DisplayRotation::Rotate90),
            2 => Ok(DisplayRotation::Rotate180),
            3 => Ok(DisplayRotation::Rotate270),
            other => Err(PanelError::InvalidOrientation(other)),
        }
    }
}

impl From<DisplayRotation> for u8 {
    fn from(rotation: DisplayRotation) -> Self {
        match rotation {
            DisplayRotation::Rotate0 => 0,
            DisplayRotation::Rotate90 => 1,
            DisplayRotation::Rotate180 => 2,
            DisplayRotation::Rotate270 => 3,
        }
    }
}

/// Off-screen copy of the panel RAM
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Framebuffer {
    /// All bytes zero
    pub fn new() -> Self {
        Framebuffer {
            bytes: [0; BUFFER_SIZE],
        }
    }

    /// Packed bytes in the order the panel expects them
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Overwrite every byte with `value`
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(value);
    }

    /// Byte index and bit for a physical pixel, `None` outside the panel
    fn address(x: i32, y: i32) -> Option<(usize, u8)> {
        if !(0..W).contains(&x) || !(0..H).contains(&y) {
            return None;
        }
        let index = x as usize / 8 + y as usize * BYTES_PER_ROW;
        if index >= BUFFER_SIZE {
            return None;
        }
        Some((index, 7 - (x % 8) as u8))
    }

    /// Resolve a logical pixel to its byte index and bit.
    ///
    /// Points outside `[0, WIDTH) x [0, HEIGHT)` are rejected before the
    /// rotation. With `page >= 1` the rotated row is shifted up by
    /// `page * HEIGHT` and rejected unless it still lands on the panel.
    pub fn locate(x: i32, y: i32, rotation: DisplayRotation, page: i16) -> Option<(usize, u8)> {
        if !(0..W).contains(&x) || !(0..H).contains(&y) {
            return None;
        }
        // Quarter turns send logical rows past WIDTH off the side of the glass.
        // Those points are dropped, not wrapped into the next physical row.
        let (x, mut y) = rotation.transform(x, y);
        if page >= 1 {
            y -= i32::from(page) * H;
            if !(0..H).contains(&y) {
                return None;
            }
        }
        Self::address(x, y)
    }

    fn write_bit(&mut self, index: usize, bit: u8, color: Color) {
        let mask = 1u8 << bit;
        match color {
            Color::White => self.bytes[index] |= mask,
            Color::Black => self.bytes[index] &= !mask,
        }
    }

    /// Rotation-aware pixel write. Anything that does not land on the panel is
    /// dropped without an error.
    pub fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Color,
        rotation: DisplayRotation,
        page: i16,
    ) {
        if let Some((index, bit)) = Self::locate(x, y, rotation, page) {
            self.write_bit(index, bit, color);
        }
    }

    /// Rotation-aware pixel read, `None` where [`Framebuffer::set_pixel`] would drop the write
    pub fn get_pixel(
        &self,
        x: i32,
        y: i32,
        rotation: DisplayRotation,
        page: i16,
    ) -> Option<Color> {
        Self::locate(x, y, rotation, page)
            .map(|(index, bit)| Color::from_bit((self.bytes[index] >> bit) & 1))
    }

    /// Strict physical pixel write without rotation.
    ///
    /// Unlike [`Framebuffer::set_pixel`] this reports out of range coordinates.
    pub fn draw_raw(&mut self, x: u16, y: u16, color: Color) -> Result<(), PanelError> {
        if x >= WIDTH || y >= HEIGHT {
            return Err(PanelError::InvalidCoordinate { x, y });
        }
        let (index, bit) = Self::address(i32::from(x), i32::from(y))
            .ok_or(PanelError::InvalidCoordinate { x, y })?;
        self.write_bit(index, bit, color);
        Ok(())
    }

    /// Physical pixel read without rotation
    pub fn raw_pixel(&self, x: u16, y: u16) -> Option<Color> {
        Self::address(i32::from(x), i32::from(y))
            .map(|(index, bit)| Color::from_bit((self.bytes[index] >> bit) & 1))
    }
}
