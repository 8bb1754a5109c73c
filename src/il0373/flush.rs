//! Flush adapter for GUI toolkits that render into an RGB565 draw buffer
//!
//! The toolkit hands over a dirty rectangle plus one color per pixel in row-major
//! order. Every pixel goes through the rotation-aware write path and the frame
//! is refreshed exactly once per flush.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::primitives::{PointsIter, Rectangle};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::il0373::color::Color;
use crate::il0373::driver::{Il0373, PanelState};
use crate::il0373::error::PanelError;

/// Brightness above which a pixel is rendered white
pub const MONO_THRESHOLD: u8 = 128;

/// Perceived brightness of an RGB565 color, ITU-R BT.709 weights in fixed point
pub fn rgb565_brightness(color: Rgb565) -> u8 {
    // 5/6 bit channels to 8 bits, replicating the high bits into the low ones
    let r = u32::from(color.r());
    let g = u32::from(color.g());
    let b = u32::from(color.b());
    let r = (r << 3) | (r >> 2);
    let g = (g << 2) | (g >> 4);
    let b = (b << 3) | (b >> 2);

    // Y = 0.2126*R + 0.7152*G + 0.0722*B
    ((r * 54 + g * 183 + b * 19) >> 8) as u8
}

/// Threshold an RGB565 color to the panel's two colors
pub fn to_mono(color: Rgb565) -> Color {
    if rgb565_brightness(color) > MONO_THRESHOLD {
        Color::White
    } else {
        Color::Black
    }
}

impl<SPI, BSY, DC, RST, DELAY> Il0373<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Draw a rendered area and refresh the panel.
    ///
    /// A panel that is asleep or was never set up is initialized first. Colors
    /// are consumed row by row; a short color source leaves the rest of the area
    /// untouched. `update()` runs exactly once, after the whole area is written.
    pub fn flush_area<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), PanelError>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        if self.state() != PanelState::Ready {
            self.initialize()?;
        }

        let mut colors = colors.into_iter();
        for point in area.points() {
            match colors.next() {
                Some(color) => self.draw_pixel(point.x, point.y, to_mono(color))?,
                None => {
                    log::warn!("Flush ran out of colors at ({}, {})", point.x, point.y);
                    break;
                }
            }
        }

        self.update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_extremes() {
        assert_eq!(rgb565_brightness(Rgb565::WHITE), 255);
        assert_eq!(rgb565_brightness(Rgb565::BLACK), 0);
        // pure green carries most of the luminance
        assert_eq!(rgb565_brightness(Rgb565::GREEN), 182);
        assert_eq!(rgb565_brightness(Rgb565::RED), 53);
        assert_eq!(rgb565_brightness(Rgb565::BLUE), 18);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(to_mono(Rgb565::WHITE), Color::White);
        assert_eq!(to_mono(Rgb565::BLACK), Color::Black);
        assert_eq!(to_mono(Rgb565::RED), Color::Black);
        assert_eq!(to_mono(Rgb565::GREEN), Color::White);
        // mid gray: r=16, g=32, b=16 expands to 132, 130, 132 -> 130
        assert_eq!(rgb565_brightness(Rgb565::new(16, 32, 16)), 130);
        assert_eq!(to_mono(Rgb565::new(16, 32, 16)), Color::White);
        // r=15, g=31, b=15 expands to 123, 125, 123 -> 124
        assert_eq!(to_mono(Rgb565::new(15, 31, 15)), Color::Black);
    }
}
