//! IL0373 Display Driver Implementation
//!
//! This module contains the display controller: it owns the framebuffer and the
//! panel interface and tracks which lifecycle state the glass is in.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --initialize--> Ready --update--> Ready --sleep--> Asleep
//!       ^                         |                                  |
//!       +---- transport failure --+          initialize <------------+
//! ```
//!
//! - `initialize()` - hardware reset and full register setup, allowed in any state
//! - `clear()`, `draw_pixel()`, `draw_pixel_raw()`, `update()`, `sleep()` - need `Ready`
//! - `set_orientation()`, `set_page()` - plain setters, allowed in any state
//!
//! ## Critical Implementation Details
//!
//! ### Polarity Inversion
//!
//! Logical color 0 (background, white) is stored as bit 1, any other color as
//! bit 0. The panel reads bit 1 as "erase to white".
//!
//! ### Failed sequences
//!
//! When a byte transfer or the busy wait fails half way through a sequence the
//! controller state is unknown. The driver drops back to `Uninitialized` so
//! nothing but a full `initialize()` is accepted afterwards.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::il0373::color::Color;
use crate::il0373::config::PanelConfig;
use crate::il0373::error::PanelError;
use crate::il0373::framebuffer::{DisplayRotation, Framebuffer};
use crate::il0373::interface::DisplayInterface;
use crate::il0373::{HEIGHT, WIDTH};

/// Whole-buffer addressing, no page shift
const NO_PAGE: i16 = -1;

/// Hardware lifecycle state of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Never initialized, or a sequence failed half way
    Uninitialized,
    /// Powered and configured, accepts drawing and refreshes
    Ready,
    /// In deep sleep, needs a full initialize
    Asleep,
}

/// IL0373 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `BSY` - BUSY input pin (HIGH when display is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
///
/// Only one instance should exist per physical panel; owning the SPI device and
/// the pins enforces that.
pub struct Il0373<SPI, BSY, DC, RST, DELAY> {
    interface: DisplayInterface<SPI, BSY, DC, RST, DELAY>,
    framebuffer: Framebuffer,
    rotation: DisplayRotation,
    page: i16,
    state: PanelState,
}

impl<SPI, BSY, DC, RST, DELAY> Il0373<SPI, BSY, DC, RST, DELAY> {
    /// Create the driver with the default timing. Nothing is sent to the panel yet.
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        Self::with_config(spi, busy, dc, rst, delay, PanelConfig::default())
    }

    /// Create the driver with custom timing
    pub fn with_config(
        spi: SPI,
        busy: BSY,
        dc: DC,
        rst: RST,
        delay: DELAY,
        config: PanelConfig,
    ) -> Self {
        Il0373 {
            interface: DisplayInterface::new(spi, busy, dc, rst, delay, config),
            framebuffer: Framebuffer::new(),
            rotation: DisplayRotation::Rotate0,
            page: NO_PAGE,
            state: PanelState::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Rotation applied to [`Il0373::draw_pixel`]
    pub fn orientation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Set the rotation for subsequent pixel writes, no hardware access
    pub fn set_orientation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Current page offset, below 1 means the whole buffer
    pub fn page(&self) -> i16 {
        self.page
    }

    /// Confine drawing to a page (`>= 1`) or address the whole buffer (`< 1`)
    pub fn set_page(&mut self, page: i16) {
        self.page = page;
    }

    /// Off-screen frame as it will be sent by the next [`Il0373::update`]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Timing in use
    pub fn config(&self) -> &PanelConfig {
        self.interface.config()
    }

    /// Rotation-aware read of the off-screen frame
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.framebuffer.get_pixel(x, y, self.rotation, self.page)
    }

    /// Give back the SPI device, the pins and the delay
    pub fn release(self) -> (SPI, BSY, DC, RST, DELAY) {
        self.interface.release()
    }

    fn ensure_ready(&self) -> Result<(), PanelError> {
        match self.state {
            PanelState::Ready => Ok(()),
            other => {
                log::warn!("Panel is {:?}, refusing operation", other);
                Err(PanelError::NotReady(other))
            }
        }
    }

    /// Fill the whole off-screen frame with `value`
    pub fn clear(&mut self, value: u8) -> Result<(), PanelError> {
        self.ensure_ready()?;
        self.framebuffer.fill(value);
        Ok(())
    }

    /// Rotation-aware pixel write. Points off the panel are silently dropped.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), PanelError> {
        self.ensure_ready()?;
        self.framebuffer.set_pixel(x, y, color, self.rotation, self.page);
        Ok(())
    }

    /// Strict physical pixel write, reports points off the panel
    pub fn draw_pixel_raw(&mut self, x: u16, y: u16, color: Color) -> Result<(), PanelError> {
        self.ensure_ready()?;
        self.framebuffer.draw_raw(x, y, color)
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
    /// Drop back to `Uninitialized` when a hardware sequence fails
    fn track<T>(&mut self, result: Result<T, PanelError>) -> Result<T, PanelError> {
        if let Err(e) = &result {
            log::error!("Panel sequence failed, re-initialize required: {}", e);
            self.state = PanelState::Uninitialized;
        }
        result
    }

    /// Reset the panel and program its registers. Safe to call in any state.
    pub fn initialize(&mut self) -> Result<(), PanelError> {
        let result = self.interface.init();
        self.track(result)?;
        self.state = PanelState::Ready;
        log::info!("E-paper display ready");
        Ok(())
    }

    /// Send the off-screen frame and refresh the glass. The panel stays powered.
    pub fn update(&mut self) -> Result<(), PanelError> {
        self.ensure_ready()?;
        let result = self.interface.update(self.framebuffer.as_bytes());
        self.track(result)?;
        log::info!("Display refresh complete");
        Ok(())
    }

    /// Enter deep sleep. Drawing again needs [`Il0373::initialize`].
    pub fn sleep(&mut self) -> Result<(), PanelError> {
        self.ensure_ready()?;
        let result = self.interface.deep_sleep();
        self.track(result)?;
        self.state = PanelState::Asleep;
        Ok(())
    }
}

impl<SPI, BSY, DC, RST, DELAY> OriginDimensions for Il0373<SPI, BSY, DC, RST, DELAY> {
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

impl<SPI, BSY, DC, RST, DELAY> DrawTarget for Il0373<SPI, BSY, DC, RST, DELAY> {
    type Color = BinaryColor;
    type Error = PanelError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.ensure_ready()?;
        for Pixel(point, color) in pixels {
            self.framebuffer
                .set_pixel(point.x, point.y, color.into(), self.rotation, self.page);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Il0373::clear(self, Color::from(color).fill_byte())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;
    use embedded_hal_mock::eh1::spi::Mock as SpiMock;

    type TestDriver = Il0373<SpiMock<u8>, PinMock, PinMock, PinMock, NoopDelay>;

    struct Handles {
        spi: SpiMock<u8>,
        busy: PinMock,
        dc: PinMock,
        rst: PinMock,
    }

    impl Handles {
        fn idle() -> Self {
            Handles {
                spi: SpiMock::new(&[]),
                busy: PinMock::new(&[]),
                dc: PinMock::new(&[]),
                rst: PinMock::new(&[]),
            }
        }

        fn driver(&self) -> TestDriver {
            Il0373::new(
                self.spi.clone(),
                self.busy.clone(),
                self.dc.clone(),
                self.rst.clone(),
                NoopDelay,
            )
        }

        fn done(mut self) {
            self.spi.done();
            self.busy.done();
            self.dc.done();
            self.rst.done();
        }
    }

    #[test]
    fn starts_uninitialized_with_defaults() {
        let handles = Handles::idle();
        let driver = handles.driver();
        assert_eq!(driver.state(), PanelState::Uninitialized);
        assert_eq!(driver.orientation(), DisplayRotation::Rotate0);
        assert_eq!(driver.page(), -1);
        assert_eq!(driver.framebuffer(), &Framebuffer::new());
        drop(driver);
        handles.done();
    }

    #[test]
    fn drawing_before_initialize_is_rejected_without_io() {
        let handles = Handles::idle();
        let mut driver = handles.driver();

        let not_ready = Err(PanelError::NotReady(PanelState::Uninitialized));
        assert_eq!(driver.clear(0xFF), not_ready);
        assert_eq!(driver.draw_pixel(0, 0, Color::Black), not_ready);
        assert_eq!(driver.draw_pixel_raw(0, 0, Color::Black), not_ready);
        assert_eq!(driver.update(), not_ready);
        assert_eq!(driver.sleep(), not_ready);
        assert_eq!(driver.framebuffer(), &Framebuffer::new());

        drop(driver);
        handles.done();
    }

    #[test]
    fn setters_work_in_any_state() {
        let handles = Handles::idle();
        let mut driver = handles.driver();
        driver.set_orientation(DisplayRotation::Rotate270);
        driver.set_page(2);
        assert_eq!(driver.orientation(), DisplayRotation::Rotate270);
        assert_eq!(driver.page(), 2);
        drop(driver);
        handles.done();
    }

    #[test]
    fn reports_panel_size() {
        let handles = Handles::idle();
        let driver = handles.driver();
        assert_eq!(driver.size(), Size::new(104, 212));
        drop(driver);
        handles.done();
    }
}
