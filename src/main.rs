//! Demo firmware: cycles a "Hello World" label through the four orientations
//! and clears the panel to white when the button is pressed.

#[cfg(target_os = "espidf")]
mod firmware {
    use anyhow::Context;

    use embedded_graphics::mono_font::{ascii::FONT_9X15, MonoTextStyle};
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

    use esp_idf_svc::hal::delay::{Delay, FreeRtos};
    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::prelude::*;
    use esp_idf_svc::hal::spi;

    use hanji_epd::{DisplayRotation, Il0373, Pins, HEIGHT, WIDTH};

    /// Time each orientation stays on the glass
    const FRAME_PERIOD_MS: u32 = 5000;
    /// How often the button is sampled while a frame is shown
    const BUTTON_POLL_MS: u32 = 100;

    const ROTATIONS: [DisplayRotation; 4] = [
        DisplayRotation::Rotate0,
        DisplayRotation::Rotate90,
        DisplayRotation::Rotate180,
        DisplayRotation::Rotate270,
    ];

    /// Middle of the drawable logical area for a rotation
    fn label_anchor(rotation: DisplayRotation) -> Point {
        let (w, h) = (i32::from(WIDTH), i32::from(HEIGHT));
        match rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => Point::new(w / 2, h / 2),
            // quarter turns only reach the first WIDTH rows
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => Point::new(w / 2, w / 2),
        }
    }

    // https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
    pub fn run() -> anyhow::Result<()> {
        // It is necessary to call this function once. Otherwise some patches to the runtime
        // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
        esp_idf_svc::sys::link_patches();

        // Bind the log crate to the ESP Logging facilities
        esp_idf_svc::log::EspLogger::initialize_default();

        let peripherals = Peripherals::take().context("Could not take peripherals")?;
        let pins = peripherals.pins;

        log::info!(
            "Configuring SPI: CLK {} MOSI {} CS {} at {} Hz",
            Pins::CLK,
            Pins::MOSI,
            Pins::CS,
            Pins::SPI_BAUDRATE_HZ
        );
        let spi = spi::SpiDeviceDriver::new_single(
            peripherals.spi2,
            pins.gpio18,                    // CLK - Pins::CLK
            pins.gpio23,                    // MOSI - Pins::MOSI
            Option::<gpio::AnyIOPin>::None, // the panel never talks back
            Some(pins.gpio5),               // CS - Pins::CS
            &spi::SpiDriverConfig::new(),
            &spi::SpiConfig::new().baudrate(Pins::SPI_BAUDRATE_HZ.Hz().into()),
        )
        .context("Could not create SPI device driver")?;

        let busy = gpio::PinDriver::input(pins.gpio4).context("busy pin")?; // Pins::BUSY
        let dc = gpio::PinDriver::output(pins.gpio17).context("dc pin")?; // Pins::DC
        let rst = gpio::PinDriver::output(pins.gpio16).context("rst pin")?; // Pins::RST
        let button = gpio::PinDriver::input(pins.gpio39).context("button pin")?; // Pins::BUTTON

        let mut epd = Il0373::new(spi, busy, dc, rst, Delay::default());

        let text_style = MonoTextStyle::new(&FONT_9X15, BinaryColor::On);
        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        loop {
            for rotation in ROTATIONS {
                log::info!("Drawing label with rotation {}", u8::from(rotation));
                epd.initialize()?;
                epd.set_orientation(rotation);
                epd.clear(0xFF)?;
                Text::with_text_style(
                    "Hello World",
                    label_anchor(rotation),
                    text_style,
                    centered,
                )
                .draw(&mut epd)?;
                epd.update()?;
                epd.sleep()?;

                let mut shown_ms = 0;
                while shown_ms < FRAME_PERIOD_MS {
                    if button.is_low() {
                        log::info!("Button pressed!");
                        epd.initialize()?;
                        epd.clear(0xFF)?;
                        epd.update()?;
                        epd.sleep()?;
                    }
                    FreeRtos::delay_ms(BUTTON_POLL_MS);
                    shown_ms += BUTTON_POLL_MS;
                }
            }
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    println!("hanji-epd firmware only runs on ESP32, build with the espidf target");
}
