//! Board wiring of the e-paper panel and the clear button on the ESP32 devkit

/// GPIO numbers used by the firmware
pub struct Pins;

impl Pins {
    // Panel
    /// BUSY input, high while the controller works
    pub const BUSY: u8 = 4;
    /// RST output, active low
    pub const RST: u8 = 16;
    /// D/C output, low = command byte, high = data bytes
    pub const DC: u8 = 17;
    /// SPI chip select
    pub const CS: u8 = 5;
    /// SPI clock
    pub const CLK: u8 = 18;
    /// SPI data out, the panel has no MISO
    pub const MOSI: u8 = 23;

    /// Active-low button that wipes the panel white
    pub const BUTTON: u8 = 39;

    /// SPI clock frequency in Hz
    pub const SPI_BAUDRATE_HZ: u32 = 10_000_000;
}
