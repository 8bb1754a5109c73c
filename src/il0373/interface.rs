//! Display interface using SPI
//!
//! Encodes the command/data byte stream of the IL0373 for the init, refresh and
//! deep sleep sequences. Every step of these sequences has to be sent in the
//! order below, the controller hangs or shows garbage otherwise.
use crate::il0373::config::{PanelConfig, RESET_HOLD_MIN_MS};
use crate::il0373::error::{DisplayError, PanelError, TransportError};
use crate::il0373::{cmd::Cmd, flag::Flag, BUFFER_SIZE, HEIGHT, WIDTH};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// Bytes sent per SPI write when streaming a repeated value
const CHUNK_SIZE: usize = 32;

/// The Connection Interface of the panel: SPI for bytes, three GPIO lines and a delay source
pub struct DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// SPI device
    spi: SPI,
    /// High for busy, Wait until display is ready!
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Delay provider, also paces the busy poll
    delay: DELAY,
    config: PanelConfig,
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// Create the interface, no pin is touched yet
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY, config: PanelConfig) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
            config,
        }
    }

    /// Timing in use
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Give back the SPI device, the pins and the delay
    pub fn release(self) -> (SPI, BSY, DC, RST, DELAY) {
        (self.spi, self.busy, self.dc, self.rst, self.delay)
    }
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DC: OutputPin,
    BSY: InputPin,
    DELAY: DelayNs,
{
    /// Reset, then program the panel registers for black/white operation
    pub fn init(&mut self) -> Result<(), PanelError> {
        log::info!("Initializing e-paper display");

        // Hardware reset first - the only way to get a known register state
        self.reset()?;

        self.cmd_with_data(
            Cmd::BOOSTER_SOFT_START,
            &[
                Flag::BOOSTER_SOFT_START_PHASE_A,
                Flag::BOOSTER_SOFT_START_PHASE_B,
                Flag::BOOSTER_SOFT_START_PHASE_C,
            ],
        )?;

        self.cmd_with_data(
            Cmd::POWER_SETTING,
            &[
                Flag::POWER_SETTING_INTERNAL_DCDC,
                Flag::POWER_SETTING_VCOM_VGHL,
                Flag::POWER_SETTING_VDH,
                Flag::POWER_SETTING_VDL,
                Flag::POWER_SETTING_VDHR,
            ],
        )?;

        self.cmd(Cmd::POWER_ON)?;
        self.wait_busy()?;

        self.cmd_with_data(
            Cmd::PANEL_SETTING,
            &[
                Flag::PANEL_SETTING_BW_OTP_LUT,
                Flag::PANEL_SETTING_VCOM_DEFAULT,
            ],
        )?;

        self.cmd_with_data(Cmd::PLL_CONTROL, &[Flag::PLL_50HZ])?;

        self.cmd_with_data(
            Cmd::RESOLUTION_SETTING,
            &[
                WIDTH as u8,
                Flag::RESOLUTION_VRES_HIGH,
                (HEIGHT % 256) as u8,
            ],
        )?;

        self.cmd_with_data(
            Cmd::VCOM_AND_DATA_INTERVAL_SETTING,
            &[Flag::VCOM_DATA_INTERVAL_NORMAL],
        )?;

        Ok(())
    }

    /// Send a full frame and refresh the glass.
    ///
    /// The old-image plane is cleared with white first, then `buffer` goes into
    /// the new-image plane. Both phases carry exactly [`BUFFER_SIZE`] bytes.
    pub fn update(&mut self, buffer: &[u8]) -> Result<(), PanelError> {
        if buffer.len() != BUFFER_SIZE {
            return Err(PanelError::InvalidBuffer {
                expected: BUFFER_SIZE,
                actual: buffer.len(),
            });
        }
        log::info!("Sending frame ({} bytes per plane)", BUFFER_SIZE);

        // Transfer old data
        self.cmd(Cmd::DATA_START_TRANSMISSION_1)?;
        self.data_x_times(Flag::RAM_ALL_WHITE, BUFFER_SIZE as u32)?;

        // Transfer new data
        self.cmd(Cmd::DATA_START_TRANSMISSION_2)?;
        self.data(buffer)?;

        self.cmd(Cmd::DISPLAY_REFRESH)?;
        self.delay.delay_ms(self.config.refresh_settle_ms);
        self.wait_busy()
    }

    /// Power the panel down. Only [`DisplayInterface::init`] brings it back.
    pub fn deep_sleep(&mut self) -> Result<(), PanelError> {
        log::info!("Putting e-paper display into deep sleep");
        self.cmd_with_data(
            Cmd::VCOM_AND_DATA_INTERVAL_SETTING,
            &[Flag::VCOM_DATA_INTERVAL_SLEEP],
        )?;

        self.cmd(Cmd::POWER_OFF)?;
        self.delay.delay_ms(self.config.power_off_settle_ms);
        self.cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_CHECK_CODE])?;
        Ok(())
    }

    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi.write(data).map_err(|e| {
            log::error!("SPI write error for {} data bytes: {:?}", data.len(), e);
            DisplayError::BusWriteError
        })
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    /// Used for setting one color for the whole frame
    pub(crate) fn data_x_times(&mut self, val: u8, repetitions: u32) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        let buffer = [val; CHUNK_SIZE];
        let full_chunks = (repetitions as usize) / CHUNK_SIZE;
        let remainder = (repetitions as usize) % CHUNK_SIZE;

        for _ in 0..full_chunks {
            self.spi
                .write(&buffer)
                .map_err(|_| DisplayError::BusWriteError)?;
        }

        if remainder > 0 {
            self.spi
                .write(&buffer[0..remainder])
                .map_err(|_| DisplayError::BusWriteError)?;
        }

        log::debug!("Completed sending {} bytes of 0x{:02X}", repetitions, val);
        Ok(())
    }

    /// Wait for the busy pin to go LOW.
    ///
    /// Reads the pin, and while it is high sleeps one poll interval and reads
    /// again. A pin that is busy for `n` reads is therefore read `n + 1` times.
    /// With a timeout configured the wait gives up once the polling time reaches
    /// it; the last sleep is shortened so the limit is never exceeded.
    pub fn wait_busy(&mut self) -> Result<(), PanelError> {
        let interval = self.config.busy_poll_interval_ms.max(1);
        let mut waited_ms: u32 = 0;

        loop {
            let busy = self.busy.is_high().map_err(|_| {
                log::error!("Error reading BUSY pin state");
                PanelError::Transport(TransportError::Busy)
            })?;
            if !busy {
                return Ok(());
            }

            let pause = match self.config.busy_timeout_ms {
                Some(limit) if waited_ms >= limit => {
                    log::warn!("E-paper still busy after {} ms, giving up", waited_ms);
                    return Err(PanelError::Timeout { waited_ms });
                }
                // last sleep is cut short so the wait never runs past the limit
                Some(limit) => interval.min(limit - waited_ms),
                None => interval,
            };

            self.delay.delay_ms(pause);
            waited_ms = waited_ms.saturating_add(pause);
            log::debug!("E-paper busy... ({} ms)", waited_ms);
        }
    }

    /// Resets the device: low for the hold time, then high for the hold time
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        let hold = self.config.reset_hold_ms.max(RESET_HOLD_MIN_MS);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(hold);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(hold);
        Ok(())
    }
}
