//! IL0373 register map

/// Register command bytes of the IL0373 controller.
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Init
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_SETTING: u8 = 0x01;
    pub const POWER_OFF: u8 = 0x02;
    pub const POWER_ON: u8 = 0x04;
    pub const BOOSTER_SOFT_START: u8 = 0x06;
    pub const DEEP_SLEEP: u8 = 0x07;
    pub const PLL_CONTROL: u8 = 0x30;
    pub const VCOM_AND_DATA_INTERVAL_SETTING: u8 = 0x50;
    pub const TCON_SETTING: u8 = 0x60;
    pub const RESOLUTION_SETTING: u8 = 0x61;

    // Update
    pub const DATA_START_TRANSMISSION_1: u8 = 0x10;
    pub const DATA_STOP: u8 = 0x11;
    pub const DISPLAY_REFRESH: u8 = 0x12;
    pub const DATA_START_TRANSMISSION_2: u8 = 0x13;

    // Waveform tables
    pub const LUT_FOR_VCOM: u8 = 0x20;
    pub const LUT_WHITE_TO_WHITE: u8 = 0x21;
    pub const LUT_BLACK_TO_WHITE: u8 = 0x22;
    pub const LUT_WHITE_TO_BLACK: u8 = 0x23;
    pub const LUT_BLACK_TO_BLACK: u8 = 0x24;

    // Diagnostics
    pub const GET_STATUS: u8 = 0x71;
    pub const AUTO_MEASURE_VCOM: u8 = 0x80;
    pub const READ_VCOM_VALUE: u8 = 0x81;
    pub const VCM_DC_SETTING: u8 = 0x82;

    // Partial window, not driven by this crate
    pub const PARTIAL_WINDOW: u8 = 0x90;
    pub const PARTIAL_IN: u8 = 0x91;
    pub const PARTIAL_OUT: u8 = 0x92;
}

/*
Vendor reference init flow for the 104x212 panel:
0x06 - Booster Soft Start (3 bytes)
0x01 - Power Setting (5 bytes)
0x04 - Power On, then wait for BUSY
0x00 - Panel Setting (2 bytes)
0x30 - PLL Control
0x61 - Resolution Setting
0x50 - VCOM and Data Interval Setting
*/
