//! Data bytes sent with the IL0373 commands

/// Data bytes and constants used by the IL0373 e-paper display driver.
///
/// The values come from the panel vendor's reference flow for the 104x212 glass.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Booster Soft Start (0x06): phase A, B, C
    pub const BOOSTER_SOFT_START_PHASE_A: u8 = 0x17;
    pub const BOOSTER_SOFT_START_PHASE_B: u8 = 0x17;
    pub const BOOSTER_SOFT_START_PHASE_C: u8 = 0x17;

    // Power Setting (0x01)
    pub const POWER_SETTING_INTERNAL_DCDC: u8 = 0x03; // VDS_EN, VDG_EN
    pub const POWER_SETTING_VCOM_VGHL: u8 = 0x00; // VCOM_HV, VGHL_LV = 16V
    pub const POWER_SETTING_VDH: u8 = 0x2B; // +11V
    pub const POWER_SETTING_VDL: u8 = 0x2B; // -11V
    pub const POWER_SETTING_VDHR: u8 = 0x03;

    // Panel Setting (0x00)
    pub const PANEL_SETTING_BW_OTP_LUT: u8 = 0x1F; // KW mode, LUT from OTP, scan up, shift right
    pub const PANEL_SETTING_VCOM_DEFAULT: u8 = 0x0D;

    // PLL Control (0x30)
    pub const PLL_50HZ: u8 = 0x3C;

    // VCOM and Data Interval Setting (0x50)
    // WBmode: VBDF 17|D7 VBDW 97 VBDB 57   WBRmode: VBDF F7 VBDW 77 VBDB 37 VBDR B7
    pub const VCOM_DATA_INTERVAL_NORMAL: u8 = 0x97; // border follows white
    pub const VCOM_DATA_INTERVAL_SLEEP: u8 = 0xF7; // border floating before power off

    // Deep Sleep (0x07) check code
    pub const DEEP_SLEEP_CHECK_CODE: u8 = 0xA5;

    // Resolution Setting (0x61) middle byte, the vertical resolution high bits stay zero
    pub const RESOLUTION_VRES_HIGH: u8 = 0x00;

    // RAM patterns, bit = 1 is white on this panel
    pub const RAM_ALL_WHITE: u8 = 0xFF;
    pub const RAM_ALL_BLACK: u8 = 0x00;
}
