//! Register map, build-time constants and configuration shared by the tamer crates.

pub mod config;

pub use config::{ConfigError, TamerConfig};

use std::ops::Range;

/*
 * Register map of the VCTCXO tamer block.
 *
 * Each register is one byte wide and sits on a 4-byte stride, so index `n`
 * lives at `base + 4 * n`. The error counters are 32-bit little-endian values
 * spread over four consecutive indices.
 *
 * +=======+=============================================+
 * | Index | Register                                    |
 * +=======+=============================================+
 * | 0x00  | Control (see VT_CTRL_*)                     |
 * | 0x01  | Status (see VT_STAT_*)                      |
 * | 0x02  | State (firmware owned, see VT_STATE_*)      |
 * | 0x04  | 1s error count, bytes 0..3                  |
 * | 0x0C  | 10s error count, bytes 0..3                 |
 * | 0x14  | 100s error count, bytes 0..3                |
 * | 0x20  | Trim DAC value, low byte                    |
 * | 0x21  | Trim DAC value, high byte                   |
 * +-------+---------------------------------------------+
 */
pub const VT_CTRL_ADDR: u8 = 0x00;
pub const VT_STAT_ADDR: u8 = 0x01;
pub const VT_STATE_ADDR: u8 = 0x02;
pub const VT_ERR_1S_ADDR: u8 = 0x04;
pub const VT_ERR_10S_ADDR: u8 = 0x0C;
pub const VT_ERR_100S_ADDR: u8 = 0x14;
pub const VT_DAC_TUNED_VAL_ADDR0: u8 = 0x20;
pub const VT_DAC_TUNED_VAL_ADDR1: u8 = 0x21;

/// Byte distance between two consecutive register indices.
pub const VT_REG_STRIDE: usize = 4;

/// Counters are held (do not advance) while set.
pub const VT_CTRL_RESET_BIT: usize = 0;
/// Interrupt enable.
pub const VT_CTRL_IRQ_EN_BIT: usize = 1;
/// Write-only, self clearing interrupt acknowledge.
pub const VT_CTRL_IRQ_CLR_BIT: usize = 2;
/// Two bit tuning mode field.
pub const VT_CTRL_TUNE_MODE_BITS: Range<usize> = 6..8;

pub const VT_CTRL_IRQ_CLR: u8 = 1 << VT_CTRL_IRQ_CLR_BIT;

/// 1 second measurement epoch completed.
pub const VT_STAT_ERR_1S: u8 = 1 << 0;
/// 10 second measurement epoch completed.
pub const VT_STAT_ERR_10S: u8 = 1 << 1;
/// 100 second measurement epoch completed.
pub const VT_STAT_ERR_100S: u8 = 1 << 2;

/// Value of the state register while idle or calibrating.
pub const VT_STATE_IDLE: u8 = 0x00;
/// Value of the state register once coarse calibration has finished.
pub const VT_STATE_COARSE_DONE: u8 = 0x01;

/// Bit of the external enable register that requests the tamer to run.
pub const TAMER_ENABLE_BIT: usize = 0;

/// Resolution of the stock trim DAC.
pub const DAC_BITS: u8 = 16;
/// Lowest trim DAC count.
pub const DAC_MIN: u16 = 0x0000;
/// Highest trim DAC count for a 16 bit DAC.
pub const DAC_MAX: u16 = 0xFFFF;
/// Power-up trim value, also used when the calibration points are degenerate.
pub const DAC_DEFAULT: u16 = 0x77FA;

/// BladeRF1 USB vendor ID.
pub const BLADERF1_USB_VID: u16 = 0x2CF0;
/// BladeRF1 USB product ID.
pub const BLADERF1_USB_PID: u16 = 0x5246;

/// Interface alternate setting that exposes the NIOS bulk endpoints.
pub const USB_IF_RF_LINK: u8 = 0x01;

pub const ENDPOINT_OUT: u8 = 0x02;
pub const ENDPOINT_IN: u8 = 0x82;
