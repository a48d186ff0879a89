//! Host <-> FPGA (NIOS II) packets used to reach the VCTCXO tamer block over USB.

pub mod packet;

pub use packet::{NiosPkt8x8, PacketError};

#[repr(u8)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum NiosPktMagic {
    _8X8 = 0x41, // 'A'
}

/* Target IDs */
pub const NIOS_PKT_8X8_TARGET_VCTCXO_TAMER: u8 = 0x02; /* VCTCXO Tamer control */

/// Length of every NIOS request and response, in bytes.
pub const NIOS_PKT_LEN: usize = 16;
