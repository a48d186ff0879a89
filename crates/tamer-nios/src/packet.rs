/*
 * Packet format for accesses to blocks with 8-bit addresses and 8-bit data.
 *
 *                              Request
 *                      ----------------------
 *
 * +================+=========================================================+
 * |  Byte offset   |                       Description                       |
 * +================+=========================================================+
 * |        0       | Magic Value ('A')                                       |
 * +----------------+---------------------------------------------------------+
 * |        1       | Target ID                                               |
 * +----------------+---------------------------------------------------------+
 * |        2       | Flags (bit 0: 1 = write, bit 1: success in response)    |
 * +----------------+---------------------------------------------------------+
 * |        3       | Reserved. Set to 0x00.                                  |
 * +----------------+---------------------------------------------------------+
 * |        4       | 8-bit address                                           |
 * +----------------+---------------------------------------------------------+
 * |        5       | 8-bit data                                              |
 * +----------------+---------------------------------------------------------+
 * |      15:6      | Reserved. Set to 0.                                     |
 * +----------------+---------------------------------------------------------+
 *
 * The response echoes the request. On a read, the data field carries the
 * value read back.
 */

use crate::{NIOS_PKT_LEN, NiosPktMagic};
use std::fmt::{Debug, Formatter, LowerHex};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PacketError {
    #[error("invalid magic number {0:#04x}")]
    InvalidMagic(u8),
    #[error("invalid reserved byte {0:#04x}")]
    InvalidReserved(u8),
    #[error("nonzero padding")]
    InvalidPadding(Vec<u8>),
    #[error("invalid packet length {0}")]
    InvalidLength(usize),
}

pub struct NiosPkt8x8 {
    buf: Vec<u8>,
}

impl NiosPkt8x8 {
    pub const IDX_MAGIC: usize = 0;
    pub const IDX_TARGET_ID: usize = 1;
    pub const IDX_FLAGS: usize = 2;
    pub const IDX_RESERVED: usize = 3;
    pub const IDX_ADDR: usize = 4;
    pub const IDX_DATA: usize = 5;
    pub const IDX_PADDING: usize = 6;

    pub const FLAG_READ: u8 = 0;
    pub const FLAG_WRITE: u8 = 1;
    pub const FLAG_SUCCESS: u8 = 2;

    pub const MAGIC: u8 = NiosPktMagic::_8X8 as u8;

    pub fn new(target_id: u8, flags: u8, addr: u8, data: u8) -> Self {
        let mut pkt: Self = vec![0u8; NIOS_PKT_LEN].into();
        pkt.set(target_id, flags, addr, data);
        pkt
    }

    /// Read request for register `addr` of `target_id`.
    pub fn read(target_id: u8, addr: u8) -> Self {
        Self::new(target_id, Self::FLAG_READ, addr, 0x00)
    }

    /// Write request of `data` to register `addr` of `target_id`.
    pub fn write(target_id: u8, addr: u8, data: u8) -> Self {
        Self::new(target_id, Self::FLAG_WRITE, addr, data)
    }

    pub fn set(&mut self, target_id: u8, flags: u8, addr: u8, data: u8) -> &mut Self {
        self.buf[Self::IDX_MAGIC] = Self::MAGIC;
        self.buf[Self::IDX_TARGET_ID] = target_id;
        self.buf[Self::IDX_FLAGS] = flags;
        self.buf[Self::IDX_RESERVED] = 0x00;
        self.buf[Self::IDX_ADDR] = addr;
        self.buf[Self::IDX_DATA] = data;
        self
    }

    pub fn validate(&self) -> Result<(), PacketError> {
        if self.buf.len() != NIOS_PKT_LEN {
            return Err(PacketError::InvalidLength(self.buf.len()));
        }
        if self.magic() != Self::MAGIC {
            return Err(PacketError::InvalidMagic(self.magic()));
        }
        if self.buf[Self::IDX_RESERVED] != 0x00 {
            return Err(PacketError::InvalidReserved(self.buf[Self::IDX_RESERVED]));
        }
        let padding = &self.buf[Self::IDX_PADDING..];
        if padding.iter().any(|&b| b != 0) {
            return Err(PacketError::InvalidPadding(padding.to_vec()));
        }
        Ok(())
    }

    pub fn magic(&self) -> u8 {
        self.buf[Self::IDX_MAGIC]
    }

    pub fn target_id(&self) -> u8 {
        self.buf[Self::IDX_TARGET_ID]
    }

    pub fn flags(&self) -> u8 {
        self.buf[Self::IDX_FLAGS]
    }

    pub fn addr(&self) -> u8 {
        self.buf[Self::IDX_ADDR]
    }

    pub fn data(&self) -> u8 {
        self.buf[Self::IDX_DATA]
    }

    pub fn is_write(&self) -> bool {
        (self.flags() & Self::FLAG_WRITE) != 0
    }

    pub fn is_success(&self) -> bool {
        (self.flags() & Self::FLAG_SUCCESS) != 0
    }
}

impl From<Vec<u8>> for NiosPkt8x8 {
    /// Wraps a received buffer as is. Call [`NiosPkt8x8::validate`] before
    /// using the accessors on a buffer of unknown length.
    fn from(buf: Vec<u8>) -> Self {
        Self { buf }
    }
}

impl From<NiosPkt8x8> for Vec<u8> {
    fn from(value: NiosPkt8x8) -> Self {
        value.buf
    }
}

impl Debug for NiosPkt8x8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NiosPkt8x8")
            .field("magic", &format_args!("{:#04x}", self.magic()))
            .field("target_id", &format_args!("{:#04x}", self.target_id()))
            .field("flags", &format_args!("{:#04x}", self.flags()))
            .field("addr", &format_args!("{:#04x}", self.addr()))
            .field("data", &format_args!("{:#04x}", self.data()))
            .finish()
    }
}

impl LowerHex for NiosPkt8x8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in &self.buf {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
