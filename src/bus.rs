//! Access to the tamer register block and to the external enable signal.

use crate::{Error, Result};
use bit_field::BitField;
use std::ptr::NonNull;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tamer_globals::{TAMER_ENABLE_BIT, VT_REG_STRIDE};

/// Byte wide access to the tamer registers, addressed by register index.
///
/// Implementations map the index onto the physical location; callers never
/// deal with the register stride.
pub trait TamerBus {
    fn read(&mut self, addr: u8) -> Result<u8>;
    fn write(&mut self, addr: u8, data: u8) -> Result<()>;
}

impl<B: TamerBus + ?Sized> TamerBus for Box<B> {
    fn read(&mut self, addr: u8) -> Result<u8> {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u8, data: u8) -> Result<()> {
        (**self).write(addr, data)
    }
}

/// Memory mapped tamer block. Register `n` is the byte at `base + 4 * n`.
#[derive(Debug)]
pub struct Mmio {
    base: NonNull<u8>,
}

impl Mmio {
    /// # Safety
    ///
    /// `base` must point to the tamer block and stay mapped for volatile byte
    /// access for the lifetime of the returned value. Nothing else may write
    /// the control register while this value exists.
    pub unsafe fn new(base: *mut u8) -> Result<Self> {
        NonNull::new(base)
            .map(|base| Self { base })
            .ok_or(Error::Argument("tamer base address is null"))
    }

    /// # Safety
    ///
    /// See [`Mmio::new`].
    pub unsafe fn from_addr(addr: usize) -> Result<Self> {
        unsafe { Self::new(addr as *mut u8) }
    }

    fn reg(&self, addr: u8) -> *mut u8 {
        self.base
            .as_ptr()
            .wrapping_add(VT_REG_STRIDE * usize::from(addr))
    }
}

impl TamerBus for Mmio {
    fn read(&mut self, addr: u8) -> Result<u8> {
        // SAFETY: the block is mapped per the contract of `Mmio::new`.
        Ok(unsafe { self.reg(addr).read_volatile() })
    }

    fn write(&mut self, addr: u8, data: u8) -> Result<()> {
        // SAFETY: the block is mapped per the contract of `Mmio::new`.
        unsafe { self.reg(addr).write_volatile(data) };
        Ok(())
    }
}

/// Source of the single "tamer enable" bit, polled once per loop iteration.
pub trait EnableSignal {
    fn is_enabled(&mut self) -> Result<bool>;
}

/// Enable bit held in a separate 32 bit status register.
#[derive(Debug)]
pub struct CsrEnable {
    reg: NonNull<u32>,
}

impl CsrEnable {
    /// # Safety
    ///
    /// `reg` must point to an aligned, mapped 32 bit register for the lifetime
    /// of the returned value.
    pub unsafe fn new(reg: *mut u32) -> Result<Self> {
        NonNull::new(reg)
            .map(|reg| Self { reg })
            .ok_or(Error::Argument("enable register address is null"))
    }
}

impl EnableSignal for CsrEnable {
    fn is_enabled(&mut self) -> Result<bool> {
        // SAFETY: the register is mapped per the contract of `CsrEnable::new`.
        let status = unsafe { self.reg.as_ptr().read_volatile() };
        Ok(status.get_bit(TAMER_ENABLE_BIT))
    }
}

impl EnableSignal for AtomicBool {
    fn is_enabled(&mut self) -> Result<bool> {
        Ok(self.load(Ordering::Relaxed))
    }
}

impl EnableSignal for Arc<AtomicBool> {
    fn is_enabled(&mut self) -> Result<bool> {
        Ok(self.load(Ordering::Relaxed))
    }
}

impl EnableSignal for bool {
    fn is_enabled(&mut self) -> Result<bool> {
        Ok(*self)
    }
}
