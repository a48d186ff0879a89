pub mod capture;

use crate::Result;
use crate::bus::TamerBus;
use bit_field::BitField;
use tamer_globals::{
    VT_CTRL_ADDR, VT_CTRL_IRQ_CLR_BIT, VT_CTRL_IRQ_EN_BIT, VT_CTRL_RESET_BIT,
    VT_CTRL_TUNE_MODE_BITS, VT_STAT_ADDR, VT_STATE_ADDR, VT_STATE_IDLE,
};

/// Reference edge the tamer measures the oscillator against.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum TuneMode {
    Invalid = -1,
    Disabled = 0,
    OnePps = 1,
    TenMhz = 2,
}

impl From<u8> for TuneMode {
    fn from(value: u8) -> Self {
        match value {
            0 => TuneMode::Disabled,
            1 => TuneMode::OnePps,
            2 => TuneMode::TenMhz,
            _ => TuneMode::Invalid,
        }
    }
}

impl TuneMode {
    /// Value of the two bit mode field, `None` for [`TuneMode::Invalid`].
    pub fn bits(self) -> Option<u8> {
        match self {
            TuneMode::Invalid => None,
            mode => Some(mode as u8),
        }
    }
}

/// Cached copy of the control register.
///
/// The hardware register is never read back. Every toggle goes through this
/// shadow and is then written through as a whole byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlRegister(u8);

impl ControlRegister {
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Counters held in reset.
    pub fn reset(self) -> bool {
        self.0.get_bit(VT_CTRL_RESET_BIT)
    }

    pub fn irq_enable(self) -> bool {
        self.0.get_bit(VT_CTRL_IRQ_EN_BIT)
    }

    pub fn tune_mode(self) -> TuneMode {
        TuneMode::from(self.0.get_bits(VT_CTRL_TUNE_MODE_BITS))
    }

    fn set_reset(&mut self, reset: bool) {
        self.0.set_bit(VT_CTRL_RESET_BIT, reset);
    }

    fn set_irq_enable(&mut self, enable: bool) {
        self.0.set_bit(VT_CTRL_IRQ_EN_BIT, enable);
    }

    fn set_tune_mode(&mut self, bits: u8) {
        self.0.set_bits(VT_CTRL_TUNE_MODE_BITS, bits);
    }

    /// Byte to write for an interrupt acknowledge. The pulse bit deasserts by
    /// itself, so it never lands in the shadow.
    fn with_irq_clear(self) -> u8 {
        let mut bits = self.0;
        bits.set_bit(VT_CTRL_IRQ_CLR_BIT, true);
        bits
    }
}

/// Register level driver of the tamer measurement block.
pub struct VctcxoTamer<B: TamerBus> {
    bus: B,
    ctrl: ControlRegister,
}

impl<B: TamerBus> VctcxoTamer<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            ctrl: ControlRegister::default(),
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Last value written to the control register, minus any clear pulse.
    pub fn control(&self) -> ControlRegister {
        self.ctrl
    }

    pub fn read(&mut self, addr: u8) -> Result<u8> {
        self.bus.read(addr)
    }

    pub fn write(&mut self, addr: u8, data: u8) -> Result<()> {
        log::trace!("tamer[{addr:#04x}] <- {data:#04x}");
        self.bus.write(addr, data)
    }

    fn write_control(&mut self) -> Result<()> {
        self.write(VT_CTRL_ADDR, self.ctrl.bits())
    }

    /// Holds (`true`) or releases the PPS counters.
    pub fn reset_counters(&mut self, reset: bool) -> Result<()> {
        self.ctrl.set_reset(reset);
        self.write_control()
    }

    pub fn enable_isr(&mut self, enable: bool) -> Result<()> {
        self.ctrl.set_irq_enable(enable);
        self.write_control()
    }

    pub fn clear_isr(&mut self) -> Result<()> {
        self.write(VT_CTRL_ADDR, self.ctrl.with_irq_clear())
    }

    /// Switches the reference. Counters are restarted and interrupts come back
    /// on unless the mode is [`TuneMode::Disabled`].
    ///
    /// [`TuneMode::Invalid`] is ignored and touches no register.
    pub fn set_tune_mode(&mut self, mode: TuneMode) -> Result<()> {
        let Some(bits) = mode.bits() else {
            return Ok(());
        };

        // Interrupts stay off while stale counter state is flushed
        self.enable_isr(false)?;

        self.ctrl.set_tune_mode(bits);
        self.write_control()?;

        self.reset_counters(true)?;

        if mode != TuneMode::Disabled {
            self.reset_counters(false)?;
            self.enable_isr(true)?;
        }

        Ok(())
    }

    /// Reads a signed 32 bit little-endian count spread over four registers.
    pub fn read_count(&mut self, addr: u8) -> Result<i32> {
        let mut bytes = [0u8; 4];
        for (offset, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read(addr.wrapping_add(offset as u8))?;
        }
        Ok(i32::from_le_bytes(bytes))
    }

    /// Epoch completion flags, non-zero while a measurement is pending.
    pub fn read_status(&mut self) -> Result<u8> {
        self.read(VT_STAT_ADDR)
    }

    pub fn write_state(&mut self, state: u8) -> Result<()> {
        self.write(VT_STATE_ADDR, state)
    }

    /// Brings the block up in 1 PPS mode.
    pub fn init(&mut self) -> Result<()> {
        self.write_state(VT_STATE_IDLE)?;
        self.set_tune_mode(TuneMode::OnePps)
    }

    /// Stops measuring and leaves interrupts off.
    pub fn disable(&mut self) -> Result<()> {
        self.set_tune_mode(TuneMode::Disabled)?;
        self.write_state(VT_STATE_IDLE)
    }
}
