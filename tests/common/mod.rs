/// This module has been created using mod.rs in a subfolder, instead of just creating a common.rs under tests
/// This is due to the test runner then not searching for runnable tests in mod.rs
/// https://doc.rust-lang.org/rust-by-example/testing/integration_testing.html
use std::cell::RefCell;
use std::rc::Rc;
use vctcxo_tamer_rs::{
    Result, TamerBus, VT_CTRL_ADDR, VT_CTRL_IRQ_CLR, VT_DAC_TUNED_VAL_ADDR0,
    VT_DAC_TUNED_VAL_ADDR1, VT_ERR_1S_ADDR, VT_ERR_10S_ADDR, VT_ERR_100S_ADDR, VT_STAT_ADDR,
};

pub fn logging_init(module: &str) {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Error)
        .filter_module(module, log::LevelFilter::Trace)
        .filter_module("vctcxo_tamer_rs", log::LevelFilter::Trace)
        .try_init();
}

pub struct Registers {
    pub regs: [u8; 256],
    pub writes: Vec<(u8, u8)>,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            regs: [0; 256],
            writes: Vec::new(),
        }
    }
}

/// Register file standing in for the tamer block.
///
/// Clones share the same registers, so a test keeps one handle while the
/// driver owns the other. Writing the interrupt clear bit clears the status
/// register, like the hardware does.
#[derive(Clone, Default)]
pub struct FakeBus(pub Rc<RefCell<Registers>>);

#[allow(dead_code)]
impl FakeBus {
    pub fn reg(&self, addr: u8) -> u8 {
        self.0.borrow().regs[addr as usize]
    }

    pub fn control(&self) -> u8 {
        self.reg(VT_CTRL_ADDR)
    }

    pub fn dac(&self) -> u16 {
        u16::from_le_bytes([
            self.reg(VT_DAC_TUNED_VAL_ADDR0),
            self.reg(VT_DAC_TUNED_VAL_ADDR1),
        ])
    }

    /// Values written to `addr`, oldest first.
    pub fn writes_to(&self, addr: u8) -> Vec<u8> {
        self.0
            .borrow()
            .writes
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, data)| *data)
            .collect()
    }

    pub fn clear_writes(&self) {
        self.0.borrow_mut().writes.clear();
    }

    pub fn snapshot(&self) -> [u8; 256] {
        self.0.borrow().regs
    }

    pub fn stage_count(&self, addr: u8, value: i32) {
        let mut inner = self.0.borrow_mut();
        for (offset, byte) in value.to_le_bytes().into_iter().enumerate() {
            inner.regs[addr as usize + offset] = byte;
        }
    }

    /// Latches the three error counts and raises `status`, as if epochs completed.
    pub fn complete_epochs(&self, status: u8, e1: i32, e10: i32, e100: i32) {
        self.stage_count(VT_ERR_1S_ADDR, e1);
        self.stage_count(VT_ERR_10S_ADDR, e10);
        self.stage_count(VT_ERR_100S_ADDR, e100);
        self.0.borrow_mut().regs[VT_STAT_ADDR as usize] = status;
    }
}

impl TamerBus for FakeBus {
    fn read(&mut self, addr: u8) -> Result<u8> {
        Ok(self.reg(addr))
    }

    fn write(&mut self, addr: u8, data: u8) -> Result<()> {
        let mut inner = self.0.borrow_mut();
        inner.regs[addr as usize] = data;
        inner.writes.push((addr, data));
        if addr == VT_CTRL_ADDR && (data & VT_CTRL_IRQ_CLR) != 0 {
            inner.regs[VT_STAT_ADDR as usize] = 0;
        }
        Ok(())
    }
}
