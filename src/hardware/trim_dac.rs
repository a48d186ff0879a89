use crate::Result;
use crate::bus::TamerBus;
use crate::hardware::vctcxo_tamer::VctcxoTamer;
use tamer_globals::{VT_DAC_TUNED_VAL_ADDR0, VT_DAC_TUNED_VAL_ADDR1};

/// Owner of the VCTCXO trim value.
///
/// The value held here is authoritative; the DAC is never read back. No range
/// check happens on write, callers clamp.
#[derive(Debug, Default)]
pub struct TrimDac {
    value: u16,
}

impl TrimDac {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written.
    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn write<B: TamerBus>(&mut self, tamer: &mut VctcxoTamer<B>, value: u16) -> Result<()> {
        self.value = value;

        let [tuned_val_lsb, tuned_val_msb] = value.to_le_bytes();

        tamer.write(VT_DAC_TUNED_VAL_ADDR0, tuned_val_lsb)?;
        tamer.write(VT_DAC_TUNED_VAL_ADDR1, tuned_val_msb)
    }
}
