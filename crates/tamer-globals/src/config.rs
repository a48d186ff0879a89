use crate::{DAC_BITS, DAC_DEFAULT, DAC_MAX, DAC_MIN};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("DAC width of {0} bits is not supported (1..=16)")]
    DacBits(u8),
    #[error("DAC range is empty: min {min:#06x} > max {max:#06x}")]
    DacRange { min: u16, max: u16 },
}

/// Build-time parameters of the trim DAC.
///
/// The defaults describe a 16 bit DAC that powers up at [`DAC_DEFAULT`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TamerConfig {
    /// Lowest count written during coarse bracketing.
    pub dac_min: u16,
    /// Highest valid trim count. Every written trim value stays at or below it.
    pub dac_max: u16,
    /// Power-up trim, and the fallback intercept for degenerate calibrations.
    pub dac_default: u16,
}

impl Default for TamerConfig {
    fn default() -> Self {
        Self {
            dac_min: DAC_MIN,
            dac_max: DAC_MAX,
            dac_default: DAC_DEFAULT,
        }
    }
}

impl TamerConfig {
    /// Configuration for a DAC with `bits` of resolution: `dac_max = 2^bits - 1`.
    pub fn with_dac_bits(bits: u8) -> Result<Self, ConfigError> {
        if bits == 0 || bits > DAC_BITS {
            return Err(ConfigError::DacBits(bits));
        }
        let dac_max = ((1u32 << bits) - 1) as u16;
        log::debug!("Trim DAC: {bits} bits, max count {dac_max:#06x}");
        Self {
            dac_max,
            ..Self::default()
        }
        .validated()
    }

    /// Checks the range and pulls `dac_default` into `[dac_min, dac_max]`.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.dac_min > self.dac_max {
            return Err(ConfigError::DacRange {
                min: self.dac_min,
                max: self.dac_max,
            });
        }
        self.dac_default = self.dac_default.clamp(self.dac_min, self.dac_max);
        Ok(self)
    }
}
