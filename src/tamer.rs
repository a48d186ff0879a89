pub mod calibration;
pub mod status;
pub mod supervisor;

pub use crate::hardware::vctcxo_tamer::capture::{Epoch, MeasurementRecord};
pub use calibration::{CalPoint, CalibrationLine, TuneState};
pub use status::TamerStatus;

use crate::Result;
use crate::bus::TamerBus;
use crate::hardware::trim_dac::TrimDac;
use crate::hardware::vctcxo_tamer::VctcxoTamer;
use tamer_globals::TamerConfig;

/// Everything the disciplining loop owns: the register driver with its
/// control shadow, the trim value, the measurement slot and the calibration.
pub struct Tamer<B: TamerBus> {
    hw: VctcxoTamer<B>,
    dac: TrimDac,
    config: TamerConfig,
    record: MeasurementRecord,
    cal_line: CalibrationLine,
    tune_state: TuneState,
    enabled: bool,
}

impl<B: TamerBus> Tamer<B> {
    /// Takes ownership of the bus and writes the power-up trim value.
    ///
    /// The block itself stays untouched until the enable signal rises.
    pub fn new(bus: B, config: TamerConfig) -> Result<Self> {
        let config = config.validated()?;
        let mut tamer = Self {
            hw: VctcxoTamer::new(bus),
            dac: TrimDac::new(),
            config,
            record: MeasurementRecord::default(),
            cal_line: CalibrationLine::new(&config),
            tune_state: TuneState::default(),
            enabled: false,
        };
        tamer.dac.write(&mut tamer.hw, config.dac_default)?;
        log::debug!("Trim DAC at power-up value {:#06x}", config.dac_default);
        Ok(tamer)
    }

    pub fn config(&self) -> &TamerConfig {
        &self.config
    }

    pub fn hardware(&self) -> &VctcxoTamer<B> {
        &self.hw
    }

    pub fn bus(&self) -> &B {
        self.hw.bus()
    }

    pub fn into_inner(self) -> B {
        self.hw.into_inner()
    }

    pub fn tune_state(&self) -> TuneState {
        self.tune_state
    }

    /// Current trim DAC value.
    pub fn trim_dac(&self) -> u16 {
        self.dac.value()
    }

    pub fn record(&self) -> &MeasurementRecord {
        &self.record
    }

    pub fn calibration_line(&self) -> &CalibrationLine {
        &self.cal_line
    }

    /// Enable level seen on the last poll.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
