use crate::bus::TamerBus;
use crate::tamer::{CalibrationLine, Tamer, TuneState};
use std::fmt::{Display, Formatter};

/// Read-only snapshot of the disciplining loop.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct TamerStatus {
    pub enabled: bool,
    pub tune_state: TuneState,
    /// Trim DAC value last written.
    pub dac_tuned_val: u16,
    pub one_s_error: i32,
    pub ten_s_error: i32,
    pub hundred_s_error: i32,
    pub calibration: CalibrationLine,
}

impl TamerStatus {
    /// Coarse calibration has finished and the loop is correcting.
    pub fn is_fine_tuning(&self) -> bool {
        self.tune_state == TuneState::FineTune
    }
}

impl Display for TamerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tamer Status:")?;
        writeln!(f, "  enabled:      {}", self.enabled)?;
        writeln!(f, "  state:        {:?}", self.tune_state)?;
        writeln!(f, "  trim dac:     {:#06x}", self.dac_tuned_val)?;
        writeln!(
            f,
            "  errors:       1s {}, 10s {}, 100s {}",
            self.one_s_error, self.ten_s_error, self.hundred_s_error
        )?;
        write!(f, "  calibration:  {}", self.calibration)
    }
}

impl<B: TamerBus> Tamer<B> {
    pub fn status(&self) -> TamerStatus {
        TamerStatus {
            enabled: self.enabled,
            tune_state: self.tune_state,
            dac_tuned_val: self.dac.value(),
            one_s_error: self.record.pps_1s_error,
            ten_s_error: self.record.pps_10s_error,
            hundred_s_error: self.record.pps_100s_error,
            calibration: self.cal_line,
        }
    }
}
