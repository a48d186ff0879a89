use crate::Result;
use crate::bus::TamerBus;
use crate::tamer::Tamer;
use std::fmt::{Display, Formatter};
use tamer_globals::{TamerConfig, VT_STATE_COARSE_DONE};

/// Calibration state machine
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum TuneState {
    /// Drive the DAC to its minimum and wait for one measurement.
    #[default]
    CoarseTuneMin,
    /// Record the error at minimum, drive the DAC to its maximum.
    CoarseTuneMax,
    /// Record the error at maximum and fit the calibration line.
    CoarseTuneDone,
    /// Proportional correction on every completed epoch. Never left on its own.
    FineTune,
}

/// Calibration point: frequency error `x` measured with the DAC at `y` counts.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct CalPoint {
    pub x: i32,
    pub y: u16,
}

/// Line of DAC counts (y axis) over 1s frequency error (x axis).
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct CalibrationLine {
    pub point: [CalPoint; 2],
    /// DAC counts per unit of error.
    pub slope: f32,
    /// DAC count expected to give zero error.
    pub y_intercept: u16,
}

impl CalibrationLine {
    /// Fresh line with the bracketing DAC values as y coordinates.
    pub fn new(config: &TamerConfig) -> Self {
        Self {
            point: [
                CalPoint {
                    x: 0,
                    y: config.dac_min,
                },
                CalPoint {
                    x: 0,
                    y: config.dac_max,
                },
            ],
            slope: 0.0,
            y_intercept: 0,
        }
    }

    /// Computes slope and intercept from both points.
    ///
    /// Points sharing an x coordinate leave the slope alone and fall back to
    /// `config.dac_default` for the intercept.
    pub fn fit(&mut self, config: &TamerConfig) {
        let [p0, p1] = self.point;
        let dx = i64::from(p1.x) - i64::from(p0.x);

        if dx != 0 {
            self.slope = (f32::from(p1.y) - f32::from(p0.y)) / dx as f32;
            let intercept = i64::from(p0.y) - (self.slope * p0.x as f32).round() as i64;
            self.y_intercept = intercept.clamp(0, i64::from(config.dac_max)) as u16;
        } else {
            log::warn!("Degenerate calibration points (x = {}), using default trim", p0.x);
            self.y_intercept = config.dac_default;
        }
    }
}

impl Display for CalibrationLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {:#06x}) -> ({}, {:#06x}), slope {:.3}, intercept {:#06x}",
            self.point[0].x,
            self.point[0].y,
            self.point[1].x,
            self.point[1].y,
            self.slope,
            self.y_intercept
        )
    }
}

/// Trim after correcting `error`, measured over `scale` seconds.
///
/// `current - round(error * slope) / scale`, clamped to `[0, dac_max]`.
pub fn adjust_trim(current: u16, error: i32, slope: f32, scale: i32, dac_max: u16) -> u16 {
    // Float to int casts saturate, so extreme errors clamp instead of wrapping
    let correction = (error as f32 * slope).round() as i64 / i64::from(scale);
    i64::from(current)
        .saturating_sub(correction)
        .clamp(0, i64::from(dac_max)) as u16
}

impl<B: TamerBus> Tamer<B> {
    /// Runs the calibration state machine on the pending measurement.
    ///
    /// Returns `false` without touching the hardware if no record is ready.
    /// Otherwise the record is consumed, the current state acts on it, and the
    /// counters and interrupt are re-armed.
    pub fn step(&mut self) -> Result<bool> {
        if !self.record.ready {
            return Ok(false);
        }
        self.record.ready = false;

        match self.tune_state {
            TuneState::CoarseTuneMin => {
                log::debug!("COARSE_TUNE_MIN");
                self.dac.write(&mut self.hw, self.config.dac_min)?;
                self.hw.reset_counters(true)?;

                self.tune_state = TuneState::CoarseTuneMax;
            }

            TuneState::CoarseTuneMax => {
                log::debug!("COARSE_TUNE_MAX");
                // Error with the DAC at minimum
                self.cal_line.point[0].x = self.record.pps_1s_error;

                self.dac.write(&mut self.hw, self.config.dac_max)?;
                self.hw.reset_counters(true)?;

                self.tune_state = TuneState::CoarseTuneDone;
            }

            TuneState::CoarseTuneDone => {
                log::debug!("COARSE_TUNE_DONE");
                self.hw.write_state(VT_STATE_COARSE_DONE)?;

                // Error with the DAC at maximum
                self.cal_line.point[1].x = self.record.pps_1s_error;
                self.cal_line.fit(&self.config);
                log::info!("Coarse calibration done: {}", self.cal_line);

                self.dac.write(&mut self.hw, self.cal_line.y_intercept)?;

                self.tune_state = TuneState::FineTune;
            }

            TuneState::FineTune => {
                log::debug!("FINE_TUNE");
                if let Some((epoch, error)) = self.record.finest_completed() {
                    self.adjust_trim_dac(error, epoch.scale())?;
                    log::debug!(
                        "{epoch:?} error {error}, trim now {:#06x}",
                        self.dac.value()
                    );
                }
            }
        }

        self.hw.reset_counters(false)?;
        self.hw.enable_isr(true)?;

        Ok(true)
    }

    fn adjust_trim_dac(&mut self, error: i32, scale: i32) -> Result<()> {
        let value = adjust_trim(
            self.dac.value(),
            error,
            self.cal_line.slope,
            scale,
            self.config.dac_max,
        );
        self.dac.write(&mut self.hw, value)
    }

    /// Starts a new calibration session from [`TuneState::CoarseTuneMin`].
    pub(crate) fn restart_calibration(&mut self) {
        self.tune_state = TuneState::CoarseTuneMin;
        self.cal_line = CalibrationLine::new(&self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_through_full_range() {
        let config = TamerConfig::default();
        let mut line = CalibrationLine::new(&config);
        line.point[0].x = -500;
        line.point[1].x = 500;
        line.fit(&config);

        assert!((line.slope - 65.535).abs() < 1e-4);
        assert_eq!(line.y_intercept, 32768);
    }

    #[test]
    fn intercept_is_clamped() {
        let config = TamerConfig::default();
        let mut line = CalibrationLine::new(&config);
        // Zero error lies far beyond the maximum
        line.point[0].x = -1000;
        line.point[1].x = -10;
        line.fit(&config);
        assert_eq!(line.y_intercept, config.dac_max);

        // ... or below the minimum
        line.point[0].x = 10;
        line.point[1].x = 1000;
        line.fit(&config);
        assert_eq!(line.y_intercept, 0);
    }

    #[test]
    fn degenerate_points() {
        let config = TamerConfig::default();
        let mut line = CalibrationLine::new(&config);
        line.point[0].x = 42;
        line.point[1].x = 42;
        line.fit(&config);

        assert_eq!(line.y_intercept, config.dac_default);
        assert!(line.slope.is_finite());
    }

    #[test]
    fn adjust_trim_scales() {
        assert_eq!(adjust_trim(32768, 10, 65.535, 1, 0xFFFF), 32768 - 655);
        assert_eq!(adjust_trim(32768, 10, 65.535, 10, 0xFFFF), 32768 - 65);
        assert_eq!(adjust_trim(32768, -10, 65.535, 100, 0xFFFF), 32768 + 6);
    }

    #[test]
    fn adjust_trim_clamps() {
        assert_eq!(adjust_trim(32768, i32::MAX, 65.535, 1, 0xFFFF), 0);
        assert_eq!(adjust_trim(32768, i32::MIN, 65.535, 1, 0xFFFF), 0xFFFF);
        assert_eq!(adjust_trim(100, i32::MIN, 65535.0, 1, 0x0FFF), 0x0FFF);
        assert_eq!(adjust_trim(100, 0, f32::MAX, 1, 0x0FFF), 100);
    }
}
