use crate::Result;
use crate::bus::{EnableSignal, TamerBus};
use crate::tamer::Tamer;
use std::convert::Infallible;

impl<B: TamerBus> Tamer<B> {
    /// One iteration of the control loop, with `enable` as the current level
    /// of the external enable signal.
    ///
    /// 1. A non-zero status register triggers a capture into the record slot.
    /// 2. A rising edge re-initialises the block in 1 PPS mode and forces a
    ///    ready record so bracketing starts right away. A falling edge disables
    ///    the block and drops any pending record. Both restart calibration.
    /// 3. The calibration state machine runs if a record is ready.
    pub fn poll(&mut self, enable: bool) -> Result<()> {
        let was_enabled = self.enabled;
        self.enabled = enable;

        if self.hw.read_status()? != 0 {
            self.hw.capture(&mut self.record)?;
        }

        if was_enabled != enable {
            if enable {
                log::debug!("Tamer enabled");
                self.hw.init()?;
                self.restart_calibration();
                self.record.ready = true;
            } else {
                log::debug!("Tamer disabled");
                self.hw.disable()?;
                self.restart_calibration();
                self.record.ready = false;
            }
        }

        self.step()?;
        Ok(())
    }

    /// Samples `signal` once and runs [`Tamer::poll`].
    pub fn run_once<S: EnableSignal + ?Sized>(&mut self, signal: &mut S) -> Result<()> {
        let enable = signal.is_enabled()?;
        self.poll(enable)
    }

    /// Polls forever. Only returns on a bus error.
    pub fn run<S: EnableSignal + ?Sized>(&mut self, signal: &mut S) -> Result<Infallible> {
        loop {
            self.run_once(signal)?;
        }
    }
}
