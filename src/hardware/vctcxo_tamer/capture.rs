use crate::Result;
use crate::bus::TamerBus;
use crate::hardware::vctcxo_tamer::VctcxoTamer;
use tamer_globals::{
    VT_ERR_1S_ADDR, VT_ERR_10S_ADDR, VT_ERR_100S_ADDR, VT_STAT_ERR_1S, VT_STAT_ERR_10S,
    VT_STAT_ERR_100S,
};

/// Integration window of a measurement.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Epoch {
    OneSecond,
    TenSeconds,
    HundredSeconds,
}

impl Epoch {
    /// All epochs, finest first.
    pub const ALL: [Epoch; 3] = [Epoch::OneSecond, Epoch::TenSeconds, Epoch::HundredSeconds];

    /// Window length in seconds.
    pub fn scale(self) -> i32 {
        match self {
            Epoch::OneSecond => 1,
            Epoch::TenSeconds => 10,
            Epoch::HundredSeconds => 100,
        }
    }
}

/// Single slot hand-off between [`VctcxoTamer::capture`] and the calibration loop.
///
/// A capture overwrites whatever is in the slot, consumed or not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeasurementRecord {
    pub pps_1s_error: i32,
    pub pps_10s_error: i32,
    pub pps_100s_error: i32,
    pub pps_1s_error_flag: bool,
    pub pps_10s_error_flag: bool,
    pub pps_100s_error_flag: bool,
    /// Set by a capture, cleared by whoever consumes the record.
    pub ready: bool,
}

impl MeasurementRecord {
    pub fn error(&self, epoch: Epoch) -> i32 {
        match epoch {
            Epoch::OneSecond => self.pps_1s_error,
            Epoch::TenSeconds => self.pps_10s_error,
            Epoch::HundredSeconds => self.pps_100s_error,
        }
    }

    pub fn completed(&self, epoch: Epoch) -> bool {
        match epoch {
            Epoch::OneSecond => self.pps_1s_error_flag,
            Epoch::TenSeconds => self.pps_10s_error_flag,
            Epoch::HundredSeconds => self.pps_100s_error_flag,
        }
    }

    /// Finest completed epoch and its error count.
    pub fn finest_completed(&self) -> Option<(Epoch, i32)> {
        Epoch::ALL
            .into_iter()
            .find(|&epoch| self.completed(epoch))
            .map(|epoch| (epoch, self.error(epoch)))
    }
}

impl<B: TamerBus> VctcxoTamer<B> {
    /// Latches the three error counters and the completion flags into `pkt`.
    ///
    /// Counters are left in reset and the interrupt disabled. The consumer
    /// releases both once it is done with the frozen counts.
    pub fn capture(&mut self, pkt: &mut MeasurementRecord) -> Result<()> {
        self.enable_isr(false)?;
        self.reset_counters(true)?;

        pkt.pps_1s_error = self.read_count(VT_ERR_1S_ADDR)?;
        pkt.pps_10s_error = self.read_count(VT_ERR_10S_ADDR)?;
        pkt.pps_100s_error = self.read_count(VT_ERR_100S_ADDR)?;

        let error_status = self.read_status()?;
        pkt.pps_1s_error_flag = (error_status & VT_STAT_ERR_1S) != 0;
        pkt.pps_10s_error_flag = (error_status & VT_STAT_ERR_10S) != 0;
        pkt.pps_100s_error_flag = (error_status & VT_STAT_ERR_100S) != 0;

        self.clear_isr()?;

        pkt.ready = true;
        log::trace!("Captured {pkt:?}");
        Ok(())
    }
}
