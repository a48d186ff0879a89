//! Driver and disciplining loop for a VCTCXO tamer block, written in Rust.
//!
//! A VCTCXO tamer counts the phase error between a voltage controlled,
//! temperature compensated crystal oscillator and a 1 PPS reference (usually
//! from a GPS receiver) over 1s, 10s and 100s windows. [`Tamer`] turns those
//! counts into a 16 bit trim DAC value and keeps the oscillator locked.
//!
//! ## Usage overview
//!
//! The hardware block is reached through a [`TamerBus`]. Two backends exist:
//! - [`Mmio`] for memory mapped access from a soft core next to the block.
//! - [`NiosBus`] (feature `nusb`, enabled by default) for host access over USB,
//!   where every register access is one NIOS 8x8 packet.
//!
//! ```no_run
//! use std::sync::atomic::AtomicBool;
//! use vctcxo_tamer_rs::{NiosBus, Tamer, TamerConfig};
//!
//! let bus = NiosBus::from_first()?;
//! let mut tamer = Tamer::new(bus, TamerConfig::default())?;
//! let mut enable = AtomicBool::new(true);
//! loop {
//!     tamer.run_once(&mut enable)?;
//! }
//! # Ok::<(), vctcxo_tamer_rs::Error>(())
//! ```
//!
//! ## Calibration
//!
//! After the enable signal rises, the trim DAC is driven to its minimum and to
//! its maximum for one measurement each. The two 1s errors define a line of DAC
//! counts over frequency error; its y-intercept is the first estimate of the
//! zero error trim. From then on every completed epoch nudges the trim by the
//! measured error times the slope, divided by the epoch length.
//!
//! ## Known hazard
//!
//! Measurements are handed over through a single slot. A capture that happens
//! before the previous record was consumed overwrites it without notice.

pub mod bus;
pub mod hardware;
#[cfg(feature = "nusb")]
pub mod nios;
pub mod tamer;

pub use bus::{CsrEnable, EnableSignal, Mmio, TamerBus};
pub use hardware::trim_dac::TrimDac;
pub use hardware::vctcxo_tamer::{ControlRegister, TuneMode, VctcxoTamer};
#[cfg(feature = "nusb")]
pub use nios::NiosBus;
pub use tamer::*;

pub use tamer_globals::*;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error occurred.
    #[error("io")]
    Io(#[from] std::io::Error),
    /// USB transfer error.
    #[cfg(feature = "nusb")]
    #[error("transfer")]
    Transfer(#[from] nusb::transfer::TransferError),
    /// Malformed NIOS response.
    #[error("nios packet: {0}")]
    Packet(#[from] tamer_nios::PacketError),
    /// The NIOS core did not flag the request as successful.
    #[error("operation was unsuccessful")]
    Unsuccessful,
    /// Rejected build-time configuration.
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    /// Invalid argument provided.
    #[error("{0}")]
    Argument(&'static str),
    /// Device not found
    #[error("not found")]
    NotFound,
}
/// Result type for operations that may return an `Error`.
pub type Result<T> = std::result::Result<T, Error>;
