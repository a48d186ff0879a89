mod common;

use crate::common::*;

use vctcxo_tamer_rs::{
    Result, TrimDac, TuneMode, VT_CTRL_ADDR, VT_DAC_TUNED_VAL_ADDR0, VT_DAC_TUNED_VAL_ADDR1,
    VT_ERR_10S_ADDR, VT_STATE_ADDR, VctcxoTamer,
};

#[test]
fn set_tune_mode_one_pps() -> Result<()> {
    logging_init("tamer_registers");
    let bus = FakeBus::default();
    let mut tamer = VctcxoTamer::new(bus.clone());

    tamer.set_tune_mode(TuneMode::OnePps)?;

    // irq off, mode, reset, release, irq on
    assert_eq!(bus.writes_to(VT_CTRL_ADDR), vec![0x00, 0x40, 0x41, 0x40, 0x42]);
    assert_eq!(tamer.control().bits(), 0x42);
    assert_eq!(tamer.control().tune_mode(), TuneMode::OnePps);
    assert!(tamer.control().irq_enable());
    assert!(!tamer.control().reset());
    Ok(())
}

#[test]
fn set_tune_mode_disabled() -> Result<()> {
    logging_init("tamer_registers");
    let bus = FakeBus::default();
    let mut tamer = VctcxoTamer::new(bus.clone());

    tamer.set_tune_mode(TuneMode::TenMhz)?;
    bus.clear_writes();
    tamer.set_tune_mode(TuneMode::Disabled)?;

    // irq off, mode cleared, counters held
    assert_eq!(bus.writes_to(VT_CTRL_ADDR), vec![0x80, 0x00, 0x01]);
    assert_eq!(tamer.control().tune_mode(), TuneMode::Disabled);
    assert!(tamer.control().reset());
    assert!(!tamer.control().irq_enable());
    Ok(())
}

#[test]
fn set_tune_mode_invalid_is_ignored() -> Result<()> {
    logging_init("tamer_registers");
    let bus = FakeBus::default();
    let mut tamer = VctcxoTamer::new(bus.clone());
    tamer.set_tune_mode(TuneMode::OnePps)?;
    bus.clear_writes();

    for raw in [3, 4, 0xFF] {
        tamer.set_tune_mode(TuneMode::from(raw))?;
    }

    assert!(bus.0.borrow().writes.is_empty());
    assert_eq!(tamer.control().bits(), 0x42);
    Ok(())
}

#[test]
fn shadow_tracks_every_toggle() -> Result<()> {
    logging_init("tamer_registers");
    let bus = FakeBus::default();
    let mut tamer = VctcxoTamer::new(bus.clone());

    tamer.enable_isr(true)?;
    assert_eq!(bus.control(), 0x02);
    tamer.reset_counters(true)?;
    assert_eq!(bus.control(), 0x03);
    tamer.enable_isr(false)?;
    assert_eq!(bus.control(), 0x01);
    tamer.reset_counters(false)?;
    assert_eq!(bus.control(), 0x00);
    assert_eq!(tamer.control().bits(), bus.control());
    Ok(())
}

#[test]
fn clear_isr_pulses_without_touching_shadow() -> Result<()> {
    logging_init("tamer_registers");
    let bus = FakeBus::default();
    let mut tamer = VctcxoTamer::new(bus.clone());
    tamer.set_tune_mode(TuneMode::OnePps)?;

    tamer.clear_isr()?;

    assert_eq!(bus.writes_to(VT_CTRL_ADDR).last(), Some(&0x46));
    assert_eq!(tamer.control().bits(), 0x42);

    tamer.reset_counters(true)?;
    assert_eq!(bus.control(), 0x43);
    Ok(())
}

#[test]
fn read_count_little_endian() -> Result<()> {
    logging_init("tamer_registers");
    let bus = FakeBus::default();
    let mut tamer = VctcxoTamer::new(bus.clone());

    bus.stage_count(VT_ERR_10S_ADDR, -2);
    assert_eq!(tamer.read_count(VT_ERR_10S_ADDR)?, -2);

    bus.stage_count(VT_ERR_10S_ADDR, 0x1234_5678);
    assert_eq!(bus.reg(VT_ERR_10S_ADDR), 0x78);
    assert_eq!(tamer.read_count(VT_ERR_10S_ADDR)?, 0x1234_5678);
    Ok(())
}

#[test]
fn disable_is_idempotent() -> Result<()> {
    logging_init("tamer_registers");
    let bus = FakeBus::default();
    let mut tamer = VctcxoTamer::new(bus.clone());
    tamer.init()?;

    tamer.disable()?;
    let once = (bus.snapshot(), tamer.control());
    tamer.disable()?;
    let twice = (bus.snapshot(), tamer.control());

    assert_eq!(once, twice);
    assert_eq!(bus.reg(VT_STATE_ADDR), 0x00);
    Ok(())
}

#[test]
fn trim_dac_write_splits_bytes() -> Result<()> {
    logging_init("tamer_registers");
    let bus = FakeBus::default();
    let mut tamer = VctcxoTamer::new(bus.clone());
    let mut dac = TrimDac::new();

    dac.write(&mut tamer, 0x77FA)?;

    assert_eq!(dac.value(), 0x77FA);
    assert_eq!(bus.writes_to(VT_DAC_TUNED_VAL_ADDR0), vec![0xFA]);
    assert_eq!(bus.writes_to(VT_DAC_TUNED_VAL_ADDR1), vec![0x77]);
    assert_eq!(bus.dac(), 0x77FA);
    Ok(())
}
