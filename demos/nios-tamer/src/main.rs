use anyhow::Result;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};
use vctcxo_tamer_rs::{NiosBus, Tamer, TamerConfig};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Disciplines the VCTCXO of the first bladeRF found, or of the one whose
/// serial is given as first argument. A second argument limits the run time
/// in seconds.
fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .filter_module("nusb", log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let bus = match args.next() {
        Some(serial) => NiosBus::from_serial(&serial)?,
        None => NiosBus::from_first()?,
    };
    let deadline = args
        .next()
        .map(|secs| secs.parse::<u64>())
        .transpose()?
        .map(|secs| Instant::now() + Duration::from_secs(secs));

    let mut tamer = Tamer::new(bus, TamerConfig::default())?;
    let mut enable = AtomicBool::new(true);

    let mut last = tamer.status();
    log::info!("{last}");

    while deadline.is_none_or(|deadline| Instant::now() < deadline) {
        tamer.run_once(&mut enable)?;

        let status = tamer.status();
        if status.tune_state != last.tune_state || status.dac_tuned_val != last.dac_tuned_val {
            log::info!("{status}");
        }
        last = status;

        std::thread::sleep(POLL_INTERVAL);
    }

    // Leave the block idle with the last trim in place
    tamer.poll(false)?;
    log::info!("{}", tamer.status());

    Ok(())
}
