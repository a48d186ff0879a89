pub mod trim_dac;
pub mod vctcxo_tamer;
