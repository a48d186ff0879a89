//! Tamer register access over USB, through the NIOS II soft core of a bladeRF style FPGA.

use crate::bus::TamerBus;
use crate::{Error, Result};
use futures_lite::future::block_on;
use nusb::transfer::RequestBuffer;
use nusb::{Device, DeviceInfo, Interface};
use tamer_globals::{BLADERF1_USB_PID, BLADERF1_USB_VID, ENDPOINT_IN, ENDPOINT_OUT, USB_IF_RF_LINK};
use tamer_nios::packet::NiosPkt8x8;
use tamer_nios::{NIOS_PKT_8X8_TARGET_VCTCXO_TAMER, NIOS_PKT_LEN};

pub trait Nios {
    fn nios_send(&self, endpoint_out: u8, endpoint_in: u8, pkt: Vec<u8>) -> Result<Vec<u8>>;
}

impl Nios for Interface {
    fn nios_send(&self, endpoint_out: u8, endpoint_in: u8, pkt: Vec<u8>) -> Result<Vec<u8>> {
        log::trace!("BulkOut: {pkt:x?}");
        let response = block_on(self.bulk_out(endpoint_out, pkt)).into_result()?;

        let response = block_on(self.bulk_in(
            endpoint_in,
            RequestBuffer::reuse(response.reuse(), NIOS_PKT_LEN),
        ))
        .into_result()?;
        log::trace!("BulkIn:  {response:x?}");
        Ok(response)
    }
}

/// [`TamerBus`] that forwards every register access as one NIOS 8x8 packet
/// addressed to the VCTCXO tamer target.
pub struct NiosBus {
    interface: Interface,
}

impl NiosBus {
    fn list() -> Result<impl Iterator<Item = DeviceInfo>> {
        Ok(nusb::list_devices()?.filter(|dev| {
            dev.vendor_id() == BLADERF1_USB_VID && dev.product_id() == BLADERF1_USB_PID
        }))
    }

    fn build(device: Device) -> Result<Self> {
        let interface = device.claim_interface(0)?;
        interface.set_alt_setting(USB_IF_RF_LINK)?;
        log::debug!("NIOS link up on alt setting {USB_IF_RF_LINK:#x}");
        Ok(Self { interface })
    }

    /// Opens the first device it can find
    pub fn from_first() -> Result<Self> {
        let device = Self::list()?.next().ok_or(Error::NotFound)?.open()?;
        Self::build(device)
    }

    /// Opens a specific device identified by its serial number
    pub fn from_serial(serial: &str) -> Result<Self> {
        let device = Self::list()?
            .find(|dev| dev.serial_number() == Some(serial))
            .ok_or(Error::NotFound)?
            .open()?;
        Self::build(device)
    }

    fn transact(&self, request: NiosPkt8x8) -> Result<NiosPkt8x8> {
        let response = NiosPkt8x8::from(self.interface.nios_send(
            ENDPOINT_OUT,
            ENDPOINT_IN,
            request.into(),
        )?);
        response.validate()?;
        if !response.is_success() {
            log::error!("NIOS request failed: {response:?}");
            return Err(Error::Unsuccessful);
        }
        Ok(response)
    }
}

impl TamerBus for NiosBus {
    fn read(&mut self, addr: u8) -> Result<u8> {
        let response = self.transact(NiosPkt8x8::read(NIOS_PKT_8X8_TARGET_VCTCXO_TAMER, addr))?;
        Ok(response.data())
    }

    fn write(&mut self, addr: u8, data: u8) -> Result<()> {
        self.transact(NiosPkt8x8::write(
            NIOS_PKT_8X8_TARGET_VCTCXO_TAMER,
            addr,
            data,
        ))?;
        Ok(())
    }
}
