use super::{registers, Device, Nrf24Result};
use crate::{radio::Transport, Rf, Status};

/// The highest RF channel (2400 + 125 MHz is outside the ISM band).
pub const MAX_CHANNEL: u8 = 127;

impl<T: Transport> Device<T> {
    /// The RF channel; the carrier frequency is `2400 + ch` MHz.
    pub fn ch(&mut self) -> Nrf24Result<T, (u8, Status)> {
        let (value, status) = self.read_byte(registers::RF_CH)?;
        Ok((value & MAX_CHANNEL, status))
    }

    /// Panics if `ch` is greater than 127.
    pub fn set_ch(&mut self, ch: u8) -> Nrf24Result<T, Status> {
        assert!(ch <= MAX_CHANNEL, "channel must be in range [0, 127]");
        self.write_byte(registers::RF_CH, ch)
    }

    /// Read the RF_SETUP register.
    pub fn rf(&mut self) -> Nrf24Result<T, (Rf, Status)> {
        let (value, status) = self.read_byte(registers::RF_SETUP)?;
        Ok((Rf::from_bits(value), status))
    }

    pub fn set_rf(&mut self, rf: Rf) -> Nrf24Result<T, Status> {
        self.write_byte(registers::RF_SETUP, rf.into_bits())
    }

    /// Received Power Detector: was a signal stronger than -64 dBm present on
    /// the channel while listening?
    pub fn rpd(&mut self) -> Nrf24Result<T, (bool, Status)> {
        let (value, status) = self.read_byte(registers::RPD)?;
        Ok((value & 1 == 1, status))
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::registers;
    use crate::{
        radio::Device,
        spi_test_expects,
        test::{mk_device, SimChip},
        DataRate, Rf,
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn channel() {
        let spi_expectations = spi_test_expects![
            (vec![registers::RF_CH | 0x20, 127u8], vec![0xEu8, 0u8]),
            (vec![registers::RF_CH, 0u8], vec![0xEu8, 0xFFu8]),
        ];
        let mocks = mk_device(&[], &spi_expectations);
        let (mut device, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        device.set_ch(127).unwrap();
        assert_eq!(device.ch().unwrap().0, 127);
        spi.done();
        ce_pin.done();
    }

    #[test]
    #[should_panic]
    fn channel_out_of_range() {
        let mut device = Device::new(SimChip::new());
        let _ = device.set_ch(128);
    }

    #[test]
    fn rf_setup() {
        let spi_expectations = spi_test_expects![
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x0Fu8]),
            (vec![registers::RF_SETUP | 0x20, 0x23u8], vec![0xEu8, 0u8]),
            (vec![registers::RPD, 0u8], vec![0xEu8, 1u8]),
        ];
        let mocks = mk_device(&[], &spi_expectations);
        let (mut device, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let (rf, _) = device.rf().unwrap();
        assert_eq!(rf.pwr(), 0);
        assert_eq!(rf.data_rate(), DataRate::Mbps2);
        let rf: Rf = rf.with_data_rate(DataRate::Kbps250).with_pwr(-12);
        device.set_rf(rf).unwrap();
        assert!(device.rpd().unwrap().0);
        spi.done();
        ce_pin.done();
    }
}
