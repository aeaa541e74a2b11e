use super::{registers, Device, Nrf24Result};
use crate::{radio::Transport, Cfg, Status};

impl<T: Transport> Device<T> {
    /// Read the CONFIG register.
    pub fn cfg(&mut self) -> Nrf24Result<T, (Cfg, Status)> {
        let (value, status) = self.read_byte(registers::CONFIG)?;
        Ok((Cfg::from_bits(value), status))
    }

    /// Overwrite the CONFIG register.
    ///
    /// All 8 bits are written. To change a single setting, read the register
    /// with [`Device::cfg()`] first and modify the returned value.
    pub fn set_cfg(&mut self, cfg: Cfg) -> Nrf24Result<T, Status> {
        self.write_byte(registers::CONFIG, cfg.into_bits())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::registers;
    use crate::{spi_test_expects, test::mk_device, Cfg, CrcLength};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn read_modify_write() {
        let spi_expectations = spi_test_expects![
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            (vec![registers::CONFIG | 0x20, 0x0Fu8], vec![0xEu8, 0u8]),
        ];
        let mocks = mk_device(&[], &spi_expectations);
        let (mut device, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let (cfg, _) = device.cfg().unwrap();
        assert!(cfg.pwr_up());
        assert_eq!(cfg.crc_length(), CrcLength::Bit16);
        device.set_cfg(cfg.with_prim_rx(true)).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn masks_survive() {
        let spi_expectations = spi_test_expects![
            (vec![registers::CONFIG | 0x20, 0x7Au8], vec![0xEu8, 0u8]),
        ];
        let mocks = mk_device(&[], &spi_expectations);
        let (mut device, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let cfg = Cfg::new()
            .with_mask_rx_dr(true)
            .with_mask_tx_ds(true)
            .with_mask_max_rt(true)
            .with_crc_length(CrcLength::Bit8)
            .with_pwr_up(true);
        device.set_cfg(cfg).unwrap();
        spi.done();
        ce_pin.done();
    }
}
