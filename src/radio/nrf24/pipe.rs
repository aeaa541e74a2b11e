use super::{registers, Device, Nrf24Result};
use crate::{radio::Transport, types::check_pipe, Pipe, Status};

/// The widest address the radio supports.
pub const MAX_ADDRESS_WIDTH: usize = 5;

const fn check_address(len: usize) {
    assert!(
        len <= MAX_ADDRESS_WIDTH,
        "address must not be longer than 5 bytes"
    );
}

impl<T: Transport> Device<T> {
    /// The pipes that automatically acknowledge received packets (EN_AA register).
    pub fn aa(&mut self) -> Nrf24Result<T, (Pipe, Status)> {
        let (value, status) = self.read_byte(registers::EN_AA)?;
        Ok((Pipe::from_bits(value & Pipe::MASK), status))
    }

    pub fn set_aa(&mut self, pipes: Pipe) -> Nrf24Result<T, Status> {
        self.write_byte(registers::EN_AA, pipes.into_bits() & Pipe::MASK)
    }

    /// The pipes that accept packets at all (EN_RXADDR register).
    pub fn rx_ae(&mut self) -> Nrf24Result<T, (Pipe, Status)> {
        let (value, status) = self.read_byte(registers::EN_RXADDR)?;
        Ok((Pipe::from_bits(value & Pipe::MASK), status))
    }

    pub fn set_rx_ae(&mut self, pipes: Pipe) -> Nrf24Result<T, Status> {
        self.write_byte(registers::EN_RXADDR, pipes.into_bits() & Pipe::MASK)
    }

    /// The address width in bytes (3, 4 or 5).
    pub fn aw(&mut self) -> Nrf24Result<T, (u8, Status)> {
        let (value, status) = self.read_byte(registers::SETUP_AW)?;
        Ok(((value & 3) + 2, status))
    }

    /// Set the address width used by every pipe and by TX_ADDR.
    ///
    /// Panics if `width` is not 3, 4 or 5.
    pub fn set_aw(&mut self, width: u8) -> Nrf24Result<T, Status> {
        assert!(
            (3..=5).contains(&width),
            "address width must be in range [3, 5]"
        );
        self.write_byte(registers::SETUP_AW, width - 2)
    }

    /// Read the RX address of `pipe` into `addr`.
    ///
    /// Pipes 2 to 5 only store their least significant byte, so `addr` should
    /// be 1 byte long for them.
    /// Panics if `pipe` is greater than 5 or `addr` is longer than 5 bytes.
    pub fn rx_addr(&mut self, pipe: u8, addr: &mut [u8]) -> Nrf24Result<T, Status> {
        check_pipe(pipe);
        check_address(addr.len());
        self.reg(registers::RX_ADDR_P0 + pipe, addr)
    }

    /// Write the RX address of `pipe`, least significant byte first.
    ///
    /// Pipes 2 to 5 share the upper bytes with pipe 1, so only a 1 byte
    /// `addr` is accepted for them.
    /// Panics if `pipe` is greater than 5, `addr` is longer than 5 bytes, or
    /// `addr` is longer than 1 byte for pipes 2 to 5.
    pub fn set_rx_addr(&mut self, pipe: u8, addr: &[u8]) -> Nrf24Result<T, Status> {
        check_pipe(pipe);
        check_address(addr.len());
        assert!(
            pipe < 2 || addr.len() <= 1,
            "pipes 2 to 5 only take the least significant address byte"
        );
        self.set_reg(registers::RX_ADDR_P0 + pipe, addr)
    }

    /// The least significant RX address byte of `pipe`.
    ///
    /// Panics if `pipe` is greater than 5.
    pub fn rx_addr_lsb(&mut self, pipe: u8) -> Nrf24Result<T, (u8, Status)> {
        check_pipe(pipe);
        self.read_byte(registers::RX_ADDR_P0 + pipe)
    }

    /// Overwrite only the least significant RX address byte of `pipe`.
    ///
    /// Panics if `pipe` is greater than 5.
    pub fn set_rx_addr_lsb(&mut self, pipe: u8, lsb: u8) -> Nrf24Result<T, Status> {
        check_pipe(pipe);
        self.write_byte(registers::RX_ADDR_P0 + pipe, lsb)
    }

    /// Read the TX address into `addr`.
    ///
    /// Panics if `addr` is longer than 5 bytes.
    pub fn tx_addr(&mut self, addr: &mut [u8]) -> Nrf24Result<T, Status> {
        check_address(addr.len());
        self.reg(registers::TX_ADDR, addr)
    }

    /// Write the TX address, least significant byte first.
    ///
    /// With auto-ack, RX_ADDR_P0 must hold the same address to receive the ACK.
    /// Panics if `addr` is longer than 5 bytes.
    pub fn set_tx_addr(&mut self, addr: &[u8]) -> Nrf24Result<T, Status> {
        check_address(addr.len());
        self.set_reg(registers::TX_ADDR, addr)
    }

    /// The static payload width of `pipe` (0 means the pipe is unused).
    ///
    /// Panics if `pipe` is greater than 5.
    pub fn rx_pw(&mut self, pipe: u8) -> Nrf24Result<T, (u8, Status)> {
        check_pipe(pipe);
        let (value, status) = self.read_byte(registers::RX_PW_P0 + pipe)?;
        Ok((value & 0x3F, status))
    }

    /// Panics if `pipe` is greater than 5 or `width` is greater than 32.
    pub fn set_rx_pw(&mut self, pipe: u8, width: u8) -> Nrf24Result<T, Status> {
        check_pipe(pipe);
        super::check_payload(width as usize);
        self.write_byte(registers::RX_PW_P0 + pipe, width)
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
        Pipe,
    };
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn pipe_sets() {
        let spi_expectations = spi_test_expects![
            (vec![registers::EN_AA | 0x20, 0x3Fu8], vec![0xEu8, 0u8]),
            (vec![registers::EN_RXADDR, 0u8], vec![0xEu8, 0x03u8]),
            (vec![registers::EN_RXADDR | 0x20, 0x07u8], vec![0xEu8, 0u8]),
        ];
        let mocks = mk_device(&[], &spi_expectations);
        let (mut device, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        device.set_aa(Pipe::all()).unwrap();
        let (pipes, _) = device.rx_ae().unwrap();
        assert!(pipes.contains(1));
        assert!(!pipes.contains(2));
        device.set_rx_ae(pipes.with_pipe(2, true)).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn address_width() {
        let spi_expectations = spi_test_expects![
            (vec![registers::SETUP_AW | 0x20, 1u8], vec![0xEu8, 0u8]),
            (vec![registers::SETUP_AW | 0x20, 2u8], vec![0xEu8, 0u8]),
            (vec![registers::SETUP_AW | 0x20, 3u8], vec![0xEu8, 0u8]),
            (vec![registers::SETUP_AW, 0u8], vec![0xEu8, 3u8]),
        ];
        let mocks = mk_device(&[], &spi_expectations);
        let (mut device, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        for width in 3..=5 {
            device.set_aw(width).unwrap();
        }
        assert_eq!(device.aw().unwrap().0, 5);
        spi.done();
        ce_pin.done();
    }

    #[test]
    #[should_panic]
    fn address_width_too_short() {
        let mut device = Device::new(SimChip::new());
        let _ = device.set_aw(2);
    }

    #[test]
    #[should_panic]
    fn address_width_too_long() {
        let mut device = Device::new(SimChip::new());
        let _ = device.set_aw(6);
    }

    #[test]
    fn addresses() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::TX_ADDR | 0x20, 1, 2, 3, 4, 5],
                vec![0xEu8, 0, 0, 0, 0, 0],
            ),
            (
                vec![registers::RX_ADDR_P0 + 1, 0, 0, 0, 0, 0],
                vec![0xEu8, 0xC2, 0xC2, 0xC2, 0xC2, 0xC2],
            ),
            (vec![(registers::RX_ADDR_P0 + 3) | 0x20, 0x42u8], vec![0xEu8, 0u8]),
            (vec![registers::RX_ADDR_P0 + 5, 0u8], vec![0xEu8, 0xC6u8]),
        ];
        let mocks = mk_device(&[], &spi_expectations);
        let (mut device, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        device.set_tx_addr(&[1, 2, 3, 4, 5]).unwrap();
        let mut addr = [0u8; 5];
        device.rx_addr(1, &mut addr).unwrap();
        assert_eq!(addr, [0xC2; 5]);
        device.set_rx_addr(3, &[0x42]).unwrap();
        assert_eq!(device.rx_addr_lsb(5).unwrap().0, 0xC6);
        spi.done();
        ce_pin.done();
    }

    #[test]
    #[should_panic]
    fn shared_address_bytes() {
        let mut device = Device::new(SimChip::new());
        let _ = device.set_rx_addr(2, &[1, 2]);
    }

    #[test]
    #[should_panic]
    fn address_too_long() {
        let mut device = Device::new(SimChip::new());
        let _ = device.set_tx_addr(&[0u8; 6]);
    }

    #[test]
    fn payload_widths() {
        let spi_expectations = spi_test_expects![
            (vec![(registers::RX_PW_P0 + 2) | 0x20, 32u8], vec![0xEu8, 0u8]),
            (vec![registers::RX_PW_P0 + 2, 0u8], vec![0xEu8, 0xE0u8]),
        ];
        let mocks = mk_device(&[], &spi_expectations);
        let (mut device, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        device.set_rx_pw(2, 32).unwrap();
        // the upper 2 bits are reserved
        assert_eq!(device.rx_pw(2).unwrap().0, 32);
        spi.done();
        ce_pin.done();
    }

    #[test]
    #[should_panic]
    fn payload_width_too_long() {
        let mut device = Device::new(SimChip::new());
        let _ = device.set_rx_pw(0, 33);
    }
}
