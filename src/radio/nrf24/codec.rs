use super::{check_payload, commands, registers, Device, Nrf24Result};
use crate::{radio::Transport, types::check_pipe, Status};

impl<T: Transport> Device<T> {
    /// Read `value.len()` bytes from the register at `address`.
    ///
    /// Panics if `address` is greater than 0x1F or `value` is longer than 32 bytes.
    pub fn reg(&mut self, address: u8, value: &mut [u8]) -> Nrf24Result<T, Status> {
        assert!(
            address <= registers::MAX_ADDRESS,
            "register address must fit in 5 bits"
        );
        check_payload(value.len());
        let status = self.spi_read(address, value.len())?;
        value.copy_from_slice(&self.buf[1..=value.len()]);
        Ok(status)
    }

    /// Write `value` to the register at `address`.
    ///
    /// Panics if `address` is greater than 0x1F or `value` is longer than 32 bytes.
    pub fn set_reg(&mut self, address: u8, value: &[u8]) -> Nrf24Result<T, Status> {
        assert!(
            address <= registers::MAX_ADDRESS,
            "register address must fit in 5 bits"
        );
        check_payload(value.len());
        self.spi_write(address | commands::W_REGISTER, value)
    }

    /// Read the payload at the top of the RX FIFO into `buf`.
    ///
    /// The caller must know how many bytes to read: either the static width of
    /// the pipe or the result of [`Device::rx_payload_width()`].
    /// Panics if `buf` is longer than 32 bytes.
    pub fn read_rx_payload(&mut self, buf: &mut [u8]) -> Nrf24Result<T, Status> {
        check_payload(buf.len());
        let status = self.spi_read(commands::R_RX_PAYLOAD, buf.len())?;
        buf.copy_from_slice(&self.buf[1..=buf.len()]);
        Ok(status)
    }

    /// Upload `payload` into the TX FIFO.
    ///
    /// Panics if `payload` is longer than 32 bytes.
    pub fn write_tx_payload(&mut self, payload: &[u8]) -> Nrf24Result<T, Status> {
        check_payload(payload.len());
        self.spi_write(commands::W_TX_PAYLOAD, payload)
    }

    /// Upload `payload` into the TX FIFO, asking the receiver not to acknowledge it.
    ///
    /// This sends the same opcode as [`Device::write_tx_payload()`]. Whether
    /// the packet asks for an ACK is decided by
    /// [`Feature::dyn_ack`](crate::Feature::dyn_ack), so enable it first.
    /// Panics if `payload` is longer than 32 bytes.
    pub fn write_tx_payload_no_ack(&mut self, payload: &[u8]) -> Nrf24Result<T, Status> {
        check_payload(payload.len());
        self.spi_write(commands::W_TX_PAYLOAD_NO_ACK, payload)
    }

    /// Queue `payload` to be attached to the next ACK packet sent on `pipe`.
    ///
    /// Requires [`Feature::ack_pay`](crate::Feature::ack_pay) and dynamic payloads.
    /// Panics if `pipe` is greater than 5 or `payload` is longer than 32 bytes.
    pub fn write_ack_payload(&mut self, pipe: u8, payload: &[u8]) -> Nrf24Result<T, Status> {
        check_pipe(pipe);
        check_payload(payload.len());
        self.spi_write(commands::W_ACK_PAYLOAD | pipe, payload)
    }

    /// Discard all 3 levels of the TX FIFO.
    pub fn flush_tx(&mut self) -> Nrf24Result<T, Status> {
        self.spi_read(commands::FLUSH_TX, 0)
    }

    /// Discard all 3 levels of the RX FIFO.
    pub fn flush_rx(&mut self) -> Nrf24Result<T, Status> {
        self.spi_read(commands::FLUSH_RX, 0)
    }

    /// Keep transmitting the last payload on every CE pulse until the TX FIFO
    /// is flushed or written.
    pub fn reuse_tx_payload(&mut self) -> Nrf24Result<T, Status> {
        self.spi_read(commands::REUSE_TX_PL, 0)
    }

    /// Fetch the STATUS byte without any side effect.
    pub fn nop(&mut self) -> Nrf24Result<T, Status> {
        self.spi_read(commands::NOP, 0)
    }

    /// Send the ACTIVATE command followed by `value`.
    ///
    /// Non-plus variants need `activate(0x73)` before FEATURE and DYNPD can be used.
    pub fn activate(&mut self, value: u8) -> Nrf24Result<T, Status> {
        self.spi_write(commands::ACTIVATE, &[value])
    }

    /// The length of the payload at the top of the RX FIFO.
    ///
    /// A length greater than 32 means the RX FIFO is corrupt and must be flushed.
    pub fn rx_payload_width(&mut self) -> Nrf24Result<T, (u8, Status)> {
        self.read_byte(commands::R_RX_PL_WID)
    }
}
