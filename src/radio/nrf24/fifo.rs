use super::{registers, Device, Nrf24Result};
use crate::{radio::Transport, Fifo, Status};

impl<T: Transport> Device<T> {
    /// Read the FIFO_STATUS register.
    pub fn fifo(&mut self) -> Nrf24Result<T, (Fifo, Status)> {
        let (value, status) = self.read_byte(registers::FIFO_STATUS)?;
        Ok((Fifo::from_bits(value), status))
    }
}
