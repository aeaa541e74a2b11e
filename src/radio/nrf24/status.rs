use super::{registers, Device, Nrf24Result};
use crate::{radio::Transport, Status};

impl<T: Transport> Device<T> {
    /// Clear the IRQ flags asserted in `flags`.
    ///
    /// Only `rx_dr`, `tx_ds` and `max_rt` are considered; flags that are not
    /// asserted in `flags` are left untouched on the radio.
    pub fn clear(&mut self, flags: Status) -> Nrf24Result<T, Status> {
        self.write_byte(registers::STATUS, flags.into_bits() & Status::IRQ_MASK)
    }
}
