use super::{registers, Device, Nrf24Result};
use crate::{radio::Transport, ObserveTx, Retr, Status};

impl<T: Transport> Device<T> {
    /// Read the SETUP_RETR register.
    pub fn retr(&mut self) -> Nrf24Result<T, (Retr, Status)> {
        let (value, status) = self.read_byte(registers::SETUP_RETR)?;
        Ok((Retr::from_bits(value), status))
    }

    pub fn set_retr(&mut self, retr: Retr) -> Nrf24Result<T, Status> {
        self.write_byte(registers::SETUP_RETR, retr.into_bits())
    }

    /// The lost and retransmitted packet counters.
    ///
    /// `arc_cnt` restarts with every new payload; `plos_cnt` saturates at 15
    /// and is reset by writing RF_CH.
    pub fn observe_tx(&mut self) -> Nrf24Result<T, (ObserveTx, Status)> {
        let (value, status) = self.read_byte(registers::OBSERVE_TX)?;
        Ok((ObserveTx::from_bits(value), status))
    }
}
