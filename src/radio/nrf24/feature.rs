use super::{registers, Device, Nrf24Result};
use crate::{radio::Transport, Feature, Pipe, Status};

impl<T: Transport> Device<T> {
    /// Read the FEATURE register.
    pub fn feature(&mut self) -> Nrf24Result<T, (Feature, Status)> {
        let (value, status) = self.read_byte(registers::FEATURE)?;
        Ok((Feature::from_bits(value), status))
    }

    pub fn set_feature(&mut self, feature: Feature) -> Nrf24Result<T, Status> {
        self.write_byte(registers::FEATURE, feature.into_bits())
    }

    /// The pipes that accept dynamic payload lengths (DYNPD register).
    pub fn dynpd(&mut self) -> Nrf24Result<T, (Pipe, Status)> {
        let (value, status) = self.read_byte(registers::DYNPD)?;
        Ok((Pipe::from_bits(value & Pipe::MASK), status))
    }

    pub fn set_dynpd(&mut self, pipes: Pipe) -> Nrf24Result<T, Status> {
        self.write_byte(registers::DYNPD, pipes.into_bits() & Pipe::MASK)
    }
}
