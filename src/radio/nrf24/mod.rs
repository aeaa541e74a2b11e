use core::fmt::{Debug, Display, Formatter, Result as FmtResult};

use log::trace;

use super::transport::{ChipEnable, Transport};
use crate::types::Status;

mod cfg;
mod codec;
mod constants;
mod details;
mod feature;
mod fifo;
mod pipe;
mod retr;
mod rf;
mod status;
pub use constants::{commands, mnemonics, registers, MAX_PAYLOAD};
pub use details::Details;
pub use pipe::MAX_ADDRESS_WIDTH;
pub use rf::MAX_CHANNEL;

/// The errors a [`Device`] or [`PacketEngine`](crate::radio::PacketEngine) can report.
///
/// Invalid arguments (oversized payloads, out-of-range pipes, widths or
/// retransmit settings) are programming errors and panic instead; they never
/// reach the hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nrf24Error<E> {
    /// The [`Transport`] failed to exchange bytes or to drive the CE pin.
    Transport(E),
    /// The TX FIFO was full, so the payload was not uploaded.
    TxFifoFull,
    /// A transmission was requested while the radio is listening.
    ///
    /// Call [`PacketEngine::standby()`](crate::radio::PacketEngine::standby) first.
    NotIdle,
    /// [`PacketEngine::resend()`](crate::radio::PacketEngine::resend) was
    /// called without a sent payload left in the radio.
    NothingToResend,
}

impl<E: Debug> Display for Nrf24Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Nrf24Error::Transport(e) => write!(f, "transport failure: {e:?}"),
            Nrf24Error::TxFifoFull => write!(f, "TX FIFO is full"),
            Nrf24Error::NotIdle => write!(f, "radio is listening, not idle"),
            Nrf24Error::NothingToResend => write!(f, "no sent payload to resend"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: Debug> std::error::Error for Nrf24Error<E> {}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Nrf24Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Transport(_) => defmt::write!(fmt, "transport failure"),
            Nrf24Error::TxFifoFull => defmt::write!(fmt, "TX FIFO is full"),
            Nrf24Error::NotIdle => defmt::write!(fmt, "radio is listening, not idle"),
            Nrf24Error::NothingToResend => defmt::write!(fmt, "no sent payload to resend"),
        }
    }
}

/// A shorthand for results of operations on a [`Device`] using transport `T`.
pub type Nrf24Result<T, R> = Result<R, Nrf24Error<<T as Transport>::Error>>;

/// One nRF24L01(+) transceiver.
///
/// Every operation performs exactly one exchange over the owned [`Transport`]
/// and returns the [`Status`] the radio shifted out at the start of that
/// exchange. Register values are never cached; each getter reads the
/// hardware.
pub struct Device<T> {
    transport: T,
    buf: [u8; MAX_PAYLOAD + 1],
}

impl<T: Transport> Device<T> {
    /// Take exclusive ownership of the `transport` connected to one radio.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            buf: [0u8; MAX_PAYLOAD + 1],
        }
    }

    /// Give back the wrapped transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Drive the radio's CE pin.
    ///
    /// Use [`ChipEnable::Pulse`] to start one transmission of the payload at the
    /// top of the TX FIFO.
    pub fn chip_enable(&mut self, ce: ChipEnable) -> Nrf24Result<T, ()> {
        trace!("CE {:?}", ce);
        self.transport.set_ce(ce).map_err(Nrf24Error::Transport)
    }

    fn transfer(&mut self, len: usize) -> Nrf24Result<T, Status> {
        trace!("exchange {:02X?}", &self.buf[..len]);
        self.transport
            .exchange(&mut self.buf[..len])
            .map_err(Nrf24Error::Transport)?;
        Ok(Status::from_bits(self.buf[0]))
    }

    /// Send `command` followed by `len` filler bytes.
    ///
    /// The response is left in `self.buf[1..=len]`.
    fn spi_read(&mut self, command: u8, len: usize) -> Nrf24Result<T, Status> {
        self.buf[0] = command;
        self.buf[1..=len].fill(0);
        self.transfer(len + 1)
    }

    /// Send `command` followed by `data`.
    fn spi_write(&mut self, command: u8, data: &[u8]) -> Nrf24Result<T, Status> {
        self.buf[0] = command;
        self.buf[1..=data.len()].copy_from_slice(data);
        self.transfer(data.len() + 1)
    }

    fn read_byte(&mut self, address: u8) -> Nrf24Result<T, (u8, Status)> {
        let status = self.spi_read(address, 1)?;
        Ok((self.buf[1], status))
    }

    fn write_byte(&mut self, address: u8, value: u8) -> Nrf24Result<T, Status> {
        self.spi_write(address | commands::W_REGISTER, &[value])
    }
}

/// Panic unless `len` fits in one FIFO level.
pub(crate) const fn check_payload(len: usize) {
    assert!(len <= MAX_PAYLOAD, "payload length must not exceed 32 bytes");
}
