//! The hardware seam: one full-duplex exchange and the CE line.
use core::fmt::{Debug, Display, Formatter, Result as FmtResult};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// The minimum time (in microseconds) that CE must stay high to start a transmission.
pub const CE_PULSE_US: u32 = 10;

/// What to do with the radio's CE pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipEnable {
    /// Drive CE low (standby).
    Low,
    /// Drive CE high (RX listening, or TX while the TX FIFO is not empty).
    High,
    /// Drive CE high for at least [`CE_PULSE_US`] microseconds, then low.
    Pulse,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChipEnable {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ChipEnable::Low => defmt::write!(fmt, "Low"),
            ChipEnable::High => defmt::write!(fmt, "High"),
            ChipEnable::Pulse => defmt::write!(fmt, "Pulse"),
        }
    }
}

/// The capability a [`Device`](crate::radio::Device) needs from the hardware.
///
/// Any link to the radio can implement this: a hardware SPI peripheral
/// (see [`HalTransport`]), a bit-banged port, or a simulation.
pub trait Transport {
    type Error;

    /// Perform one full-duplex exchange with CSN asserted for its whole duration.
    ///
    /// The bytes in `buf` are shifted out and replaced by the bytes shifted in.
    fn exchange(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Drive the CE pin.
    ///
    /// A [`ChipEnable::Pulse`] is emitted as one unit: implementations must not
    /// return between the rising and the falling edge.
    fn set_ce(&mut self, ce: ChipEnable) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn exchange(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::exchange(self, buf)
    }

    fn set_ce(&mut self, ce: ChipEnable) -> Result<(), Self::Error> {
        T::set_ce(self, ce)
    }
}

/// An collection of error types to describe failures of a [`HalTransport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalError<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
}

impl<SPI: Debug, DO: Debug> Display for HalError<SPI, DO> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            HalError::Spi(e) => write!(f, "SPI transaction failed: {e:?}"),
            HalError::Gpo(e) => write!(f, "CE pin output failed: {e:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<SPI: Debug, DO: Debug> std::error::Error for HalError<SPI, DO> {}

#[cfg(feature = "defmt")]
impl<SPI, DO> defmt::Format for HalError<SPI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            HalError::Spi(_) => defmt::write!(fmt, "SPI transaction failed"),
            HalError::Gpo(_) => defmt::write!(fmt, "CE pin output failed"),
        }
    }
}

/// A [`Transport`] built from `embedded-hal` traits.
///
/// The radio's CSN pin (aka Chip Select pin) shall be defined
/// when instantiating the [`SpiDevice`] object (passed to the
/// `spi` parameter).
pub struct HalTransport<SPI, DO, DELAY> {
    spi: SPI,
    ce_pin: DO,
    delay_impl: DELAY,
}

impl<SPI, DO, DELAY> HalTransport<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> Self {
        Self {
            spi,
            ce_pin,
            delay_impl,
        }
    }

    /// Give back the wrapped peripherals.
    pub fn release(self) -> (DO, SPI, DELAY) {
        (self.ce_pin, self.spi, self.delay_impl)
    }
}

impl<SPI, DO, DELAY> Transport for HalTransport<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type Error = HalError<SPI::Error, DO::Error>;

    fn exchange(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.transfer_in_place(buf).map_err(HalError::Spi)
    }

    fn set_ce(&mut self, ce: ChipEnable) -> Result<(), Self::Error> {
        match ce {
            ChipEnable::Low => self.ce_pin.set_low().map_err(HalError::Gpo),
            ChipEnable::High => self.ce_pin.set_high().map_err(HalError::Gpo),
            ChipEnable::Pulse => {
                self.ce_pin.set_high().map_err(HalError::Gpo)?;
                self.delay_impl.delay_us(CE_PULSE_US);
                self.ce_pin.set_low().map_err(HalError::Gpo)
            }
        }
    }
}
