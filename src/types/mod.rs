//! Register value types.
//!
//! These are plain values decoded from (or encoded into) a single register
//! byte. None of them touch the hardware; see [`Device`](crate::radio::Device)
//! for the operations that produce and consume them.

use core::fmt::{Display, Formatter, Result};

mod config;
mod feature;
mod fifo;
pub(crate) mod flags;
mod pipe;
mod retr;
mod rf;
mod status;

pub use config::Cfg;
pub use feature::Feature;
pub use fifo::Fifo;
pub(crate) use pipe::check_pipe;
pub use pipe::{Pipe, MAX_PIPE};
pub use retr::{ObserveTx, Retr};
pub use rf::Rf;
pub use status::Status;

/// The on-air rate, selected by RF_DR_LOW (bit 5) and RF_DR_HIGH (bit 3) of RF_SETUP.
///
/// Both radios of a link must use the same rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// Both rate bits clear (the reset value).
    Mbps1,
    /// RF_DR_HIGH set.
    Mbps2,
    /// RF_DR_LOW set. Only the nRF24L01+ supports it.
    Kbps250,
}

impl DataRate {
    // RF_DR_LOW | RF_DR_HIGH
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        // both bits set is reserved; treat it like the reset value
        match value & Self::MASK {
            0x08 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The packet CRC, selected by EN_CRC (bit 3) and CRCO (bit 2) of CONFIG.
///
/// The radio forces CRC on while any pipe has auto-ack enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcLength {
    /// EN_CRC clear; CRCO is ignored.
    Disabled,
    /// EN_CRC set, CRCO clear.
    Bit8,
    /// EN_CRC and CRCO set.
    Bit16,
}

impl CrcLength {
    // EN_CRC | CRCO
    const MASK: u8 = 0x0C;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Disabled => 0,
            CrcLength::Bit8 => 0x08,
            CrcLength::Bit16 => Self::MASK,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x08 => CrcLength::Bit8,
            0x0C => CrcLength::Bit16,
            _ => CrcLength::Disabled,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CrcLength {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcLength::Disabled => defmt::write!(fmt, "disabled"),
            CrcLength::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcLength::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Disabled => write!(f, "disabled"),
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// How many of a FIFO's 3 levels hold a payload, as told by FIFO_STATUS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FifoState {
    /// All 3 levels are taken.
    Full,
    Empty,
    /// 1 or 2 levels are taken.
    Occupied,
}

impl FifoState {
    pub(crate) const fn from_flags(empty: bool, full: bool) -> Self {
        if empty {
            FifoState::Empty
        } else if full {
            FifoState::Full
        } else {
            FifoState::Occupied
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}
