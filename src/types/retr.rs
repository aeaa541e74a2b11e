use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

/// The automatic retransmission policy stored in the SETUP_RETR register.
///
/// The register packs the count into the low nibble and `delay / 250 - 1`
/// into the high nibble, so only multiples of 250 microseconds are
/// representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retr {
    count: u8,
    delay_us: u16,
}

impl Retr {
    pub const MAX_COUNT: u8 = 15;
    pub const DELAY_STEP_US: u16 = 250;
    pub const MAX_DELAY_US: u16 = 4000;

    /// Create a policy of up to `count` retransmits, each `delay_us` apart.
    ///
    /// Panics if `count` exceeds 15 or if `delay_us` is not one of
    /// 250, 500, ..., 4000.
    pub const fn new(count: u8, delay_us: u16) -> Self {
        assert!(count <= Self::MAX_COUNT, "retransmit count must be in range [0, 15]");
        assert!(
            delay_us >= Self::DELAY_STEP_US
                && delay_us <= Self::MAX_DELAY_US
                && delay_us % Self::DELAY_STEP_US == 0,
            "retransmit delay must be a multiple of 250 in range [250, 4000]"
        );
        Self { count, delay_us }
    }

    /// Disable automatic retransmission.
    pub const fn disabled() -> Self {
        Self::new(0, Self::DELAY_STEP_US)
    }

    pub const fn count(&self) -> u8 {
        self.count
    }

    pub const fn delay_us(&self) -> u16 {
        self.delay_us
    }

    pub const fn into_bits(self) -> u8 {
        (((self.delay_us / Self::DELAY_STEP_US) - 1) as u8) << 4 | self.count
    }

    pub const fn from_bits(value: u8) -> Self {
        Self {
            count: value & 0xF,
            delay_us: ((value >> 4) as u16 + 1) * Self::DELAY_STEP_US,
        }
    }
}

impl Default for Retr {
    /// The chip's reset value: 3 retransmits, 250 microseconds apart.
    fn default() -> Self {
        Self::from_bits(0x03)
    }
}

impl Display for Retr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} times, {} us", self.count, self.delay_us)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Retr {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u8} times, {=u16} us", self.count, self.delay_us)
    }
}

/// The OBSERVE_TX register: transmit counters.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct ObserveTx {
    /// Retransmits used by the last packet. Reset when a new packet is written.
    #[bits(4, access = RO)]
    pub arc_cnt: u8,
    /// Lost packets. Saturates at 15 and resets when RF_CH is written.
    #[bits(4, access = RO)]
    pub plos_cnt: u8,
}

impl Display for ObserveTx {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "PLOS:{} ARC:{}", self.plos_cnt(), self.arc_cnt())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ObserveTx {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "PLOS:{=u8} ARC:{=u8}", self.plos_cnt(), self.arc_cnt())
    }
}
