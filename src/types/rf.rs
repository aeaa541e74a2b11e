use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

use super::{
    flags::{flag, write_flags, Flag},
    DataRate,
};

/// The RF_SETUP register.
///
/// Output power occupies bits 1-2 and is only reachable through
/// [`Rf::pwr()`] and [`Rf::with_pwr()`]; the data rate spans the
/// `dr_low`/`dr_high` bits and is also exposed as a [`DataRate`].
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Rf {
    /// LNA gain (nRF24L01 and Si24R1 only; always on for nRF24L01+).
    pub lna_hc: bool,
    #[bits(2)]
    _pwr: u8,
    /// Select 2 Mbps (when `dr_low` is clear).
    pub dr_high: bool,
    /// Force PLL lock signal. Only used in test.
    pub pll_lock: bool,
    /// Select 250 kbps.
    pub dr_low: bool,
    #[bits(1)]
    _reserved: u8,
    /// Continuous carrier transmit.
    pub cont_wave: bool,
}

impl Rf {
    const PWR_MASK: u8 = 0b110;
    /// The lowest output power in dBm.
    pub const MIN_DBM: i8 = -18;
    /// The highest output power in dBm.
    pub const MAX_DBM: i8 = 0;

    pub(crate) const FLAGS: &'static [Flag] = &[
        flag(7, "Wave"),
        flag(5, "DRLow"),
        flag(4, "Lock"),
        flag(3, "DRHigh"),
        flag(0, "LNAHC"),
    ];

    /// Output power in TX mode (dBm): one of -18, -12, -6 or 0.
    pub const fn pwr(&self) -> i8 {
        3 * (self.into_bits() & Self::PWR_MASK) as i8 + Self::MIN_DBM
    }

    /// Set the output power to the highest level that does not exceed `dbm`.
    ///
    /// Values outside [-18, 0] are clamped first.
    pub const fn with_pwr(self, dbm: i8) -> Self {
        let bits = self.into_bits() & !Self::PWR_MASK;
        Self::from_bits(bits | encode_pwr(dbm))
    }

    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits() & DataRate::MASK)
    }

    pub const fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self::from_bits(self.into_bits() & !DataRate::MASK | data_rate.into_bits())
    }
}

const fn encode_pwr(dbm: i8) -> u8 {
    let dbm = if dbm < Rf::MIN_DBM {
        Rf::MIN_DBM
    } else if dbm > Rf::MAX_DBM {
        Rf::MAX_DBM
    } else {
        dbm
    };
    // 4 levels, 6 dB apart, rounded toward the lower level
    (((dbm - Rf::MIN_DBM) / 6) as u8) << 1
}

impl Display for Rf {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_flags(f, Self::FLAGS, self.into_bits())?;
        write!(f, " Pwr:{}dBm", self.pwr())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Rf {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Rf pwr: {=i8} dBm, data rate: {}, lna: {}, cont_wave: {}",
            self.pwr(),
            self.data_rate(),
            self.lna_hc(),
            self.cont_wave()
        )
    }
}
