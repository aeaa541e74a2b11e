use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

use super::{
    flags::{flag, write_flags, Flag},
    CrcLength,
};

/// The CONFIG register.
///
/// Writing this register replaces every bit at once. Callers that only want to
/// change one setting read the register first and modify the returned value.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Cfg {
    /// RX/TX control. `true` selects PRX, `false` selects PTX.
    pub prim_rx: bool,
    /// Power up (`true`) or power down (`false`).
    pub pwr_up: bool,
    /// CRC encoding scheme. `false` is 1 byte, `true` is 2 bytes.
    pub crco: bool,
    /// Enable CRC. The radio forces this on if any pipe has auto-ack enabled.
    pub en_crc: bool,
    /// Mask the interrupt caused by `max_rt`.
    pub mask_max_rt: bool,
    /// Mask the interrupt caused by `tx_ds`.
    pub mask_tx_ds: bool,
    /// Mask the interrupt caused by `rx_dr`.
    pub mask_rx_dr: bool,
    #[bits(1)]
    _reserved: u8,
}

impl Cfg {
    pub(crate) const CRC_MASK: u8 = 0b1100;

    pub(crate) const FLAGS: &'static [Flag] = &[
        flag(6, "MaskRxDR"),
        flag(5, "MaskTxDS"),
        flag(4, "MaskMaxRT"),
        flag(3, "EnCRC"),
        flag(2, "CRCO"),
        flag(1, "PwrUp"),
        flag(0, "PrimRx"),
    ];

    pub const fn crc_length(&self) -> CrcLength {
        CrcLength::from_bits(self.into_bits() & Self::CRC_MASK)
    }

    pub const fn with_crc_length(self, length: CrcLength) -> Self {
        Self::from_bits(self.into_bits() & !Self::CRC_MASK | length.into_bits())
    }
}

impl Display for Cfg {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_flags(f, Self::FLAGS, self.into_bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Cfg {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Cfg prim_rx: {}, pwr_up: {}, crc: {}, masked(rx_dr: {}, tx_ds: {}, max_rt: {})",
            self.prim_rx(),
            self.pwr_up(),
            self.crc_length(),
            self.mask_rx_dr(),
            self.mask_tx_ds(),
            self.mask_max_rt()
        )
    }
}
