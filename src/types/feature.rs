use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

use super::flags::{flag, write_flags, Flag};

/// The FEATURE register.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Feature {
    /// Lets a payload written with the no-ack command skip its ACK.
    pub dyn_ack: bool,
    /// Enables payloads attached to ACK packets.
    pub ack_pay: bool,
    /// Enables dynamic payload length.
    pub dpl: bool,
    #[bits(5)]
    _reserved: u8,
}

impl Feature {
    pub(crate) const FLAGS: &'static [Flag] = &[flag(2, "DPL"), flag(1, "AckPay"), flag(0, "DynAck")];
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_flags(f, Self::FLAGS, self.into_bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Feature {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Feature dpl: {}, ack_pay: {}, dyn_ack: {}",
            self.dpl(),
            self.ack_pay(),
            self.dyn_ack()
        )
    }
}
