use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

use super::{
    flags::{flag, write_flags, Flag},
    FifoState,
};

/// The FIFO_STATUS register.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Fifo {
    /// The RX FIFO holds no payload.
    #[bits(1, access = RO)]
    pub rx_empty: bool,
    /// All 3 levels of the RX FIFO are occupied.
    #[bits(1, access = RO)]
    pub rx_full: bool,
    #[bits(2)]
    _reserved: u8,
    /// The TX FIFO holds no payload.
    #[bits(1, access = RO)]
    pub tx_empty: bool,
    /// All 3 levels of the TX FIFO are occupied.
    #[bits(1, access = RO)]
    pub tx_full: bool,
    /// The last transmitted payload will be reused (REUSE_TX_PL is in effect).
    #[bits(1, access = RO)]
    pub tx_reuse: bool,
    #[bits(1)]
    _reserved2: u8,
}

impl Fifo {
    pub(crate) const FLAGS: &'static [Flag] = &[
        flag(6, "TxReuse"),
        flag(5, "TxFull"),
        flag(4, "TxEmpty"),
        flag(1, "RxFull"),
        flag(0, "RxEmpty"),
    ];

    /// The state of the TX FIFO.
    pub const fn tx_state(&self) -> FifoState {
        FifoState::from_flags(self.tx_empty(), self.tx_full())
    }

    /// The state of the RX FIFO.
    pub const fn rx_state(&self) -> FifoState {
        FifoState::from_flags(self.rx_empty(), self.rx_full())
    }
}

impl Display for Fifo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_flags(f, Self::FLAGS, self.into_bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Fifo {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Fifo tx: {}, rx: {}, reuse: {}",
            self.tx_state(),
            self.rx_state(),
            self.tx_reuse()
        )
    }
}
