use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

use super::flags::{flag, write_flags, Flag};

/// The STATUS byte that the radio shifts out as the first byte of every exchange.
///
/// The interrupt flags (`rx_dr`, `tx_ds`, `max_rt`) are writable so that a
/// [`Status`] value can also describe which flags to clear:
/// ```
/// use nrf24::Status;
/// let mask = Status::new().with_tx_ds(true).with_max_rt(true);
/// assert_eq!(mask.into_bits(), 0x30);
/// ```
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Status {
    /// The TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,

    #[bits(3)]
    _rx_p_no: u8,

    /// Maximum number of TX retransmits reached (the payload was not acknowledged).
    pub max_rt: bool,

    /// TX Data Sent (acknowledged, when auto-ack is enabled).
    pub tx_ds: bool,

    /// RX Data Ready.
    pub rx_dr: bool,

    #[bits(1)]
    _reserved: u8,
}

impl Status {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub const IRQ_MASK: u8 = 0x70;
    const RX_P_NO_MASK: u8 = 0x0E;

    pub(crate) const FLAGS: &'static [Flag] = &[
        flag(6, "RxDR"),
        flag(5, "TxDS"),
        flag(4, "MaxRT"),
        flag(0, "TxFull"),
    ];

    /// A mask with every IRQ flag asserted (clears all events when written to STATUS).
    pub const fn all_irq() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// The data pipe of the payload at the top of the RX FIFO.
    ///
    /// Returns `None` when the RX FIFO is empty (the all-ones pattern).
    pub const fn rx_pipe(&self) -> Option<u8> {
        let pipe = (self.into_bits() & Self::RX_P_NO_MASK) >> 1;
        if pipe > 5 {
            None
        } else {
            Some(pipe)
        }
    }

    /// Is any of the IRQ events (`rx_dr`, `tx_ds`, `max_rt`) asserted?
    pub const fn has_irq(&self) -> bool {
        self.into_bits() & Self::IRQ_MASK != 0
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_flags(f, Self::FLAGS, self.into_bits())?;
        match self.rx_pipe() {
            Some(pipe) => write!(f, " RxPipe:{pipe}"),
            None => f.write_str(" RxPipe:none"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Status rx_dr: {}, tx_ds: {}, max_rt: {}, tx_full: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.tx_full(),
            self.rx_pipe()
        )
    }
}
