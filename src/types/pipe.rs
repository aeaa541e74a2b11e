use core::fmt::{Display, Formatter, Result};

use bitfield_struct::bitfield;

use super::flags::{flag, write_flags, Flag};

/// The highest data pipe number.
pub const MAX_PIPE: u8 = 5;

/// Panic unless `pipe` names one of the 6 data pipes.
pub(crate) const fn check_pipe(pipe: u8) {
    assert!(pipe <= MAX_PIPE, "pipe number must be in range [0, 5]");
}

/// A set of RX data pipes (bit `n` represents pipe `n`).
///
/// Used by the EN_AA, EN_RXADDR and DYNPD registers.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct Pipe {
    pub p0: bool,
    pub p1: bool,
    pub p2: bool,
    pub p3: bool,
    pub p4: bool,
    pub p5: bool,
    #[bits(2)]
    _reserved: u8,
}

impl Pipe {
    pub(crate) const MASK: u8 = 0x3F;

    pub(crate) const FLAGS: &'static [Flag] = &[
        flag(5, "P5"),
        flag(4, "P4"),
        flag(3, "P3"),
        flag(2, "P2"),
        flag(1, "P1"),
        flag(0, "P0"),
    ];

    /// Every pipe.
    pub const fn all() -> Self {
        Self::from_bits(Self::MASK)
    }

    /// A set that contains only `pipe`.
    ///
    /// Panics if `pipe` is greater than 5.
    pub const fn single(pipe: u8) -> Self {
        check_pipe(pipe);
        Self::from_bits(1 << pipe)
    }

    /// Is `pipe` a member of this set?
    ///
    /// Panics if `pipe` is greater than 5.
    pub const fn contains(&self, pipe: u8) -> bool {
        check_pipe(pipe);
        self.into_bits() & (1 << pipe) != 0
    }

    /// Add `pipe` to (`enable == true`) or remove it from this set.
    ///
    /// Panics if `pipe` is greater than 5.
    pub const fn with_pipe(self, pipe: u8, enable: bool) -> Self {
        check_pipe(pipe);
        let bits = self.into_bits() & !(1 << pipe);
        Self::from_bits(bits | ((enable as u8) << pipe))
    }
}

impl Display for Pipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_flags(f, Self::FLAGS, self.into_bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Pipe {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Pipe {=u8:#08b}", self.into_bits())
    }
}
