//! Rendering of register bitfields as a list of named flags.
//!
//! Every register type carries a table of `(bit, label)` pairs ordered from
//! the most significant bit down. A set bit renders as `Label+`, a cleared bit
//! as `Label-`, and the tokens are separated by single spaces.

use core::fmt::{Formatter, Result, Write};

/// A single named bit within a register byte.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Flag {
    pub bit: u8,
    pub label: &'static str,
}

pub(crate) const fn flag(bit: u8, label: &'static str) -> Flag {
    Flag { bit, label }
}

/// Write every flag in `table` for the given register `value`.
pub(crate) fn write_flags(f: &mut Formatter<'_>, table: &[Flag], value: u8) -> Result {
    for (i, flag) in table.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        f.write_str(flag.label)?;
        f.write_char(if value & (1 << flag.bit) != 0 { '+' } else { '-' })?;
    }
    Ok(())
}
