use core::fmt::{Display, Formatter, Result as FmtResult};

use super::{pipe::MAX_ADDRESS_WIDTH, Device, Nrf24Result};
use crate::{radio::Transport, Cfg, Feature, Fifo, ObserveTx, Pipe, Retr, Rf, Status};

/// A snapshot of every register, taken by [`Device::details()`].
///
/// The [`Display`] output is meant for debugging a radio's configuration:
/// ```text
///  Status: RxDR- TxDS- MaxRT- TxFull- RxPipe:none
///  Cfg: MaskRxDR- MaskTxDS- MaskMaxRT- EnCRC+ CRCO+ PwrUp+ PrimRx-
///  ...
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Details {
    pub status: Status,
    pub cfg: Cfg,
    pub aa: Pipe,
    pub rx_ae: Pipe,
    /// Address width in bytes.
    pub aw: u8,
    pub retr: Retr,
    pub ch: u8,
    pub rf: Rf,
    pub observe_tx: ObserveTx,
    pub rpd: bool,
    /// Full RX addresses of pipes 0 and 1 (only the first `aw` bytes are meaningful).
    pub rx_addr: [[u8; MAX_ADDRESS_WIDTH]; 2],
    /// Least significant RX address bytes of pipes 2 to 5.
    pub rx_addr_lsb: [u8; 4],
    pub tx_addr: [u8; MAX_ADDRESS_WIDTH],
    pub rx_pw: [u8; 6],
    pub fifo: Fifo,
    pub dynpd: Pipe,
    pub feature: Feature,
}

impl<T: Transport> Device<T> {
    /// Read every register into a [`Details`] snapshot.
    ///
    /// `status` holds the STATUS byte returned by the first exchange.
    pub fn details(&mut self) -> Nrf24Result<T, Details> {
        let (cfg, status) = self.cfg()?;
        let (aa, _) = self.aa()?;
        let (rx_ae, _) = self.rx_ae()?;
        let (aw, _) = self.aw()?;
        let (retr, _) = self.retr()?;
        let (ch, _) = self.ch()?;
        let (rf, _) = self.rf()?;
        let (observe_tx, _) = self.observe_tx()?;
        let (rpd, _) = self.rpd()?;
        let mut rx_addr = [[0u8; MAX_ADDRESS_WIDTH]; 2];
        for (pipe, addr) in rx_addr.iter_mut().enumerate() {
            self.rx_addr(pipe as u8, addr)?;
        }
        let mut rx_addr_lsb = [0u8; 4];
        for (pipe, lsb) in (2..).zip(rx_addr_lsb.iter_mut()) {
            *lsb = self.rx_addr_lsb(pipe)?.0;
        }
        let mut tx_addr = [0u8; MAX_ADDRESS_WIDTH];
        self.tx_addr(&mut tx_addr)?;
        let mut rx_pw = [0u8; 6];
        for (pipe, width) in (0..).zip(rx_pw.iter_mut()) {
            *width = self.rx_pw(pipe)?.0;
        }
        let (fifo, _) = self.fifo()?;
        let (dynpd, _) = self.dynpd()?;
        let (feature, _) = self.feature()?;
        Ok(Details {
            status,
            cfg,
            aa,
            rx_ae,
            aw,
            retr,
            ch,
            rf,
            observe_tx,
            rpd,
            rx_addr,
            rx_addr_lsb,
            tx_addr,
            rx_pw,
            fifo,
            dynpd,
            feature,
        })
    }
}

fn write_addr(f: &mut Formatter<'_>, addr: &[u8]) -> FmtResult {
    write!(f, "0x")?;
    // stored LSB first, shown MSB first
    for byte in addr.iter().rev() {
        write!(f, "{byte:02X}")?;
    }
    Ok(())
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let aw = (self.aw as usize).clamp(3, MAX_ADDRESS_WIDTH);
        writeln!(f, " Status: {}", self.status)?;
        writeln!(f, " Cfg: {}", self.cfg)?;
        writeln!(f, " CRC: {}", self.cfg.crc_length())?;
        writeln!(f, " EnAA: {}", self.aa)?;
        writeln!(f, " EnRxAddr: {}", self.rx_ae)?;
        writeln!(f, " AW: {}", self.aw)?;
        writeln!(f, " Retr: {}", self.retr)?;
        writeln!(f, " Ch: {} ({} MHz)", self.ch, 2400 + self.ch as u16)?;
        writeln!(f, " RF: {}", self.rf)?;
        writeln!(f, " DataRate: {}", self.rf.data_rate())?;
        writeln!(f, " TxCnt: {}", self.observe_tx)?;
        writeln!(f, " RPD: {}", self.rpd)?;
        for (pipe, addr) in self.rx_addr.iter().enumerate() {
            write!(f, " RxAddr{pipe}: ")?;
            write_addr(f, &addr[..aw])?;
            writeln!(f)?;
        }
        for (pipe, lsb) in (2..).zip(self.rx_addr_lsb.iter()) {
            write!(f, " RxAddr{pipe}: 0x")?;
            for byte in self.rx_addr[1][1..aw].iter().rev() {
                write!(f, "{byte:02X}")?;
            }
            writeln!(f, "{lsb:02X}")?;
        }
        write!(f, " TxAddr: ")?;
        write_addr(f, &self.tx_addr[..aw])?;
        writeln!(f)?;
        write!(f, " RxPW:")?;
        for width in self.rx_pw {
            write!(f, " {width}")?;
        }
        writeln!(f)?;
        writeln!(f, " FIFO: {}", self.fifo)?;
        writeln!(f, " DynPD: {}", self.dynpd)?;
        write!(f, " Feature: {}", self.feature)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Details {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Details {{ status: {}, cfg: {}, aa: {}, rx_ae: {}, aw: {}, retr: {}, ch: {}, rf: {}, fifo: {}, dynpd: {}, feature: {} }}",
            self.status,
            self.cfg,
            self.aa,
            self.rx_ae,
            self.aw,
            self.retr,
            self.ch,
            self.rf,
            self.fifo,
            self.dynpd,
            self.feature,
        )
    }
}
