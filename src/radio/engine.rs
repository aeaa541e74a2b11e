//! The transmit/receive state machine.
//!
//! A [`PacketEngine`] moves whole packets through one [`Device`]: it uploads a
//! payload, strobes CE, waits for the outcome flags by polling STATUS and
//! drains every packet that arrived in the meantime.
use log::{debug, warn};

use super::{ChipEnable, Device, Nrf24Error, Nrf24Result, Transport, MAX_PAYLOAD};
use crate::Status;

/// Where the engine is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// CE is low and nothing is on the air.
    Idle,
    /// A payload is loaded (TX), or CE is held high to listen (RX).
    Armed,
    /// A CE pulse was emitted and the outcome is not known yet.
    Settling,
}

/// How one transmission ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// The payload was acknowledged (or sent without asking for an ACK).
    Sent,
    /// Every automatic retransmission went unacknowledged.
    ///
    /// The payload was flushed from the TX FIFO; resubmitting is up to the caller.
    Lost,
}

#[cfg(feature = "defmt")]
impl defmt::Format for EngineState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            EngineState::Idle => defmt::write!(fmt, "Idle"),
            EngineState::Armed => defmt::write!(fmt, "Armed"),
            EngineState::Settling => defmt::write!(fmt, "Settling"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TxOutcome::Sent => defmt::write!(fmt, "Sent"),
            TxOutcome::Lost => defmt::write!(fmt, "Lost"),
        }
    }
}

/// A packet drained from the RX FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packet {
    pipe: u8,
    len: u8,
    data: [u8; MAX_PAYLOAD],
}

impl Packet {
    /// The pipe that received this packet.
    pub const fn pipe(&self) -> u8 {
        self.pipe
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Packet {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Packet {{ pipe: {}, payload: {=[u8]} }}", self.pipe, self.payload())
    }
}

/// Drives a [`Device`] through complete transmit and receive cycles.
///
/// Nothing here times out: the outcome of a transmission is polled until the
/// radio reports one. Wrap the engine if a deadline is needed.
pub struct PacketEngine<T> {
    device: Device<T>,
    state: EngineState,
    listening: bool,
    // the chip still holds the last payload that went out
    reusable: bool,
    sent: u32,
    lost: u32,
}

impl<T: Transport> PacketEngine<T> {
    /// Take ownership of a configured (and powered up) `device`.
    pub fn new(device: Device<T>) -> Self {
        Self {
            device,
            state: EngineState::Idle,
            listening: false,
            reusable: false,
            sent: 0,
            lost: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The number of transmissions that ended with [`TxOutcome::Sent`].
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// The number of transmissions that ended with [`TxOutcome::Lost`].
    pub fn lost(&self) -> u32 {
        self.lost
    }

    /// Access the underlying [`Device`] for register level operations.
    pub fn device(&mut self) -> &mut Device<T> {
        &mut self.device
    }

    pub fn release(self) -> Device<T> {
        self.device
    }

    /// Transmit `payload` once, with the radio's automatic retransmissions.
    ///
    /// Set `no_ack` to ask the receiver not to acknowledge this packet (this
    /// requires [`Feature::dyn_ack`](crate::Feature::dyn_ack)).
    /// Packets received while waiting (like ACK payloads) are drained into
    /// `on_rx` before the outcome is handled.
    ///
    /// Returns [`Nrf24Error::NotIdle`] while listening and
    /// [`Nrf24Error::TxFifoFull`] if the payload cannot be queued.
    /// Panics if `payload` is longer than 32 bytes.
    pub fn transmit<F: FnMut(Packet)>(
        &mut self,
        payload: &[u8],
        no_ack: bool,
        on_rx: &mut F,
    ) -> Nrf24Result<T, TxOutcome> {
        super::nrf24::check_payload(payload.len());
        if self.listening {
            return Err(Nrf24Error::NotIdle);
        }
        let (fifo, _) = self.device.fifo()?;
        if fifo.tx_reuse() {
            // a reused payload stays at the top of the TX FIFO and would go out instead
            self.device.flush_tx()?;
            self.reusable = false;
        } else if fifo.tx_full() {
            return Err(Nrf24Error::TxFifoFull);
        }
        if no_ack {
            self.device.write_tx_payload_no_ack(payload)?;
        } else {
            self.device.write_tx_payload(payload)?;
        }
        self.state = EngineState::Armed;
        self.fire(on_rx)
    }

    /// Transmit the last payload again.
    ///
    /// This repeats a payload that was [`TxOutcome::Sent`]. After a
    /// [`TxOutcome::Lost`] the payload is already flushed and this returns
    /// [`Nrf24Error::NothingToResend`]; upload it again with
    /// [`PacketEngine::transmit()`] instead. The next `transmit()` drops the
    /// reused payload before uploading its own.
    pub fn resend<F: FnMut(Packet)>(&mut self, on_rx: &mut F) -> Nrf24Result<T, TxOutcome> {
        if self.listening {
            return Err(Nrf24Error::NotIdle);
        }
        if !self.reusable {
            return Err(Nrf24Error::NothingToResend);
        }
        self.device.reuse_tx_payload()?;
        self.state = EngineState::Armed;
        self.fire(on_rx)
    }

    fn fire<F: FnMut(Packet)>(&mut self, on_rx: &mut F) -> Nrf24Result<T, TxOutcome> {
        self.device.chip_enable(ChipEnable::Pulse)?;
        self.state = EngineState::Settling;
        let mut status = self.device.nop()?;
        while !(status.tx_ds() || status.max_rt()) {
            status = self.device.nop()?;
        }
        if status.rx_dr() {
            self.drain(on_rx)?;
        }
        let outcome = if status.max_rt() {
            // the chip keeps the failed payload at the top of the TX FIFO
            self.device.flush_tx()?;
            self.device.clear(Status::new().with_max_rt(true))?;
            self.reusable = false;
            self.lost = self.lost.saturating_add(1);
            TxOutcome::Lost
        } else {
            self.device.clear(Status::new().with_tx_ds(true))?;
            self.reusable = true;
            self.sent = self.sent.saturating_add(1);
            TxOutcome::Sent
        };
        debug!("TX {:?} (sent {}, lost {})", outcome, self.sent, self.lost);
        self.state = EngineState::Idle;
        Ok(outcome)
    }

    /// Read every queued packet into `sink`, oldest first.
    ///
    /// Returns the number of packets passed to `sink`. The RX_DR flag is
    /// cleared after each packet and the loop only ends once the RX FIFO
    /// reports empty. A payload width above 32 means the RX FIFO is corrupt;
    /// it is flushed and its contents are lost.
    pub fn drain<F: FnMut(Packet)>(&mut self, sink: &mut F) -> Nrf24Result<T, usize> {
        let mut count = 0;
        loop {
            let (width, status) = self.device.rx_payload_width()?;
            if width as usize > MAX_PAYLOAD {
                warn!("corrupt RX payload width {}; flushing RX FIFO", width);
                self.device.flush_rx()?;
            } else if let Some(pipe) = status.rx_pipe() {
                let mut packet = Packet {
                    pipe,
                    len: width,
                    data: [0u8; MAX_PAYLOAD],
                };
                self.device
                    .read_rx_payload(&mut packet.data[..width as usize])?;
                debug!("RX {} bytes on pipe {}", width, pipe);
                sink(packet);
                count += 1;
            }
            self.device.clear(Status::new().with_rx_dr(true))?;
            let (fifo, _) = self.device.fifo()?;
            if fifo.rx_empty() {
                return Ok(count);
            }
        }
    }

    /// Handle whatever the radio flagged since the last call.
    ///
    /// Call this from an IRQ edge handler or a polling loop while listening.
    /// Returns the number of packets passed to `sink`.
    pub fn service<F: FnMut(Packet)>(&mut self, sink: &mut F) -> Nrf24Result<T, usize> {
        let status = self.device.nop()?;
        if status.rx_dr() {
            self.drain(sink)
        } else {
            Ok(0)
        }
    }

    /// Enter RX mode: set PRIM_RX and hold CE high.
    pub fn listen(&mut self) -> Nrf24Result<T, ()> {
        let (cfg, _) = self.device.cfg()?;
        self.device.set_cfg(cfg.with_prim_rx(true))?;
        self.device.chip_enable(ChipEnable::High)?;
        self.listening = true;
        self.state = EngineState::Armed;
        Ok(())
    }

    /// Leave RX mode: drop CE and clear PRIM_RX.
    pub fn standby(&mut self) -> Nrf24Result<T, ()> {
        self.device.chip_enable(ChipEnable::Low)?;
        let (cfg, _) = self.device.cfg()?;
        self.device.set_cfg(cfg.with_prim_rx(false))?;
        self.listening = false;
        self.state = EngineState::Idle;
        Ok(())
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }
}
