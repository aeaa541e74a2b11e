//! A simulated transceiver that speaks the SPI command protocol.
extern crate std;

use std::{collections::VecDeque, vec::Vec};

use crate::{
    radio::{
        commands,
        mnemonics::{MASK_MAX_RT as MAX_RT, MASK_RX_DR as RX_DR, MASK_TX_DS as TX_DS},
        registers, ChipEnable, Transport, MAX_PAYLOAD,
    },
    Status,
};

const FIFO_DEPTH: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimError {
    Disconnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Acked,
    Lost,
}

/// A register file, both FIFOs and a scripted air interface.
///
/// Each CE pulse in TX mode "transmits" the payload at the top of the TX FIFO.
/// The outcome is [`Outcome::Acked`] unless [`SimChip::lose_next()`] queued a loss.
pub struct SimChip {
    regs: [[u8; 5]; 0x20],
    irq: u8,
    tx_fifo: VecDeque<Vec<u8>>,
    rx_fifo: VecDeque<(u8, Vec<u8>)>,
    reuse: bool,
    last_tx: Option<Vec<u8>>,
    ce: bool,
    outcomes: VecDeque<Outcome>,
    ack_payloads: VecDeque<Vec<u8>>,
    loopback: bool,
    corrupt_width: bool,
    fail_after: Option<usize>,
    log: Vec<Vec<u8>>,
    air: Vec<Vec<u8>>,
}

impl SimChip {
    /// A powered-down chip holding its reset values.
    pub fn new() -> Self {
        let mut regs = [[0u8; 5]; 0x20];
        regs[registers::CONFIG as usize][0] = 0x08;
        regs[registers::EN_AA as usize][0] = 0x3F;
        regs[registers::EN_RXADDR as usize][0] = 0x03;
        regs[registers::SETUP_AW as usize][0] = 0x03;
        regs[registers::SETUP_RETR as usize][0] = 0x03;
        regs[registers::RF_CH as usize][0] = 0x02;
        regs[registers::RF_SETUP as usize][0] = 0x0E;
        regs[registers::RX_ADDR_P0 as usize] = [0xE7; 5];
        regs[registers::RX_ADDR_P0 as usize + 1] = [0xC2; 5];
        for pipe in 2..6u8 {
            regs[(registers::RX_ADDR_P0 + pipe) as usize][0] = 0xC1 + pipe;
        }
        regs[registers::TX_ADDR as usize] = [0xE7; 5];
        Self {
            regs,
            irq: 0,
            tx_fifo: VecDeque::new(),
            rx_fifo: VecDeque::new(),
            reuse: false,
            last_tx: None,
            ce: false,
            outcomes: VecDeque::new(),
            ack_payloads: VecDeque::new(),
            loopback: false,
            corrupt_width: false,
            fail_after: None,
            log: Vec::new(),
            air: Vec::new(),
        }
    }

    /// Every exchange (and CE operation) after the first `count` exchanges fails.
    pub fn fail_after(&mut self, count: usize) {
        self.fail_after = Some(count);
    }

    /// The next transmission is never acknowledged.
    pub fn lose_next(&mut self) {
        self.outcomes.push_back(Outcome::Lost);
    }

    /// Echo every transmitted payload into the RX FIFO (on pipe 0).
    pub fn loopback(&mut self) {
        self.loopback = true;
    }

    /// The next successful transmission receives `payload` in its ACK packet.
    pub fn queue_ack_payload(&mut self, payload: &[u8]) {
        self.ack_payloads.push_back(payload.to_vec());
    }

    /// A packet arrives on `pipe`.
    pub fn receive(&mut self, pipe: u8, payload: &[u8]) {
        assert!(self.rx_fifo.len() < FIFO_DEPTH, "simulated RX FIFO overflow");
        self.rx_fifo.push_back((pipe, payload.to_vec()));
        self.irq |= RX_DR;
    }

    /// The next R_RX_PL_WID reports a width that no payload can have.
    pub fn corrupt_width(&mut self) {
        self.corrupt_width = true;
    }

    /// The first byte of a register.
    pub fn register(&self, address: u8) -> u8 {
        self.regs[address as usize][0]
    }

    /// All 5 bytes of an address register.
    pub fn address(&self, address: u8) -> [u8; 5] {
        self.regs[address as usize]
    }

    pub fn exchanges(&self) -> usize {
        self.log.len()
    }

    /// Every byte sequence shifted into the chip, in order.
    pub fn log(&self) -> &[Vec<u8>] {
        &self.log
    }

    /// The opcode (first byte) of every exchange, in order.
    pub fn commands(&self) -> Vec<u8> {
        self.log.iter().map(|request| request[0]).collect()
    }

    /// The payloads that were put on the air (acknowledged or not).
    pub fn air(&self) -> &[Vec<u8>] {
        &self.air
    }

    pub fn ce(&self) -> bool {
        self.ce
    }

    pub fn tx_len(&self) -> usize {
        self.tx_fifo.len()
    }

    pub fn rx_len(&self) -> usize {
        self.rx_fifo.len()
    }

    pub fn irq(&self) -> u8 {
        self.irq
    }

    fn is_failing(&self) -> bool {
        self.fail_after.is_some_and(|count| self.log.len() >= count)
    }

    fn status(&self) -> u8 {
        let pipe = self.rx_fifo.front().map_or(7, |(pipe, _)| *pipe);
        self.irq | (pipe << 1) | (self.tx_fifo.len() == FIFO_DEPTH) as u8
    }

    fn fifo_status(&self) -> u8 {
        (self.rx_fifo.is_empty() as u8)
            | ((self.rx_fifo.len() == FIFO_DEPTH) as u8) << 1
            | (self.tx_fifo.is_empty() as u8) << 4
            | ((self.tx_fifo.len() == FIFO_DEPTH) as u8) << 5
            | (self.reuse as u8) << 6
    }

    fn read_register(&self, address: u8, out: &mut [u8]) {
        match address {
            registers::STATUS => out.fill(self.status()),
            registers::FIFO_STATUS => out.fill(self.fifo_status()),
            _ => {
                let reg = &self.regs[address as usize];
                for (i, byte) in out.iter_mut().enumerate() {
                    *byte = reg.get(i).copied().unwrap_or(0);
                }
            }
        }
    }

    fn write_register(&mut self, address: u8, data: &[u8]) {
        match address {
            registers::STATUS => {
                if let Some(flags) = data.first() {
                    self.irq &= !(flags & Status::IRQ_MASK);
                }
            }
            registers::FIFO_STATUS | registers::OBSERVE_TX | registers::RPD => {}
            _ => {
                if address == registers::RF_CH {
                    self.regs[registers::OBSERVE_TX as usize][0] &= 0x0F;
                }
                let reg = &mut self.regs[address as usize];
                let len = data.len().min(reg.len());
                reg[..len].copy_from_slice(&data[..len]);
            }
        }
    }

    fn push_tx(&mut self, payload: &[u8]) {
        self.reuse = false;
        if self.tx_fifo.len() < FIFO_DEPTH {
            self.tx_fifo.push_back(payload.to_vec());
        }
    }

    fn transmit(&mut self) {
        let prim_rx = self.register(registers::CONFIG) & 1 == 1;
        let Some(payload) = self.tx_fifo.front().cloned() else {
            return;
        };
        if prim_rx {
            return;
        }
        self.air.push(payload.clone());
        self.last_tx = Some(payload.clone());
        let retries = self.register(registers::SETUP_RETR) & 0xF;
        let observe = &mut self.regs[registers::OBSERVE_TX as usize][0];
        match self.outcomes.pop_front().unwrap_or(Outcome::Acked) {
            Outcome::Lost => {
                let plos = ((*observe >> 4) + 1).min(15);
                *observe = plos << 4 | retries;
                self.irq |= MAX_RT;
            }
            Outcome::Acked => {
                *observe &= 0xF0;
                self.irq |= TX_DS;
                if !self.reuse {
                    self.tx_fifo.pop_front();
                }
                if let Some(ack) = self.ack_payloads.pop_front() {
                    self.receive(0, &ack);
                }
                if self.loopback {
                    self.receive(0, &payload);
                }
            }
        }
    }
}

impl Default for SimChip {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SimChip {
    type Error = SimError;

    fn exchange(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        if self.is_failing() {
            return Err(SimError::Disconnected);
        }
        self.log.push(buf.to_vec());
        let status = self.status();
        let command = buf[0];
        let (_, data) = buf.split_at_mut(1);
        match command {
            0x00..=0x1F => self.read_register(command, data),
            0x20..=0x3F => self.write_register(command & 0x1F, data),
            commands::R_RX_PAYLOAD => {
                let payload = self.rx_fifo.pop_front().map(|(_, p)| p).unwrap_or_default();
                for (i, byte) in data.iter_mut().enumerate() {
                    *byte = payload.get(i).copied().unwrap_or(0);
                }
            }
            commands::R_RX_PL_WID => {
                let width = if self.corrupt_width {
                    self.corrupt_width = false;
                    0xFF
                } else {
                    self.rx_fifo.front().map_or(0, |(_, p)| p.len() as u8)
                };
                data.fill(width);
            }
            commands::W_TX_PAYLOAD => {
                assert!(data.len() <= MAX_PAYLOAD);
                self.push_tx(data);
            }
            commands::FLUSH_TX => {
                self.tx_fifo.clear();
                self.reuse = false;
                self.last_tx = None;
            }
            commands::FLUSH_RX => self.rx_fifo.clear(),
            commands::REUSE_TX_PL => {
                self.reuse = true;
                if self.tx_fifo.is_empty() {
                    if let Some(last) = self.last_tx.clone() {
                        self.tx_fifo.push_back(last);
                    }
                }
            }
            _ => {}
        }
        buf[0] = status;
        Ok(())
    }

    fn set_ce(&mut self, ce: ChipEnable) -> Result<(), Self::Error> {
        if self.is_failing() {
            return Err(SimError::Disconnected);
        }
        match ce {
            ChipEnable::Low => self.ce = false,
            ChipEnable::High => self.ce = true,
            ChipEnable::Pulse => {
                self.ce = false;
                self.transmit();
            }
        }
        Ok(())
    }
}
