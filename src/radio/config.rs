use log::debug;

use super::{
    nrf24::{check_payload, MAX_ADDRESS_WIDTH, MAX_CHANNEL},
    Device, Nrf24Result, Transport,
};
use crate::{types::check_pipe, Cfg, CrcLength, DataRate, Feature, Pipe, Retr, Rf, Status};

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Start with [`RadioConfig::default()`],
/// then chain the `with_*()` methods. Every setter validates its arguments
/// immediately (and panics on invalid input), so a built [`RadioConfig`] is
/// always accepted by [`Device::configure()`].
/// ```
/// use nrf24::radio::RadioConfig;
/// let config = RadioConfig::default().with_channel(42).with_address_length(3);
/// assert_eq!(config.channel(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioConfig {
    cfg: Cfg,
    retr: Retr,
    rf: Rf,
    feature: Feature,
    address_length: u8,
    channel: u8,
    payload_length: u8,
    auto_ack: Pipe,
    rx_pipes: Pipe,
    tx_address: [u8; MAX_ADDRESS_WIDTH],
    rx_address: [[u8; MAX_ADDRESS_WIDTH]; 2],
    rx_address_lsb: [u8; 4],
}

#[cfg(feature = "defmt")]
impl defmt::Format for RadioConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "RadioConfig {{ ch: {=u8}, aw: {=u8}, pw: {=u8}, cfg: {}, retr: {}, rf: {}, feature: {}, aa: {}, rx: {} }}",
            self.channel,
            self.address_length,
            self.payload_length,
            self.cfg,
            self.retr,
            self.rf,
            self.feature,
            self.auto_ack,
            self.rx_pipes,
        )
    }
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::address_length()`] | `5` |
    /// | [`RadioConfig::pa_level()`] | `0` dBm |
    /// | [`RadioConfig::lna_enable()`] | `true` |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::payload_length()`] | `32` |
    /// | [`RadioConfig::dynamic_payloads()`] | `false` |
    /// | [`RadioConfig::auto_ack()`] | all pipes |
    /// | [`RadioConfig::ack_payloads()`] | `false` |
    /// | [`RadioConfig::ask_no_ack()`] | `false` |
    /// | [`RadioConfig::auto_retries()`] | 15 times, 1500 us |
    /// | [`RadioConfig::tx_address()`] | `[0xE7; 5]` |
    /// | [`RadioConfig::rx_pipes()`] | pipes 0 and 1 |
    ///
    /// The RX addresses are the chip's reset values: `[0xE7; 5]` for pipe 0,
    /// `[0xC2; 5]` for pipe 1 and `0xC3` to `0xC6` for pipes 2 to 5.
    fn default() -> Self {
        Self {
            // every IRQ event enabled, powered down
            cfg: Cfg::new().with_crc_length(CrcLength::Bit16),
            retr: Retr::new(15, 1500),
            rf: Rf::new()
                .with_lna_hc(true)
                .with_pwr(Rf::MAX_DBM)
                .with_data_rate(DataRate::Mbps1),
            feature: Feature::new(),
            address_length: 5,
            channel: 76,
            payload_length: 32,
            auto_ack: Pipe::all(),
            rx_pipes: Pipe::single(0).with_pipe(1, true),
            tx_address: [0xE7; MAX_ADDRESS_WIDTH],
            rx_address: [[0xE7; MAX_ADDRESS_WIDTH], [0xC2; MAX_ADDRESS_WIDTH]],
            rx_address_lsb: [0xC3, 0xC4, 0xC5, 0xC6],
        }
    }
}

impl RadioConfig {
    pub const fn crc_length(&self) -> CrcLength {
        self.cfg.crc_length()
    }

    pub const fn with_crc_length(self, length: CrcLength) -> Self {
        Self {
            cfg: self.cfg.with_crc_length(length),
            ..self
        }
    }

    pub const fn data_rate(&self) -> DataRate {
        self.rf.data_rate()
    }

    pub const fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self {
            rf: self.rf.with_data_rate(data_rate),
            ..self
        }
    }

    /// The TX output power in dBm.
    pub const fn pa_level(&self) -> i8 {
        self.rf.pwr()
    }

    /// Set the TX output power; see [`Rf::with_pwr()`] for how `dbm` is quantized.
    pub const fn with_pa_level(self, dbm: i8) -> Self {
        Self {
            rf: self.rf.with_pwr(dbm),
            ..self
        }
    }

    pub const fn lna_enable(&self) -> bool {
        self.rf.lna_hc()
    }

    pub const fn with_lna_enable(self, enable: bool) -> Self {
        Self {
            rf: self.rf.with_lna_hc(enable),
            ..self
        }
    }

    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Panics if `channel` is greater than 127.
    pub const fn with_channel(self, channel: u8) -> Self {
        assert!(channel <= MAX_CHANNEL, "channel must be in range [0, 127]");
        Self { channel, ..self }
    }

    pub const fn address_length(&self) -> u8 {
        self.address_length
    }

    /// Panics if `length` is not 3, 4 or 5.
    pub const fn with_address_length(self, length: u8) -> Self {
        assert!(
            length >= 3 && length <= 5,
            "address width must be in range [3, 5]"
        );
        Self {
            address_length: length,
            ..self
        }
    }

    /// The static payload length used by every pipe.
    pub const fn payload_length(&self) -> u8 {
        self.payload_length
    }

    /// Panics if `length` is greater than 32.
    pub const fn with_payload_length(self, length: u8) -> Self {
        check_payload(length as usize);
        Self {
            payload_length: length,
            ..self
        }
    }

    pub const fn dynamic_payloads(&self) -> bool {
        self.feature.dpl()
    }

    /// Enable dynamic payload lengths on every pipe.
    ///
    /// Disabling dynamic payloads also disables ACK payloads.
    pub const fn with_dynamic_payloads(self, enable: bool) -> Self {
        let mut feature = self.feature.with_dpl(enable);
        if !enable {
            feature = feature.with_ack_pay(false);
        }
        Self { feature, ..self }
    }

    pub const fn ack_payloads(&self) -> bool {
        self.feature.ack_pay()
    }

    /// Allow payloads in ACK packets.
    ///
    /// Enabling ACK payloads also enables dynamic payloads and auto-ack on pipe 0.
    pub const fn with_ack_payloads(self, enable: bool) -> Self {
        let mut feature = self.feature.with_ack_pay(enable);
        let mut auto_ack = self.auto_ack;
        if enable {
            feature = feature.with_dpl(true);
            auto_ack = auto_ack.with_pipe(0, true);
        }
        Self {
            feature,
            auto_ack,
            ..self
        }
    }

    pub const fn ask_no_ack(&self) -> bool {
        self.feature.dyn_ack()
    }

    /// Let payloads written with the no-ack command skip their ACK.
    pub const fn with_ask_no_ack(self, enable: bool) -> Self {
        Self {
            feature: self.feature.with_dyn_ack(enable),
            ..self
        }
    }

    pub const fn auto_ack(&self) -> Pipe {
        self.auto_ack
    }

    pub const fn with_auto_ack(self, pipes: Pipe) -> Self {
        Self {
            auto_ack: pipes,
            ..self
        }
    }

    pub const fn auto_retries(&self) -> Retr {
        self.retr
    }

    pub const fn with_auto_retries(self, retr: Retr) -> Self {
        Self { retr, ..self }
    }

    /// Does the IRQ pin react to "RX Data Ready" events?
    pub const fn rx_dr(&self) -> bool {
        !self.cfg.mask_rx_dr()
    }

    pub const fn with_rx_dr(self, enable: bool) -> Self {
        Self {
            cfg: self.cfg.with_mask_rx_dr(!enable),
            ..self
        }
    }

    /// Does the IRQ pin react to "TX Data Sent" events?
    pub const fn tx_ds(&self) -> bool {
        !self.cfg.mask_tx_ds()
    }

    pub const fn with_tx_ds(self, enable: bool) -> Self {
        Self {
            cfg: self.cfg.with_mask_tx_ds(!enable),
            ..self
        }
    }

    /// Does the IRQ pin react to "maximum retransmits reached" events?
    pub const fn max_rt(&self) -> bool {
        !self.cfg.mask_max_rt()
    }

    pub const fn with_max_rt(self, enable: bool) -> Self {
        Self {
            cfg: self.cfg.with_mask_max_rt(!enable),
            ..self
        }
    }

    pub const fn tx_address(&self) -> [u8; MAX_ADDRESS_WIDTH] {
        self.tx_address
    }

    /// Set the TX address, least significant byte first.
    ///
    /// Bytes beyond `address.len()` keep their previous value.
    /// Panics if `address` is longer than 5 bytes.
    pub fn with_tx_address(mut self, address: &[u8]) -> Self {
        assert!(
            address.len() <= MAX_ADDRESS_WIDTH,
            "address must not be longer than 5 bytes"
        );
        self.tx_address[..address.len()].copy_from_slice(address);
        self
    }

    /// The pipes that are open for reception.
    pub const fn rx_pipes(&self) -> Pipe {
        self.rx_pipes
    }

    /// Copy the RX address of `pipe` into `address`.
    ///
    /// For pipes 2 to 5, the upper bytes come from pipe 1.
    /// Panics if `pipe` is greater than 5 or `address` is longer than 5 bytes.
    pub fn rx_address(&self, pipe: u8, address: &mut [u8]) {
        check_pipe(pipe);
        let len = address.len();
        assert!(
            len <= MAX_ADDRESS_WIDTH,
            "address must not be longer than 5 bytes"
        );
        if pipe < 2 {
            address.copy_from_slice(&self.rx_address[pipe as usize][..len]);
        } else {
            address.copy_from_slice(&self.rx_address[1][..len]);
            if let Some(lsb) = address.first_mut() {
                *lsb = self.rx_address_lsb[pipe as usize - 2];
            }
        }
    }

    /// Open `pipe` for reception on `address` (least significant byte first).
    ///
    /// Pipes 2 to 5 share the upper bytes with pipe 1, so only a 1 byte
    /// `address` is accepted for them.
    /// Panics if `pipe` is greater than 5, `address` is longer than 5 bytes,
    /// or `address` is longer than 1 byte for pipes 2 to 5.
    pub fn with_rx_address(mut self, pipe: u8, address: &[u8]) -> Self {
        check_pipe(pipe);
        assert!(
            address.len() <= MAX_ADDRESS_WIDTH,
            "address must not be longer than 5 bytes"
        );
        assert!(
            pipe < 2 || address.len() <= 1,
            "pipes 2 to 5 only take the least significant address byte"
        );
        if pipe < 2 {
            self.rx_address[pipe as usize][..address.len()].copy_from_slice(address);
        } else if let Some(lsb) = address.first() {
            self.rx_address_lsb[pipe as usize - 2] = *lsb;
        }
        self.rx_pipes = self.rx_pipes.with_pipe(pipe, true);
        self
    }

    /// Stop receiving on `pipe`.
    ///
    /// Panics if `pipe` is greater than 5.
    pub const fn close_rx_pipe(self, pipe: u8) -> Self {
        Self {
            rx_pipes: self.rx_pipes.with_pipe(pipe, false),
            ..self
        }
    }
}

impl<T: Transport> Device<T> {
    /// Write every register described by `config`, then power up the radio.
    ///
    /// The radio is left in TX mode (PRIM_RX cleared) with both FIFOs and all
    /// IRQ flags cleared. Allow 1.5 ms for the oscillator to start before the
    /// first transmission.
    pub fn configure(&mut self, config: &RadioConfig) -> Nrf24Result<T, Status> {
        let aw = config.address_length as usize;
        self.clear(Status::all_irq())?;
        self.set_cfg(config.cfg.with_pwr_up(false).with_prim_rx(false))?;
        self.flush_rx()?;
        self.flush_tx()?;
        self.set_aw(config.address_length)?;
        self.set_retr(config.retr)?;
        self.set_aa(config.auto_ack)?;
        self.set_rx_ae(config.rx_pipes)?;
        let dynpd = if config.feature.dpl() {
            Pipe::all()
        } else {
            Pipe::new()
        };
        self.set_dynpd(dynpd)?;
        self.set_feature(config.feature)?;
        self.set_rf(config.rf)?;
        self.set_ch(config.channel)?;
        for pipe in 0..6 {
            self.set_rx_pw(pipe, config.payload_length)?;
        }
        self.set_tx_addr(&config.tx_address[..aw])?;
        self.set_rx_addr(0, &config.rx_address[0][..aw])?;
        self.set_rx_addr(1, &config.rx_address[1][..aw])?;
        for (pipe, lsb) in (2..).zip(config.rx_address_lsb) {
            self.set_rx_addr_lsb(pipe, lsb)?;
        }
        let status = self.set_cfg(config.cfg.with_pwr_up(true).with_prim_rx(false))?;
        debug!(
            "configured: ch {}, {}, {} dBm, {}",
            config.channel,
            config.rf.data_rate(),
            config.rf.pwr(),
            config.retr
        );
        Ok(status)
    }
}
