#![doc = include_str!("../README.md")]
//!
//! ## Codec API
//!
//! - [`Device::nop()`](fn@crate::radio::Device::nop)
//! - [`Device::reg()`](fn@crate::radio::Device::reg) / [`Device::set_reg()`](fn@crate::radio::Device::set_reg)
//! - [`Device::read_rx_payload()`](fn@crate::radio::Device::read_rx_payload)
//! - [`Device::write_tx_payload()`](fn@crate::radio::Device::write_tx_payload)
//! - [`Device::write_tx_payload_no_ack()`](fn@crate::radio::Device::write_tx_payload_no_ack)
//! - [`Device::write_ack_payload()`](fn@crate::radio::Device::write_ack_payload)
//! - [`Device::rx_payload_width()`](fn@crate::radio::Device::rx_payload_width)
//! - [`Device::flush_tx()`](fn@crate::radio::Device::flush_tx) / [`Device::flush_rx()`](fn@crate::radio::Device::flush_rx)
//! - [`Device::reuse_tx_payload()`](fn@crate::radio::Device::reuse_tx_payload)
//! - [`Device::activate()`](fn@crate::radio::Device::activate)
//! - [`Device::chip_enable()`](fn@crate::radio::Device::chip_enable)
//!
//! ## Register API
//!
//! - [`Device::cfg()`](fn@crate::radio::Device::cfg) / [`Device::set_cfg()`](fn@crate::radio::Device::set_cfg)
//! - [`Device::aa()`](fn@crate::radio::Device::aa) / [`Device::set_aa()`](fn@crate::radio::Device::set_aa)
//! - [`Device::rx_ae()`](fn@crate::radio::Device::rx_ae) / [`Device::set_rx_ae()`](fn@crate::radio::Device::set_rx_ae)
//! - [`Device::aw()`](fn@crate::radio::Device::aw) / [`Device::set_aw()`](fn@crate::radio::Device::set_aw)
//! - [`Device::retr()`](fn@crate::radio::Device::retr) / [`Device::set_retr()`](fn@crate::radio::Device::set_retr)
//! - [`Device::ch()`](fn@crate::radio::Device::ch) / [`Device::set_ch()`](fn@crate::radio::Device::set_ch)
//! - [`Device::rf()`](fn@crate::radio::Device::rf) / [`Device::set_rf()`](fn@crate::radio::Device::set_rf)
//! - [`Device::clear()`](fn@crate::radio::Device::clear)
//! - [`Device::observe_tx()`](fn@crate::radio::Device::observe_tx)
//! - [`Device::rpd()`](fn@crate::radio::Device::rpd)
//! - [`Device::rx_addr()`](fn@crate::radio::Device::rx_addr) / [`Device::set_rx_addr()`](fn@crate::radio::Device::set_rx_addr)
//! - [`Device::rx_addr_lsb()`](fn@crate::radio::Device::rx_addr_lsb) / [`Device::set_rx_addr_lsb()`](fn@crate::radio::Device::set_rx_addr_lsb)
//! - [`Device::tx_addr()`](fn@crate::radio::Device::tx_addr) / [`Device::set_tx_addr()`](fn@crate::radio::Device::set_tx_addr)
//! - [`Device::rx_pw()`](fn@crate::radio::Device::rx_pw) / [`Device::set_rx_pw()`](fn@crate::radio::Device::set_rx_pw)
//! - [`Device::fifo()`](fn@crate::radio::Device::fifo)
//! - [`Device::dynpd()`](fn@crate::radio::Device::dynpd) / [`Device::set_dynpd()`](fn@crate::radio::Device::set_dynpd)
//! - [`Device::feature()`](fn@crate::radio::Device::feature) / [`Device::set_feature()`](fn@crate::radio::Device::set_feature)
//! - [`Device::details()`](fn@crate::radio::Device::details)
//! - [`Device::configure()`](fn@crate::radio::Device::configure)
//!
//! ## Packet API
//!
//! - [`PacketEngine::transmit()`](fn@crate::radio::PacketEngine::transmit)
//! - [`PacketEngine::resend()`](fn@crate::radio::PacketEngine::resend)
//! - [`PacketEngine::drain()`](fn@crate::radio::PacketEngine::drain)
//! - [`PacketEngine::service()`](fn@crate::radio::PacketEngine::service)
//! - [`PacketEngine::listen()`](fn@crate::radio::PacketEngine::listen)
//! - [`PacketEngine::standby()`](fn@crate::radio::PacketEngine::standby)
//!
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod types;
pub use types::{
    Cfg, CrcLength, DataRate, Feature, Fifo, FifoState, ObserveTx, Pipe, Retr, Rf, Status,
    MAX_PIPE,
};
pub mod radio;

#[cfg(test)]
mod test {
    use crate::radio::{Device, HalTransport};
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };

    mod sim;
    pub use sim::{SimChip, SimError};

    /// Takes an indefinite repetition of a tuple of 2 vectors: `(expected_data, response_data)`
    /// and generates an array of `SpiTransaction`s.
    ///
    /// NOTE: This macro is only used to generate code in unit tests (for this crate only).
    #[macro_export]
    macro_rules! spi_test_expects {
        ($( ($expected:expr , $response:expr $(,)? ) , ) + ) => {
            [
                $(
                    SpiTransaction::transaction_start(),
                    SpiTransaction::transfer_in_place($expected, $response),
                    SpiTransaction::transaction_end(),
                )*
            ]
        }
    }

    /// A [`HalTransport`] wired to mocked peripherals.
    pub type MockTransport = HalTransport<SpiMock<u8>, PinMock, NoopDelay>;

    /// A tuple struct to encapsulate objects used to mock [`Device`],
    pub struct MockDevice(pub Device<MockTransport>, pub SpiMock<u8>, pub PinMock);

    /// Create a mock objects using the given expectations.
    ///
    /// The returned mocks must be checked with `done()` at the end of each test.
    pub fn mk_device(
        ce_expectations: &[PinTransaction],
        spi_expectations: &[SpiTransaction<u8>],
    ) -> MockDevice {
        let spi = SpiMock::new(spi_expectations);
        let ce_pin = PinMock::new(ce_expectations);
        let device = Device::new(HalTransport::new(ce_pin.clone(), spi.clone(), NoopDelay));
        MockDevice(device, spi, ce_pin)
    }
}
