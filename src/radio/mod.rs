//! The radio driver: a hardware seam, a register/command codec and a packet engine.
//!
//! ```text
//! PacketEngine -> Device (codec) -> Transport -> nRF24L01
//! ```
mod config;
mod engine;
mod nrf24;
mod transport;

pub use config::RadioConfig;
pub use engine::{EngineState, Packet, PacketEngine, TxOutcome};
pub use nrf24::{
    commands, mnemonics, registers, Details, Device, Nrf24Error, Nrf24Result, MAX_ADDRESS_WIDTH,
    MAX_CHANNEL, MAX_PAYLOAD,
};
pub use transport::{ChipEnable, HalError, HalTransport, Transport, CE_PULSE_US};
