//! Telemetry transports

pub mod uart;

pub use uart::UartTransport;
