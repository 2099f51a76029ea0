//! Sensor drivers

pub mod latch;
pub mod pir;

pub use latch::EdgeLatch;
pub use pir::PirSensor;
