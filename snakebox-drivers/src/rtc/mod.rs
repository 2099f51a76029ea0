//! Real-time clock drivers

pub mod bcd;
pub mod ds1302;

pub use ds1302::{Ds1302, Ds1302Error, IoLine, SCRATCH_LEN};
