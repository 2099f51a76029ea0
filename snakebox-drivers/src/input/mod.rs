//! Input device drivers

pub mod buttons;

pub use buttons::ButtonPad;
