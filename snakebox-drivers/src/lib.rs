//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in snakebox-core for the console's peripherals:
//!
//! - Real-time clock (DS1302 over a 3-wire bus)
//! - Direction buttons and PIR motion sensor
//! - Interrupt edge latch for the light sensor
//! - Tone queue for the buzzer
//! - UART telemetry transport and a text console render surface

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod input;
pub mod rtc;
pub mod sensor;
pub mod sound;
pub mod transport;
