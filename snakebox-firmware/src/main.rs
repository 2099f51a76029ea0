//! Snakebox - Snake Game Console Firmware
//!
//! Main firmware binary for RP2040-based Snakebox handhelds. Plays Snake on
//! a serial character console, sleeps the display when nobody is near, and
//! reports finished games over a Bluetooth serial link with DS1302
//! timestamps.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_time::{Delay, Instant};
use {defmt_rtt as _, panic_probe as _};

use snakebox_core::game::XorShift32;
use snakebox_core::runtime::Controller;
use snakebox_core::RtcTime;
use snakebox_drivers::display::ConsoleSurface;
use snakebox_drivers::input::ButtonPad;
use snakebox_drivers::rtc::Ds1302;
use snakebox_drivers::sensor::PirSensor;
use snakebox_drivers::transport::UartTransport;

use crate::board::{Board, PwmBuzzer, RtcIo};
use crate::channels::LIGHT_LATCH;

mod board;
mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Snakebox firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let loop_config = config::loop_config();
    if let Err(e) = loop_config.validate() {
        error!("Invalid loop configuration: {:?}", e);
    }
    info!(
        "Loop config: step={}ms heartbeat={}ms idle={}ms debounce={}ms",
        loop_config.step_interval_ms,
        loop_config.heartbeat_interval_ms,
        loop_config.idle_threshold_ms,
        loop_config.debounce_ms
    );

    // Bluetooth module on UART0 (GPIO0 TX)
    let link_uart = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config::BAUDRATE;
        UartTx::new_blocking(p.UART0, p.PIN_0, cfg)
    };

    // Character console on UART1 (GPIO4 TX)
    let console_uart = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config::CONSOLE_BAUDRATE;
        UartTx::new_blocking(p.UART1, p.PIN_4, cfg)
    };

    info!("UARTs initialized");

    // Buttons pull to ground when pressed
    let buttons = ButtonPad::new(
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
    );
    let pir = PirSensor::new(Input::new(p.PIN_14, Pull::Down));
    let light_sensor = Input::new(p.PIN_15, Pull::None);

    let mut rtc = Ds1302::new(
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        RtcIo::new(Flex::new(p.PIN_18)),
        Delay,
    );
    if rtc.init().is_err() {
        warn!("DS1302 init failed");
    }
    let seed = match rtc.get_time() {
        Ok(time) => {
            info!(
                "RTC time: 20{:02}-{:02}-{:02} {:02}:{:02}:{:02}",
                time.year, time.month, time.day, time.hour, time.minute, time.second
            );
            seed_from(time, Instant::now().as_ticks())
        }
        Err(_) => {
            warn!("RTC unreadable, using uptime seed");
            seed_from(RtcTime::default(), Instant::now().as_ticks())
        }
    };

    let buzzer = PwmBuzzer::new(Pwm::new_output_a(
        p.PWM_SLICE2,
        p.PIN_20,
        PwmConfig::default(),
    ));

    info!("Peripherals configured");

    let mut board = Board {
        buttons,
        pir,
        light: &LIGHT_LATCH,
        console: ConsoleSurface::new(console_uart),
        link: UartTransport::new(link_uart),
        rtc,
    };

    let mut controller = Controller::new(loop_config, XorShift32::new(seed));
    match controller.restore_best(&mut board) {
        Ok(Some(best)) => info!("Best score: {}", best.score),
        Ok(None) => info!("No best score recorded"),
        Err(e) => warn!("Best score unreadable: {:?}", e),
    }

    spawner.spawn(unwrap!(tasks::light_task(light_sensor)));
    spawner.spawn(unwrap!(tasks::tone_task(buzzer)));
    spawner.spawn(unwrap!(tasks::tick_task(board, controller)));

    info!("All tasks spawned, firmware running");
}

/// Fold the wall-clock time and uptime into a generator seed
fn seed_from(time: RtcTime, ticks: u64) -> u32 {
    let calendar = u32::from_le_bytes([time.second, time.minute, time.hour, time.day])
        ^ (((time.month as u32) << 8) | time.year as u32).rotate_left(16);
    calendar ^ (ticks as u32) ^ ((ticks >> 32) as u32)
}
