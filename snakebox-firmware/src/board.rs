//! RP2040 board wiring
//!
//! `Board` owns every peripheral the loop touches and implements the core
//! collaborator traits by delegating to the drivers.
//!
//! # Pin Map
//!
//! | Function        | GPIO           |
//! |-----------------|----------------|
//! | BT UART TX      | 0 (UART0)      |
//! | Console TX      | 4 (UART1)      |
//! | Buttons U/D/L/R | 10, 11, 12, 13 |
//! | PIR             | 14             |
//! | Light sensor    | 15             |
//! | DS1302 CE/SCLK  | 16, 17         |
//! | DS1302 I/O      | 18             |
//! | Buzzer          | 20 (PWM2 A)    |

use core::convert::Infallible;

use embassy_rp::gpio::{Flex, Input, Level, Output};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{Blocking, UartTx};
use embassy_time::{Delay, Instant};

use snakebox_core::game::Grid;
use snakebox_core::traits::{
    Ambient, ClockError, InputSample, InputSource, LightSensor, MonotonicClock, MotionSensor,
    RenderSurface, ScratchStore, ToneSink, Transport, WallClock,
};
use snakebox_core::RtcTime;
use snakebox_drivers::display::ConsoleSurface;
use snakebox_drivers::input::ButtonPad;
use snakebox_drivers::rtc::{Ds1302, IoLine};
use snakebox_drivers::sensor::{EdgeLatch, PirSensor};
use snakebox_drivers::sound::ToneOutput;
use snakebox_drivers::transport::UartTransport;

use crate::channels::TONE_QUEUE;

/// DS1302 data line on a flexible GPIO
pub struct RtcIo(Flex<'static>);

impl RtcIo {
    pub fn new(pin: Flex<'static>) -> Self {
        Self(pin)
    }
}

impl IoLine for RtcIo {
    type Error = Infallible;

    fn drive(&mut self, high: bool) -> Result<(), Self::Error> {
        self.0.set_level(Level::from(high));
        self.0.set_as_output();
        Ok(())
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.0.set_as_input();
        Ok(())
    }

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.is_high())
    }
}

pub type Rtc = Ds1302<Output<'static>, Output<'static>, RtcIo, Delay>;
pub type Buttons = ButtonPad<Input<'static>, Input<'static>, Input<'static>, Input<'static>>;
pub type Console = ConsoleSurface<UartTx<'static, Blocking>>;
pub type Link = UartTransport<UartTx<'static, Blocking>>;

/// Everything the tick loop drives
pub struct Board {
    pub buttons: Buttons,
    pub pir: PirSensor<Input<'static>>,
    pub light: &'static EdgeLatch,
    pub console: Console,
    pub link: Link,
    pub rtc: Rtc,
}

impl InputSource for Board {
    fn sample(&mut self) -> InputSample {
        self.buttons.sample()
    }
}

impl MotionSensor for Board {
    fn is_present(&mut self) -> bool {
        self.pir.is_present()
    }
}

impl LightSensor for Board {
    fn take_transition(&mut self) -> Option<Ambient> {
        self.light.take_transition()
    }
}

impl RenderSurface for Board {
    fn draw<const W: usize, const H: usize>(&mut self, grid: &Grid<W, H>) {
        self.console.draw(grid);
    }

    fn set_sleep(&mut self, sleeping: bool) {
        self.console.set_sleep(sleeping);
    }

    fn is_sleeping(&self) -> bool {
        self.console.is_sleeping()
    }

    fn set_ambient(&mut self, ambient: Ambient) {
        self.console.set_ambient(ambient);
    }
}

impl MonotonicClock for Board {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping millisecond counter
        Instant::now().as_millis() as u32
    }
}

impl Transport for Board {
    fn send(&mut self, bytes: &[u8]) {
        self.link.send(bytes);
    }
}

impl WallClock for Board {
    fn read_time(&mut self) -> Result<RtcTime, ClockError> {
        self.rtc.read_time()
    }
}

impl ScratchStore for Board {
    fn read_scratch(&mut self, offset: u8, buf: &mut [u8]) -> Result<usize, ClockError> {
        ScratchStore::read_scratch(&mut self.rtc, offset, buf)
    }

    fn write_scratch(&mut self, offset: u8, bytes: &[u8]) -> Result<usize, ClockError> {
        ScratchStore::write_scratch(&mut self.rtc, offset, bytes)
    }
}

impl ToneSink for Board {
    fn play(&mut self, freq_hz: u16, duration_ms: u16) {
        TONE_QUEUE.lock(|queue| queue.borrow_mut().play(freq_hz, duration_ms));
    }
}

/// PWM clock divider for the buzzer slice
const BUZZER_DIVIDER: u8 = 64;

/// Piezo buzzer on one PWM channel at 50% duty
pub struct PwmBuzzer {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmBuzzer {
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = BUZZER_DIVIDER.into();
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl ToneOutput for PwmBuzzer {
    fn start(&mut self, freq_hz: u16) {
        let counter_hz = embassy_rp::clocks::clk_sys_freq() / BUZZER_DIVIDER as u32;
        let top = (counter_hz / freq_hz.max(1) as u32).clamp(2, u16::MAX as u32);
        self.config.top = (top - 1) as u16;
        self.config.compare_a = (top / 2) as u16;
        self.pwm.set_config(&self.config);
    }

    fn stop(&mut self) {
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
    }
}
