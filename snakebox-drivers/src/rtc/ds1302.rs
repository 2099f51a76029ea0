//! DS1302 trickle-charge timekeeping chip
//!
//! # 3-Wire Protocol
//!
//! Every register access is one transaction framed by CE:
//! - CE low, SCLK low, CE high
//! - Address byte, LSB first
//! - One data byte, LSB first, written by the host or read from the chip
//! - CE low
//!
//! Bits are set up while SCLK is low and latched on the rising edge. Read
//! addresses are the write address with bit 0 set. Calendar registers hold
//! BCD values.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use snakebox_core::traits::{ClockError, ScratchStore, WallClock};
use snakebox_core::RtcTime;

use super::bcd;

/// DS1302 register write addresses
pub mod reg {
    /// Seconds; bit 7 is clock halt (CH)
    pub const SECONDS: u8 = 0x80;
    pub const MINUTES: u8 = 0x82;
    /// Hours; bit 7 selects 12-hour mode
    pub const HOURS: u8 = 0x84;
    /// Day of month
    pub const DATE: u8 = 0x86;
    pub const MONTH: u8 = 0x88;
    /// Day of week (1-7)
    pub const WEEKDAY: u8 = 0x8A;
    pub const YEAR: u8 = 0x8C;
    /// Write protect; bit 7 set blocks all writes
    pub const WRITE_PROTECT: u8 = 0x8E;
    /// First scratch RAM byte; bytes are 2 addresses apart
    pub const RAM_BASE: u8 = 0xC0;
    /// Read address flag
    pub const READ: u8 = 0x01;
}

/// Seconds register clock-halt flag
const CLOCK_HALT: u8 = 0x80;

/// Write-protect register value that locks the chip
const WP_SET: u8 = 0x80;

/// Scratch RAM size in bytes
pub const SCRATCH_LEN: usize = 31;

/// Half-period of SCLK; the chip tolerates 500 kHz at 2 V
const BIT_DELAY_NS: u32 = 1_000;

/// Bidirectional data line
///
/// The host drives the line while sending and releases it while the chip
/// answers.
pub trait IoLine {
    type Error;

    /// Drive the line to `high`
    fn drive(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Stop driving so the chip can answer
    fn release(&mut self) -> Result<(), Self::Error>;

    /// Read the line level
    fn is_high(&mut self) -> Result<bool, Self::Error>;
}

/// Errors from the DS1302 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ds1302Error<E> {
    /// A bus line failed
    Pin(E),
}

impl<E> From<Ds1302Error<E>> for ClockError {
    fn from(e: Ds1302Error<E>) -> Self {
        match e {
            Ds1302Error::Pin(_) => ClockError::Bus,
        }
    }
}

/// DS1302 driver over three GPIO lines
pub struct Ds1302<CE, SCLK, IO, D> {
    ce: CE,
    sclk: SCLK,
    io: IO,
    delay: D,
}

impl<CE, SCLK, IO, D, E> Ds1302<CE, SCLK, IO, D>
where
    CE: OutputPin<Error = E>,
    SCLK: OutputPin<Error = E>,
    IO: IoLine<Error = E>,
    D: DelayNs,
{
    pub fn new(ce: CE, sclk: SCLK, io: IO, delay: D) -> Self {
        Self {
            ce,
            sclk,
            io,
            delay,
        }
    }

    /// Release the bus lines
    pub fn release(self) -> (CE, SCLK, IO, D) {
        (self.ce, self.sclk, self.io, self.delay)
    }

    /// Prepare the chip after power-up
    ///
    /// Idles the bus, clears write protect, and restarts a halted
    /// oscillator without changing the stored seconds.
    pub fn init(&mut self) -> Result<(), Ds1302Error<E>> {
        self.ce.set_low().map_err(Ds1302Error::Pin)?;
        self.sclk.set_low().map_err(Ds1302Error::Pin)?;

        self.write_register(reg::WRITE_PROTECT, 0x00)?;

        let seconds = self.read_register(reg::SECONDS)?;
        if seconds & CLOCK_HALT != 0 {
            self.write_register(reg::SECONDS, seconds & !CLOCK_HALT)?;
        }
        Ok(())
    }

    /// Check if the oscillator is stopped
    pub fn is_halted(&mut self) -> Result<bool, Ds1302Error<E>> {
        Ok(self.read_register(reg::SECONDS)? & CLOCK_HALT != 0)
    }

    /// Read the calendar registers
    pub fn get_time(&mut self) -> Result<RtcTime, Ds1302Error<E>> {
        let second = self.read_register(reg::SECONDS)?;
        let minute = self.read_register(reg::MINUTES)?;
        let hour = self.read_register(reg::HOURS)?;
        let day = self.read_register(reg::DATE)?;
        let month = self.read_register(reg::MONTH)?;
        let weekday = self.read_register(reg::WEEKDAY)?;
        let year = self.read_register(reg::YEAR)?;

        Ok(RtcTime {
            year: bcd::decode(year),
            month: bcd::decode(month & 0x1F),
            day: bcd::decode(day & 0x3F),
            weekday: bcd::decode(weekday & 0x07),
            // 24-hour mode only
            hour: bcd::decode(hour & 0x3F),
            minute: bcd::decode(minute & 0x7F),
            second: bcd::decode(second & !CLOCK_HALT),
        })
    }

    /// Write the calendar registers
    ///
    /// Forces 24-hour mode and a running oscillator, then restores write
    /// protect.
    pub fn set_time(&mut self, time: &RtcTime) -> Result<(), Ds1302Error<E>> {
        self.write_register(reg::WRITE_PROTECT, 0x00)?;

        self.write_register(reg::YEAR, bcd::encode(time.year))?;
        self.write_register(reg::MONTH, bcd::encode(time.month))?;
        self.write_register(reg::DATE, bcd::encode(time.day))?;
        self.write_register(reg::HOURS, bcd::encode(time.hour) & 0x3F)?;
        self.write_register(reg::MINUTES, bcd::encode(time.minute))?;
        self.write_register(reg::WEEKDAY, bcd::encode(time.weekday))?;
        // Seconds last so the clock restarts with everything else in place
        self.write_register(reg::SECONDS, bcd::encode(time.second) & !CLOCK_HALT)?;

        self.write_register(reg::WRITE_PROTECT, WP_SET)
    }

    /// Read scratch RAM starting at `offset`
    ///
    /// Clamped to the 31-byte region; returns the number of bytes read.
    pub fn read_scratch(&mut self, offset: u8, buf: &mut [u8]) -> Result<usize, Ds1302Error<E>> {
        let len = clamp(offset, buf.len());
        for (i, byte) in buf[..len].iter_mut().enumerate() {
            *byte = self.read_register(ram_address(offset, i))?;
        }
        Ok(len)
    }

    /// Write scratch RAM starting at `offset`
    ///
    /// Clamped to the 31-byte region; returns the number of bytes written.
    /// Write protect is restored afterwards.
    pub fn write_scratch(&mut self, offset: u8, bytes: &[u8]) -> Result<usize, Ds1302Error<E>> {
        let len = clamp(offset, bytes.len());
        if len == 0 {
            return Ok(0);
        }

        self.write_register(reg::WRITE_PROTECT, 0x00)?;
        for (i, &byte) in bytes[..len].iter().enumerate() {
            self.write_register(ram_address(offset, i), byte)?;
        }
        self.write_register(reg::WRITE_PROTECT, WP_SET)?;
        Ok(len)
    }

    /// Read one register by its write address
    pub fn read_register(&mut self, address: u8) -> Result<u8, Ds1302Error<E>> {
        self.begin()?;
        self.write_byte(address | reg::READ)?;
        let value = self.read_byte()?;
        self.end()?;
        Ok(value)
    }

    /// Write one register by its write address
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Ds1302Error<E>> {
        self.begin()?;
        self.write_byte(address & !reg::READ)?;
        self.write_byte(value)?;
        self.end()
    }

    fn begin(&mut self) -> Result<(), Ds1302Error<E>> {
        self.ce.set_low().map_err(Ds1302Error::Pin)?;
        self.sclk.set_low().map_err(Ds1302Error::Pin)?;
        self.ce.set_high().map_err(Ds1302Error::Pin)?;
        self.delay.delay_ns(BIT_DELAY_NS);
        Ok(())
    }

    fn end(&mut self) -> Result<(), Ds1302Error<E>> {
        self.ce.set_low().map_err(Ds1302Error::Pin)?;
        self.sclk.set_low().map_err(Ds1302Error::Pin)
    }

    fn write_byte(&mut self, mut value: u8) -> Result<(), Ds1302Error<E>> {
        for _ in 0..8 {
            self.sclk.set_low().map_err(Ds1302Error::Pin)?;
            self.delay.delay_ns(BIT_DELAY_NS);
            self.io.drive(value & 0x01 != 0).map_err(Ds1302Error::Pin)?;
            self.sclk.set_high().map_err(Ds1302Error::Pin)?;
            self.delay.delay_ns(BIT_DELAY_NS);
            value >>= 1;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, Ds1302Error<E>> {
        self.io.release().map_err(Ds1302Error::Pin)?;

        let mut value = 0u8;
        for _ in 0..8 {
            value >>= 1;
            self.sclk.set_low().map_err(Ds1302Error::Pin)?;
            self.delay.delay_ns(BIT_DELAY_NS);
            if self.io.is_high().map_err(Ds1302Error::Pin)? {
                value |= 0x80;
            }
            self.sclk.set_high().map_err(Ds1302Error::Pin)?;
            self.delay.delay_ns(BIT_DELAY_NS);
        }
        Ok(value)
    }
}

/// Bytes of a scratch access that fit the region
fn clamp(offset: u8, len: usize) -> usize {
    let offset = offset as usize;
    if offset >= SCRATCH_LEN {
        return 0;
    }
    len.min(SCRATCH_LEN - offset)
}

fn ram_address(offset: u8, index: usize) -> u8 {
    reg::RAM_BASE + ((offset as usize + index) as u8) * 2
}

impl<CE, SCLK, IO, D, E> WallClock for Ds1302<CE, SCLK, IO, D>
where
    CE: OutputPin<Error = E>,
    SCLK: OutputPin<Error = E>,
    IO: IoLine<Error = E>,
    D: DelayNs,
{
    fn read_time(&mut self) -> Result<RtcTime, ClockError> {
        Ok(self.get_time()?)
    }
}

impl<CE, SCLK, IO, D, E> ScratchStore for Ds1302<CE, SCLK, IO, D>
where
    CE: OutputPin<Error = E>,
    SCLK: OutputPin<Error = E>,
    IO: IoLine<Error = E>,
    D: DelayNs,
{
    fn read_scratch(&mut self, offset: u8, buf: &mut [u8]) -> Result<usize, ClockError> {
        Ok(Ds1302::read_scratch(self, offset, buf)?)
    }

    fn write_scratch(&mut self, offset: u8, bytes: &[u8]) -> Result<usize, ClockError> {
        Ok(Ds1302::write_scratch(self, offset, bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use heapless::Vec;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Phase {
        Address,
        Write,
        Read,
        Done,
    }

    /// Bit-level model of the chip
    struct Chip {
        regs: [u8; 256],
        ce: bool,
        sclk: bool,
        host_level: bool,
        host_driving: bool,
        phase: Phase,
        shift: u8,
        bits: u8,
        address: u8,
        /// Completed transactions as (address, data)
        log: Vec<(u8, u8), 128>,
        /// Bits clocked while CE was low
        stray_clocks: u32,
        /// Times the host drove the line during a read phase
        bus_fights: u32,
    }

    impl Chip {
        fn new() -> Self {
            Self {
                regs: [0; 256],
                ce: false,
                sclk: false,
                host_level: false,
                host_driving: true,
                phase: Phase::Address,
                shift: 0,
                bits: 0,
                address: 0,
                log: Vec::new(),
                stray_clocks: 0,
                bus_fights: 0,
            }
        }

        fn set_ce(&mut self, high: bool) {
            if !high {
                self.phase = Phase::Address;
                self.shift = 0;
                self.bits = 0;
            }
            self.ce = high;
        }

        fn set_sclk(&mut self, high: bool) {
            let rising = high && !self.sclk;
            self.sclk = high;
            if !rising {
                return;
            }
            if !self.ce {
                self.stray_clocks += 1;
                return;
            }

            match self.phase {
                Phase::Address | Phase::Write => {
                    if self.host_level {
                        self.shift |= 1 << self.bits;
                    }
                    self.bits += 1;
                    if self.bits == 8 {
                        self.byte_complete();
                    }
                }
                Phase::Read => {
                    if self.host_driving {
                        self.bus_fights += 1;
                    }
                    self.bits += 1;
                    if self.bits == 8 {
                        let data = self.regs[(self.address & !1) as usize];
                        self.log.push((self.address, data)).unwrap();
                        self.phase = Phase::Done;
                    }
                }
                Phase::Done => {}
            }
        }

        fn byte_complete(&mut self) {
            let byte = self.shift;
            self.shift = 0;
            self.bits = 0;

            match self.phase {
                Phase::Address => {
                    self.address = byte;
                    self.phase = if byte & 1 != 0 {
                        Phase::Read
                    } else {
                        Phase::Write
                    };
                }
                Phase::Write => {
                    let wp = self.regs[reg::WRITE_PROTECT as usize] & WP_SET != 0;
                    if !wp || self.address == reg::WRITE_PROTECT {
                        self.regs[self.address as usize] = byte;
                    }
                    self.log.push((self.address, byte)).unwrap();
                    self.phase = Phase::Done;
                }
                _ => {}
            }
        }

        fn output_level(&self) -> bool {
            let data = self.regs[(self.address & !1) as usize];
            self.phase == Phase::Read && (data >> self.bits) & 1 != 0
        }

        fn writes_to(&self, address: u8) -> usize {
            self.log.iter().filter(|(a, _)| *a == address).count()
        }
    }

    struct Ce<'a>(&'a RefCell<Chip>);
    struct Sclk<'a>(&'a RefCell<Chip>);
    struct Io<'a>(&'a RefCell<Chip>);
    struct NoDelay;

    impl ErrorType for Ce<'_> {
        type Error = Infallible;
    }

    impl OutputPin for Ce<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().set_ce(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().set_ce(true);
            Ok(())
        }
    }

    impl ErrorType for Sclk<'_> {
        type Error = Infallible;
    }

    impl OutputPin for Sclk<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().set_sclk(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().set_sclk(true);
            Ok(())
        }
    }

    impl IoLine for Io<'_> {
        type Error = Infallible;

        fn drive(&mut self, high: bool) -> Result<(), Infallible> {
            let mut chip = self.0.borrow_mut();
            chip.host_driving = true;
            chip.host_level = high;
            Ok(())
        }

        fn release(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().host_driving = false;
            Ok(())
        }

        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0.borrow().output_level())
        }
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn driver(chip: &RefCell<Chip>) -> Ds1302<Ce<'_>, Sclk<'_>, Io<'_>, NoDelay> {
        Ds1302::new(Ce(chip), Sclk(chip), Io(chip), NoDelay)
    }

    #[test]
    fn test_get_time_decodes_bcd() {
        let chip = RefCell::new(Chip::new());
        {
            let mut c = chip.borrow_mut();
            c.regs[reg::SECONDS as usize] = 0x80 | 0x45; // halted, 45 s
            c.regs[reg::MINUTES as usize] = 0x59;
            c.regs[reg::HOURS as usize] = 0x23;
            c.regs[reg::DATE as usize] = 0x31;
            c.regs[reg::MONTH as usize] = 0x12;
            c.regs[reg::WEEKDAY as usize] = 0x07;
            c.regs[reg::YEAR as usize] = 0x99;
        }

        let time = driver(&chip).get_time().unwrap();
        assert_eq!(
            time,
            RtcTime::new(99, 12, 31, 23, 59, 45).with_weekday(7)
        );

        let c = chip.borrow();
        // Every access was a framed read at the read address
        assert_eq!(c.log.len(), 7);
        assert!(c.log.iter().all(|(a, _)| a & reg::READ != 0));
        assert_eq!(c.log[0].0, reg::SECONDS | reg::READ);
        assert_eq!(c.stray_clocks, 0);
        assert_eq!(c.bus_fights, 0);
    }

    #[test]
    fn test_set_time_clears_halt_and_brackets_write_protect() {
        let chip = RefCell::new(Chip::new());
        chip.borrow_mut().regs[reg::WRITE_PROTECT as usize] = WP_SET;

        let time = RtcTime::new(24, 2, 29, 17, 5, 9).with_weekday(4);
        driver(&chip).set_time(&time).unwrap();

        let c = chip.borrow();
        assert_eq!(c.log.first(), Some(&(reg::WRITE_PROTECT, 0x00)));
        assert_eq!(c.log.last(), Some(&(reg::WRITE_PROTECT, WP_SET)));
        assert_eq!(c.regs[reg::SECONDS as usize], 0x09);
        assert_eq!(c.regs[reg::MINUTES as usize], 0x05);
        assert_eq!(c.regs[reg::HOURS as usize], 0x17);
        assert_eq!(c.regs[reg::DATE as usize], 0x29);
        assert_eq!(c.regs[reg::MONTH as usize], 0x02);
        assert_eq!(c.regs[reg::WEEKDAY as usize], 0x04);
        assert_eq!(c.regs[reg::YEAR as usize], 0x24);
        drop(c);

        assert_eq!(driver(&chip).get_time().unwrap(), time);
    }

    #[test]
    fn test_init_restarts_halted_clock() {
        let chip = RefCell::new(Chip::new());
        {
            let mut c = chip.borrow_mut();
            c.regs[reg::WRITE_PROTECT as usize] = WP_SET;
            c.regs[reg::SECONDS as usize] = 0x80 | 0x37;
        }

        let mut rtc = driver(&chip);
        assert!(rtc.is_halted().unwrap());
        rtc.init().unwrap();
        assert!(!rtc.is_halted().unwrap());

        let c = chip.borrow();
        assert_eq!(c.regs[reg::SECONDS as usize], 0x37);
        assert_eq!(c.regs[reg::WRITE_PROTECT as usize], 0x00);
    }

    #[test]
    fn test_init_leaves_running_clock() {
        let chip = RefCell::new(Chip::new());
        chip.borrow_mut().regs[reg::SECONDS as usize] = 0x12;

        driver(&chip).init().unwrap();
        assert_eq!(chip.borrow().writes_to(reg::SECONDS), 0);
    }

    #[test]
    fn test_scratch_roundtrip() {
        let chip = RefCell::new(Chip::new());
        let mut rtc = driver(&chip);

        assert_eq!(rtc.write_scratch(3, &[1, 2, 3]).unwrap(), 3);
        let mut buf = [0u8; 5];
        assert_eq!(rtc.read_scratch(2, &mut buf).unwrap(), 5);
        assert_eq!(buf, [0, 1, 2, 3, 0]);
        drop(rtc);

        let c = chip.borrow();
        assert_eq!(c.regs[(reg::RAM_BASE + 3 * 2) as usize], 1);
        assert_eq!(c.regs[reg::WRITE_PROTECT as usize], WP_SET);
    }

    #[test]
    fn test_scratch_clamped_at_end() {
        let chip = RefCell::new(Chip::new());
        let mut rtc = driver(&chip);

        assert_eq!(rtc.write_scratch(29, &[9, 8, 7, 6, 5]).unwrap(), 2);
        let mut buf = [0u8; 8];
        assert_eq!(rtc.read_scratch(29, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[9, 8]);
        drop(rtc);

        // Last byte lives at 0xFC
        assert_eq!(chip.borrow().regs[0xFC], 8);
    }

    #[test]
    fn test_scratch_out_of_range_is_empty() {
        let chip = RefCell::new(Chip::new());
        let mut rtc = driver(&chip);

        assert_eq!(rtc.write_scratch(31, &[1]).unwrap(), 0);
        assert_eq!(rtc.write_scratch(0, &[]).unwrap(), 0);
        let mut buf = [0u8; 4];
        assert_eq!(rtc.read_scratch(40, &mut buf).unwrap(), 0);
        drop(rtc);

        assert!(chip.borrow().log.is_empty());
    }

    #[test]
    fn test_wall_clock_trait() {
        let chip = RefCell::new(Chip::new());
        chip.borrow_mut().regs[reg::HOURS as usize] = 0x08;
        let mut rtc = driver(&chip);

        fn read<C: WallClock>(clock: &mut C) -> RtcTime {
            clock.read_time().unwrap()
        }
        assert_eq!(read(&mut rtc).hour, 8);
    }
}
