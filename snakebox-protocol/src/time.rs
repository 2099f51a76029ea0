//! Wall-clock timestamps
//!
//! The real-time clock keeps two-digit years and does no calendar
//! validation, so neither does this type. Values round-trip as given.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Seconds in one day, used for midnight wraparound
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Calendar time as kept by the real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcTime {
    /// Year within the century (0-99, 25 = 2025)
    pub year: u8,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Day of week (1-7)
    pub weekday: u8,
    /// Hour in 24-hour format (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

impl RtcTime {
    /// Create a timestamp from date and time-of-day fields
    pub const fn new(year: u8, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            weekday: 1,
            hour,
            minute,
            second,
        }
    }

    /// Same timestamp with the weekday set
    pub const fn with_weekday(mut self, weekday: u8) -> Self {
        self.weekday = weekday;
        self
    }

    /// Seconds elapsed since local midnight
    pub fn seconds_since_midnight(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// Whole seconds from `self` to `end`, assuming less than a day passed
    ///
    /// A session that crosses midnight shows a smaller end time than start
    /// time; one day is added back in that case.
    pub fn seconds_until(&self, end: &RtcTime) -> u32 {
        let start_s = self.seconds_since_midnight();
        let end_s = end.seconds_since_midnight();

        if end_s >= start_s {
            end_s - start_s
        } else {
            end_s + SECONDS_PER_DAY - start_s
        }
    }

    /// Parse `YYYY-MM-DD HH:MM:SS` (the year must be 2000-2099)
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 19
            || bytes[4] != b'-'
            || bytes[7] != b'-'
            || bytes[10] != b' '
            || bytes[13] != b':'
            || bytes[16] != b':'
        {
            return None;
        }

        let century = two_digits(&bytes[0..2])?;
        if century != 20 {
            return None;
        }

        Some(Self::new(
            two_digits(&bytes[2..4])?,
            two_digits(&bytes[5..7])?,
            two_digits(&bytes[8..10])?,
            two_digits(&bytes[11..13])?,
            two_digits(&bytes[14..16])?,
            two_digits(&bytes[17..19])?,
        ))
    }
}

fn two_digits(pair: &[u8]) -> Option<u8> {
    match pair {
        [tens @ b'0'..=b'9', units @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (units - b'0')),
        _ => None,
    }
}

/// Formats as `20YY-MM-DD HH:MM:SS`
impl fmt::Display for RtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "20{:02}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn test_seconds_since_midnight() {
        let t = RtcTime::new(25, 1, 20, 12, 30, 15);
        assert_eq!(t.seconds_since_midnight(), 12 * 3600 + 30 * 60 + 15);
    }

    #[test]
    fn test_duration_same_day() {
        let start = RtcTime::new(25, 1, 20, 12, 0, 0);
        let end = RtcTime::new(25, 1, 20, 12, 2, 5);
        assert_eq!(start.seconds_until(&end), 125);
    }

    #[test]
    fn test_duration_across_midnight() {
        let start = RtcTime::new(25, 1, 20, 23, 59, 50);
        let end = RtcTime::new(25, 1, 21, 0, 0, 10);
        assert_eq!(start.seconds_until(&end), 20);
    }

    #[test]
    fn test_duration_zero() {
        let t = RtcTime::new(25, 1, 20, 8, 0, 0);
        assert_eq!(t.seconds_until(&t), 0);
    }

    #[test]
    fn test_display_zero_pads() {
        let t = RtcTime::new(5, 1, 2, 3, 4, 5);
        let mut s: String<32> = String::new();
        write!(s, "{}", t).unwrap();
        assert_eq!(s.as_str(), "2005-01-02 03:04:05");
    }

    #[test]
    fn test_parse() {
        let t = RtcTime::parse("2025-11-13 17:00:09").unwrap();
        assert_eq!(t, RtcTime::new(25, 11, 13, 17, 0, 9));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(RtcTime::parse("2025-11-13T17:00:09").is_none());
        assert!(RtcTime::parse("1999-11-13 17:00:09").is_none());
        assert!(RtcTime::parse("2025-1-13 17:00:09").is_none());
        assert!(RtcTime::parse("2025-11-13 17:0a:09").is_none());
        assert!(RtcTime::parse("").is_none());
    }

    #[test]
    fn test_out_of_range_fields_are_kept() {
        // No calendar validation: month 13 survives formatting and parsing
        let t = RtcTime::new(99, 13, 32, 25, 61, 61);
        let mut s: String<32> = String::new();
        write!(s, "{}", t).unwrap();
        assert_eq!(RtcTime::parse(&s), Some(t));
    }
}
