//! Binary-coded decimal helpers
//!
//! One decimal digit per nibble: tens in the high nibble, units in the low.

/// Decode a BCD byte to its decimal value
pub const fn decode(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Encode a decimal value (0-99) as BCD
pub const fn encode(dec: u8) -> u8 {
    ((dec / 10) << 4) | (dec % 10)
}
