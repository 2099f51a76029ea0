//! Pseudo-random source for food placement

/// Source of pseudo-random numbers
///
/// The firmware can back this with a hardware RNG; tests use scripted values.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

/// Marsaglia xorshift32 generator
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator from a seed
    ///
    /// A zero seed would lock the generator at zero, so it is replaced.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
