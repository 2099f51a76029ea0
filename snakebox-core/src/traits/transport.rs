//! Serial transport trait

/// Trait for the outbound serial link
///
/// Sends are fire-and-forget. Implementations swallow write errors.
pub trait Transport {
    fn send(&mut self, bytes: &[u8]);
}
