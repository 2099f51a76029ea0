//! Blocking UART transport
//!
//! Frames are written whole. A failed write drops the frame and is counted;
//! the loop never sees transport errors.

use embedded_io::Write;
use snakebox_core::traits::Transport;

/// Fire-and-forget transport over any `embedded_io` writer
pub struct UartTransport<W> {
    writer: W,
    sent_frames: u32,
    dropped_frames: u32,
}

impl<W: Write> UartTransport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sent_frames: 0,
            dropped_frames: 0,
        }
    }

    /// Frames fully written
    pub fn sent_frames(&self) -> u32 {
        self.sent_frames
    }

    /// Frames lost to write errors
    pub fn dropped_frames(&self) -> u32 {
        self.dropped_frames
    }

    pub fn release(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for UartTransport<W> {
    fn send(&mut self, bytes: &[u8]) {
        let result = self.writer.write_all(bytes).and_then(|()| self.writer.flush());
        match result {
            Ok(()) => self.sent_frames = self.sent_frames.saturating_add(1),
            Err(_) => self.dropped_frames = self.dropped_frames.saturating_add(1),
        }
    }
}
