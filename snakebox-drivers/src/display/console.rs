//! Text console render surface
//!
//! Draws the board as rows of ASCII symbols on an ANSI terminal (or any
//! serial text display that understands the same escapes). Sleeping blanks
//! the screen and stops redraws.
//!
//! The surface remembers what is on screen and rewrites only rows that
//! changed, so a snake step costs a few rows instead of the whole board.
//! Draws do not flush; the writer drains at its own pace.

use core::fmt::Write as _;

use embedded_io::Write;
use heapless::{String, Vec};
use snakebox_core::game::Grid;
use snakebox_core::traits::{Ambient, RenderSurface};

/// Clear screen and home the cursor
const CLEAR: &[u8] = b"\x1b[2J\x1b[H";
/// Reverse video for dark rooms
const DARK: &[u8] = b"\x1b[7m";
/// Normal video
const BRIGHT: &[u8] = b"\x1b[27m";

/// Bytes of board text remembered between draws
pub const SHADOW_LEN: usize = 1024;

/// Board renderer over an `embedded_io` writer
pub struct ConsoleSurface<W> {
    writer: W,
    sleeping: bool,
    ambient: Ambient,
    /// Row text currently on screen, row-major; empty when unknown
    shown: Vec<u8, SHADOW_LEN>,
    write_errors: u32,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sleeping: false,
            ambient: Ambient::Bright,
            shown: Vec::new(),
            write_errors: 0,
        }
    }

    pub fn ambient(&self) -> Ambient {
        self.ambient
    }

    /// Writes that failed since creation
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    pub fn release(self) -> W {
        self.writer
    }

    fn emit(&mut self, bytes: &[u8]) {
        if self.writer.write_all(bytes).is_err() {
            self.write_errors = self.write_errors.saturating_add(1);
        }
    }

    /// Move the cursor to the start of row `y` (zero-based)
    fn goto_row(&mut self, y: usize) {
        let mut escape: String<32> = String::new();
        let _ = write!(escape, "\x1b[{};1H", y + 1);
        self.emit(escape.as_bytes());
    }

    fn flush(&mut self) {
        if self.writer.flush().is_err() {
            self.write_errors = self.write_errors.saturating_add(1);
        }
    }
}

impl<W: Write> RenderSurface for ConsoleSurface<W> {
    fn draw<const C: usize, const R: usize>(&mut self, grid: &Grid<C, R>) {
        if self.sleeping {
            return;
        }

        // Boards too big to remember are redrawn in full every time
        let cacheable = C * R <= SHADOW_LEN;
        let known = cacheable && self.shown.len() == C * R;
        if cacheable && !known {
            self.shown.clear();
            let _ = self.shown.resize(C * R, 0);
        }

        for y in 0..R {
            let row = grid.row_text(y);
            let span = y * C..(y + 1) * C;
            if known && self.shown[span.clone()] == *row.as_bytes() {
                continue;
            }

            self.goto_row(y);
            self.emit(row.as_bytes());
            if cacheable {
                self.shown[span].copy_from_slice(row.as_bytes());
            }
        }
    }

    fn set_sleep(&mut self, sleeping: bool) {
        if sleeping != self.sleeping {
            self.emit(CLEAR);
            self.flush();
            self.shown.clear();
        }
        self.sleeping = sleeping;
    }

    fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    fn set_ambient(&mut self, ambient: Ambient) {
        self.ambient = ambient;
        let escape = match ambient {
            Ambient::Dark => DARK,
            Ambient::Bright => BRIGHT,
        };
        self.emit(escape);
        self.flush();
        // Video mode applies to newly written text only
        self.shown.clear();
    }
}
