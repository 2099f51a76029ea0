//! Projection of engine state onto a symbol grid

use heapless::String;

use super::board::Point;
use super::engine::Engine;
use super::rng::RandomSource;

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cell {
    #[default]
    Empty,
    Head,
    Body,
    Food,
}

impl Cell {
    /// ASCII symbol used by text surfaces
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Head => 'O',
            Cell::Body => 'o',
            Cell::Food => '*',
        }
    }
}

/// A full `H` rows by `W` columns snapshot of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<const W: usize, const H: usize> {
    rows: [[Cell; W]; H],
}

impl<const W: usize, const H: usize> Default for Grid<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Grid<W, H> {
    pub const fn new() -> Self {
        Self {
            rows: [[Cell::Empty; W]; H],
        }
    }

    /// Set every cell to `Empty`
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            row.fill(Cell::Empty);
        }
    }

    /// Cell at `p`, or `None` when off the grid
    pub fn get(&self, p: Point) -> Option<Cell> {
        if p.in_bounds(W, H) {
            Some(self.rows[p.y as usize][p.x as usize])
        } else {
            None
        }
    }

    /// Write `cell` at `p`; off-grid points are skipped
    pub fn set(&mut self, p: Point, cell: Cell) {
        if p.in_bounds(W, H) {
            self.rows[p.y as usize][p.x as usize] = cell;
        }
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == cell)
            .count()
    }

    /// One row rendered as ASCII symbols
    ///
    /// Rows past the bottom render as empty strings.
    pub fn row_text(&self, y: usize) -> String<W> {
        let mut text = String::new();
        if let Some(row) = self.rows.get(y) {
            for cell in row {
                // One ASCII byte per cell, so W always fits
                let _ = text.push(cell.symbol());
            }
        }
        text
    }
}

impl<R: RandomSource, const W: usize, const H: usize, const N: usize> Engine<R, W, H, N> {
    /// Project the current state into `grid`
    ///
    /// Food is drawn first and the snake tail-to-head on top, so the head
    /// wins any overlap and the snake always wins over food.
    pub fn to_grid(&self, grid: &mut Grid<W, H>) {
        grid.clear();
        grid.set(self.food(), Cell::Food);

        let snake = self.snake();
        for (i, &p) in snake.iter().enumerate().rev() {
            let cell = if i == 0 { Cell::Head } else { Cell::Body };
            grid.set(p, cell);
        }
    }
}
