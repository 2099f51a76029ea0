//! Render surface trait

use super::sensor::Ambient;
use crate::game::Grid;

/// Trait for the surface the board is drawn on
///
/// The surface owns pixel or text layout; the loop hands it whole grids.
pub trait RenderSurface {
    /// Draw a full board snapshot
    ///
    /// Implementations skip drawing while asleep.
    fn draw<const W: usize, const H: usize>(&mut self, grid: &Grid<W, H>);

    /// Enter or leave sleep
    fn set_sleep(&mut self, sleeping: bool);

    /// Check if the surface is asleep
    fn is_sleeping(&self) -> bool;

    /// Switch between dark and bright display modes
    fn set_ambient(&mut self, ambient: Ambient);
}
