//! Render surfaces

pub mod console;

pub use console::ConsoleSurface;
