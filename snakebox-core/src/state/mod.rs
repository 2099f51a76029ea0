//! Console mode state machine
//!
//! The console is either waiting for a player or running a game. Transitions
//! are explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Mode;
