//! The playback synchronization engine.
//!
//! Pure building blocks (`time_map`, `balance`, `progress`) plus the
//! `Transport` state machine that drives two media backends from UI events
//! and a periodic tick.

mod balance;
mod events;
mod progress;
mod time_map;
mod transport;

pub use balance::*;
pub use events::*;
pub use progress::*;
pub use time_map::*;
pub use transport::*;
