//! Audio backends.
//!
//! The engine only talks to the [`MediaBackend`] trait. [`RodioTrack`] is the
//! real implementation: one `rodio::Sink` per track on a shared output stream.

mod backend;
mod player;
mod sink;
mod types;

pub use backend::MediaBackend;
pub use player::{RodioTrack, fade_out_together, open_output};
pub use types::*;

#[cfg(test)]
mod tests;
