//! Timed lyrics: cue sheet parsing and active-line resolution.
//!
//! A cue sheet is an ordered list of "begins at" markers. A line stays active
//! until the next cue's timestamp is reached.

mod cue;
mod parse;

pub use cue::*;
pub use parse::*;

#[cfg(test)]
mod tests;
