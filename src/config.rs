//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the runtime (tick cadence,
//! key steps, file picker, state/log locations) and helpers to load them
//! from disk and the environment.

mod load;
mod schema;

pub use schema::*;
