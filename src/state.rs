//! The persisted player record and where it is stored.
//!
//! One small JSON object per installation remembers the chosen files and the
//! balance between sessions. Persistence is best-effort: the in-memory state
//! stays authoritative when the disk misbehaves.

mod record;
mod store;

pub use record::*;
pub use store::*;
