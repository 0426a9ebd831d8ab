//! File discovery for the picker popup.

mod model;
mod scan;

pub use model::{Entry, FileKind};
pub use scan::scan;
