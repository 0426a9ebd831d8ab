//! Application module: the state the TUI renders.
//!
//! `App` mirrors everything the engine has told the front-end through render
//! commands; `Picker` is the file chooser popup.

mod model;
mod picker;

pub use model::*;
pub use picker::*;

#[cfg(test)]
mod tests;
