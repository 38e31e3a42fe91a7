//! Code entry field.

mod render;
mod state;

pub use render::code_slots_line;
pub use state::{CODE_LENGTH, CodeEntry};
