//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No filesystem I/O happens here.

pub mod backdrop;
pub mod drawer;
pub mod layout;
pub mod narration;
pub mod progress;
pub mod screen;
pub mod shapes;
pub mod sources_section;
pub mod spinner;
pub mod stats;
pub mod text;
pub mod theme;
