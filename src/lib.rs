//! A scroll-driven terminal documentary.
//!
//! `core` holds the story data and the pure scroll/animation engine, `app`
//! the state machine and background loaders, `ui` the ratatui widgets.

pub mod app;
pub mod assets;
pub mod config;
pub mod core;
pub mod ui;
