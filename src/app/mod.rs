//! Application orchestration: state management, event loop, input handling
//! and background asset loading.

pub mod asset_runtime;
pub mod event;
pub mod handler;
pub mod state;
