//! Core engine: story data, scroll resolution, camera blending and
//! per-element timing.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Every
//! derivation is a pure function over a borrowed [`catalog::Catalog`] (or a
//! slice of its scenes), so tests can drive it with synthetic stories.

pub mod animation;
pub mod camera;
pub mod catalog;
pub mod citations;
pub mod easing;
pub mod resolver;
pub mod sampler;
pub mod story;
