//! Scroll sampling: turns a physical row offset into the smoothed progress
//! scalar the rest of the engine reads.
//!
//! The document is laid out like a tall page: each scene owns
//! `scene_height_pct`% of a viewport of scroll, followed by a two-viewport
//! buffer.  Past the end of that container the trailing sources section
//! scrolls in while progress stays pinned at 1.
//!
//! Programmatic movement (scene jumps, boundary snaps) runs through an
//! explicit auto-scroll target.  While it is set the sampler never treats
//! the motion as user input, so a snap cannot trigger another snap.

use std::time::{Duration, Instant};

use super::animation::Motion;
use super::catalog::Scene;
use super::resolver::resolve_scene;

/// Per-tick damping toward the raw ratio.
pub const DEFAULT_SMOOTHING: f64 = 0.15;
/// Damping under reduced motion: no smoothing delay.
pub const REDUCED_SMOOTHING: f64 = 1.0;
/// Smoothed progress within this of the raw ratio is considered settled.
pub const SETTLE_EPSILON: f64 = 1e-4;

/// Idle time after the last user scroll before a boundary snap is considered.
pub const SNAP_IDLE: Duration = Duration::from_millis(200);
/// Raw progress within this distance of a scene edge is eligible to snap.
pub const SNAP_EPSILON: f64 = 0.02;
/// How far inside the scene a snap lands.
pub const SNAP_INSET: f64 = 0.01;
/// Scene jumps land just after the target scene's start.
pub const JUMP_INSET: f64 = 0.01;

pub const DEFAULT_SCENE_HEIGHT_PCT: u16 = 150;
/// Extra scroll after the last scene, as a percentage of the viewport.
const TRAILING_BUFFER_PCT: f64 = 200.0;
/// Share of the remaining distance an auto-scroll covers per tick.
const AUTO_SCROLL_RATE: f64 = 0.25;
/// Auto-scrolls within this many rows of their target finish.
const AUTO_SCROLL_ARRIVE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Damping constant `k` in `smoothed += (raw - smoothed) * k`.
    pub smoothing: f64,
    /// Rows of scroll per scene, as a percentage of the viewport height.
    pub scene_height_pct: u16,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            scene_height_pct: DEFAULT_SCENE_HEIGHT_PCT,
        }
    }
}

/// Continuous scroll state for one document.
#[derive(Debug, Clone)]
pub struct ScrollSampler {
    config: SamplerConfig,
    motion: Motion,
    scene_count: usize,
    viewport_rows: f64,
    /// Rows of the section that follows the scene container.
    trailing_rows: f64,
    /// Physical offset in rows (fractional while auto-scrolling).
    offset: f64,
    smoothed: f64,
    last_user_input: Option<Instant>,
    /// Set by user input, consumed by the next snap check.
    snap_armed: bool,
    /// Destination of an in-flight programmatic scroll.
    auto_target: Option<f64>,
}

impl ScrollSampler {
    pub fn new(scene_count: usize, viewport_rows: u16, config: SamplerConfig) -> Self {
        Self {
            config: SamplerConfig {
                smoothing: config.smoothing.clamp(0.02, 1.0),
                scene_height_pct: config.scene_height_pct.max(10),
            },
            motion: Motion::Full,
            scene_count,
            viewport_rows: f64::from(viewport_rows.max(1)),
            trailing_rows: 0.0,
            offset: 0.0,
            smoothed: 0.0,
            last_user_input: None,
            snap_armed: false,
            auto_target: None,
        }
    }

    // ── geometry ──────────────────────────────────────────────

    /// Height of the scene container in rows.
    pub fn container_rows(&self) -> f64 {
        let per_scene = f64::from(self.config.scene_height_pct) / 100.0;
        self.viewport_rows * (self.scene_count as f64 * per_scene + TRAILING_BUFFER_PCT / 100.0)
    }

    /// Rows of scroll that map onto progress `[0, 1]`.
    pub fn scrollable_rows(&self) -> f64 {
        (self.container_rows() - self.viewport_rows).max(1.0)
    }

    fn max_offset(&self) -> f64 {
        self.scrollable_rows() + self.trailing_rows
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows as u16
    }

    /// Resize, keeping the reader at the same progress.
    pub fn set_viewport(&mut self, rows: u16) {
        let rows = f64::from(rows.max(1));
        if (rows - self.viewport_rows).abs() < f64::EPSILON {
            return;
        }
        let progress = self.raw_progress();
        let overflow = self.overflow_rows();
        self.viewport_rows = rows;
        self.offset = progress * self.scrollable_rows() + overflow;
        if let Some(target) = self.auto_target.take() {
            tracing::debug!(target, "viewport resized, auto-scroll dropped");
        }
        self.clamp_offset();
    }

    pub fn set_trailing_rows(&mut self, rows: u16) {
        self.trailing_rows = f64::from(rows);
        self.clamp_offset();
    }

    pub fn set_motion(&mut self, motion: Motion) {
        self.motion = motion;
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    // ── readings ──────────────────────────────────────────────

    /// Unsmoothed `offset / scrollable`, clamped to `[0, 1]`.
    pub fn raw_progress(&self) -> f64 {
        (self.offset / self.scrollable_rows()).clamp(0.0, 1.0)
    }

    /// The canonical, smoothed progress scalar.
    pub fn progress(&self) -> f64 {
        self.smoothed
    }

    pub fn offset_rows(&self) -> f64 {
        self.offset
    }

    /// Rows scrolled past the scene container (0 while inside it).
    pub fn overflow_rows(&self) -> f64 {
        (self.offset - self.scrollable_rows()).max(0.0)
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_target.is_some()
    }

    fn smoothing(&self) -> f64 {
        if self.motion.is_reduced() {
            REDUCED_SMOOTHING
        } else {
            self.config.smoothing
        }
    }

    // ── input ─────────────────────────────────────────────────

    /// User scroll by `rows` (positive = down).  Cancels any auto-scroll.
    pub fn scroll_by(&mut self, rows: f64, now: Instant) {
        self.scroll_to(self.offset + rows, now);
    }

    /// User scroll to an absolute row offset.
    pub fn scroll_to(&mut self, offset: f64, now: Instant) {
        if self.auto_target.take().is_some() {
            tracing::debug!("auto-scroll interrupted by user input");
        }
        self.offset = offset;
        self.clamp_offset();
        self.last_user_input = Some(now);
        self.snap_armed = true;
    }

    /// Programmatic scroll toward `progress`.  Smooth unless motion is
    /// reduced; never counts as user input.
    pub fn auto_scroll_to(&mut self, progress: f64) {
        let target = progress.clamp(0.0, 1.0) * self.scrollable_rows();
        self.snap_armed = false;
        if self.motion.is_reduced() {
            self.offset = target;
            self.auto_target = None;
        } else {
            self.auto_target = Some(target);
        }
    }

    /// Jump to just inside the start of `scenes[index]`.
    pub fn jump_to_scene(&mut self, scenes: &[Scene], index: usize) {
        let Some(scene) = scenes.get(index) else {
            return;
        };
        let target = scene.range.start + JUMP_INSET;
        tracing::debug!(scene = %scene.id, target, "jump to scene");
        self.auto_scroll_to(target);
    }

    /// Place the reader at `progress` immediately and settle the smoothing.
    pub fn place_at(&mut self, progress: f64) {
        self.offset = progress.clamp(0.0, 1.0) * self.scrollable_rows();
        self.smoothed = self.raw_progress();
        self.auto_target = None;
        self.snap_armed = false;
    }

    // ── sampling ──────────────────────────────────────────────

    /// Advance one frame: move any auto-scroll, consider a boundary snap,
    /// then low-pass the progress toward the raw ratio.
    pub fn tick(&mut self, scenes: &[Scene], now: Instant) {
        if let Some(target) = self.auto_target {
            let remaining = target - self.offset;
            if remaining.abs() <= AUTO_SCROLL_ARRIVE {
                self.offset = target;
                self.auto_target = None;
            } else {
                self.offset += remaining * AUTO_SCROLL_RATE;
            }
            self.clamp_offset();
        } else {
            self.maybe_snap(scenes, now);
        }

        let raw = self.raw_progress();
        self.smoothed += (raw - self.smoothed) * self.smoothing();
        if (raw - self.smoothed).abs() < SETTLE_EPSILON {
            self.smoothed = raw;
        }
    }

    fn maybe_snap(&mut self, scenes: &[Scene], now: Instant) {
        if !self.snap_armed {
            return;
        }
        let Some(last) = self.last_user_input else {
            return;
        };
        if now.saturating_duration_since(last) < SNAP_IDLE {
            return;
        }
        self.snap_armed = false;
        if self.offset >= self.scrollable_rows() {
            return;
        }
        let Some(target) = snap_target(self.raw_progress(), scenes) else {
            return;
        };
        let target_rows = target * self.scrollable_rows();
        if (target_rows - self.offset).abs() < 1.0 {
            return;
        }
        tracing::debug!(target, "snapping to scene edge");
        self.auto_scroll_to(target);
    }
}

/// Where a resting reader near a scene edge should be nudged to, if
/// anywhere: just inside the start or end of the scene `raw` resolves to,
/// whichever side of its midpoint `raw` is on.
pub fn snap_target(raw: f64, scenes: &[Scene]) -> Option<f64> {
    let scene = scenes.get(resolve_scene(raw, scenes).index)?;
    let range = scene.range;
    let near_start = (raw - range.start).abs() < SNAP_EPSILON;
    let near_end = (raw - range.end).abs() < SNAP_EPSILON;
    if !near_start && !near_end {
        return None;
    }
    Some(if raw < range.midpoint() {
        range.start + SNAP_INSET
    } else {
        range.end - SNAP_INSET
    })
}
