//! Per-element timing: discrete reveals for list items and continuous
//! entry/hold/exit curves for visuals and the stat-card container.
//!
//! Everything here is a pure function of progress plus element metadata.
//! The one piece of state, [`RevealLatch`], only remembers how far into the
//! current scene the reader has been so reveals never take themselves back.

use super::catalog::{Scene, Vec3, Visual};
use super::easing::{clamp01, ease_in_cubic, ease_out_cubic};

// ───────────────────────────────────────── motion ────────────

/// Accessibility preference: `Reduced` collapses every animation to its
/// resting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    #[default]
    Full,
    Reduced,
}

impl Motion {
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            Motion::Reduced
        } else {
            Motion::Full
        }
    }

    pub fn is_reduced(self) -> bool {
        self == Motion::Reduced
    }
}

// ───────────────────────────────────────── reveals ───────────

/// How a list spreads its reveals over intra-scene progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealWindow {
    /// Share of the scene the list's reveals are compressed into.
    pub span: f64,
    /// Bias of each slot within the uniform split (0.5 = slot centre).
    pub lead: f64,
}

/// Narration: every line is out by 55% of the scene.
pub const NARRATION_WINDOW: RevealWindow = RevealWindow {
    span: 0.55,
    lead: 0.5,
};

/// Stat cards: spread over the central band, all out before the midpoint.
pub const STAT_CARD_WINDOW: RevealWindow = RevealWindow {
    span: 0.75,
    lead: 0.6,
};

/// Intra progress over which a freshly revealed element fades in.
pub const REVEAL_FADE: f64 = 0.06;

/// Rows a revealed element rises from.
pub const ENTRY_RISE: f64 = 2.0;

/// Intra-scene progress at which element `index` of `len` appears.
pub fn reveal_threshold(index: usize, len: usize, window: RevealWindow) -> f64 {
    let slot = window.span / (len as f64 + 1.0);
    (index as f64 + window.lead) * slot
}

/// Render-ready state of one list element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementState {
    pub visible: bool,
    pub opacity: f64,
    /// Rows below the resting position (0 once settled).
    pub offset: f64,
}

impl ElementState {
    pub const HIDDEN: Self = Self {
        visible: false,
        opacity: 0.0,
        offset: ENTRY_RISE,
    };
}

/// State of element `index` in a list of `len` at intra progress `intra`.
///
/// Pass the latched progress from [`RevealLatch`] to keep reveals
/// monotonic while scrolling back within a scene.
pub fn element_state(
    intra: f64,
    index: usize,
    len: usize,
    window: RevealWindow,
    motion: Motion,
) -> ElementState {
    if index >= len {
        return ElementState::HIDDEN;
    }
    let threshold = reveal_threshold(index, len, window);
    if intra < threshold {
        return ElementState::HIDDEN;
    }
    if motion.is_reduced() {
        return ElementState {
            visible: true,
            opacity: 1.0,
            offset: 0.0,
        };
    }
    let eased = ease_out_cubic((intra - threshold) / REVEAL_FADE);
    ElementState {
        visible: true,
        opacity: eased,
        offset: (1.0 - eased) * ENTRY_RISE,
    }
}

/// High-water mark of intra progress for the current scene.
///
/// Scrolling back inside a scene keeps already-revealed lines on screen;
/// entering a different scene starts over.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RevealLatch {
    scene: Option<usize>,
    peak: f64,
}

impl RevealLatch {
    /// Record `intra` for `scene` and return the latched progress.
    pub fn observe(&mut self, scene: usize, intra: f64) -> f64 {
        if self.scene != Some(scene) {
            self.scene = Some(scene);
            self.peak = intra;
        } else if intra > self.peak {
            self.peak = intra;
        }
        self.peak
    }
}

// ───────────────────────────────────────── lifecycle ─────────

/// World units a visual sits below its rest position before entering.
pub const ENTRY_DROP: f64 = -8.0;
/// World units a visual rises above its rest position when leaving.
pub const EXIT_RISE: f64 = 8.0;

/// Entry/hold/exit values for one element over its own visible lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifecycle {
    pub opacity: f64,
    /// Vertical displacement in world units (negative = below rest).
    pub offset: f64,
}

/// Fade and rise in over the first 20%, hold, fade and rise out over the
/// last 20%.
pub fn lifecycle(p: f64, motion: Motion) -> Lifecycle {
    let entry = ease_out_cubic((p / 0.2).min(1.0));
    let exit = ease_in_cubic(((p - 0.8) / 0.2).max(0.0));
    if motion.is_reduced() {
        // Instant fades: fully present until the lifetime is over.
        let present = p < 1.0;
        return Lifecycle {
            opacity: if present { 1.0 } else { 0.0 },
            offset: 0.0,
        };
    }
    Lifecycle {
        opacity: entry.min(1.0 - exit),
        offset: (1.0 - entry) * ENTRY_DROP + exit * EXIT_RISE,
    }
}

// ───────────────────────────────────────── brightness ────────

/// Two-level focus cue for visuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Visual of the active scene.
    Focused,
    /// A neighbouring visual that is still on screen.
    Ambient,
}

pub const EMISSIVE_FLOOR: f64 = 0.05;

impl Focus {
    /// Peak emissive intensity.  A step, not a gradient.
    pub fn peak(self) -> f64 {
        match self {
            Focus::Focused => 0.35,
            Focus::Ambient => 0.2,
        }
    }
}

/// Emissive brightness ramping from the floor to the focus peak between
/// 10% and 30% of the visual's scene.
pub fn emissive(p: f64, focus: Focus) -> f64 {
    let ramp = clamp01((p - 0.1) / 0.2);
    EMISSIVE_FLOOR + ramp * (focus.peak() - EMISSIVE_FLOOR)
}

// ───────────────────────────────────────── visuals ───────────

/// Lead-in before a scene's start during which its visual is mounted.
pub const VISUAL_LEAD: f64 = 0.02;
/// Tail after a scene's end during which its visual stays mounted.
pub const VISUAL_TAIL: f64 = 0.05;

/// Global progress range `[start, end]` in which scene `index`'s visual is
/// mounted.  The first visual is mounted from 0.
pub fn visual_window(index: usize, scene: &Scene) -> (f64, f64) {
    let start = if index == 0 {
        0.0
    } else {
        scene.range.start - VISUAL_LEAD
    };
    (start, scene.range.end + VISUAL_TAIL)
}

pub fn visual_mounted(progress: f64, index: usize, scene: &Scene) -> bool {
    let (start, end) = visual_window(index, scene);
    progress >= start && progress <= end
}

/// Oscillating rotation of a visual at `elapsed` seconds.
pub fn oscillation(visual: &Visual, elapsed: f64, motion: Motion) -> Vec3 {
    let base = visual.rotation;
    if motion.is_reduced() {
        return base;
    }
    let amp = visual.rotation_amplitude;
    let phase = Vec3::new(
        (elapsed * 0.3).sin(),
        (elapsed * 0.5).sin(),
        (elapsed * 0.4).sin(),
    );
    base + phase * amp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::tests::scene;

    #[test]
    fn thresholds_increase_with_index() {
        for window in [NARRATION_WINDOW, STAT_CARD_WINDOW] {
            for len in 1..8 {
                for i in 0..len - 1 {
                    assert!(
                        reveal_threshold(i, len, window) < reveal_threshold(i + 1, len, window)
                    );
                }
                let last = reveal_threshold(len - 1, len, window);
                assert!(last < window.span, "last reveal outside window");
                assert!(reveal_threshold(0, len, window) > 0.0);
            }
        }
    }

    #[test]
    fn narration_thresholds_match_layout() {
        // Three lines: slot = 0.55 / 4.
        let slot = 0.55 / 4.0;
        assert!((reveal_threshold(0, 3, NARRATION_WINDOW) - 0.5 * slot).abs() < 1e-12);
        assert!((reveal_threshold(2, 3, NARRATION_WINDOW) - 2.5 * slot).abs() < 1e-12);
    }

    #[test]
    fn stat_cards_are_out_before_midpoint() {
        for len in 1..=3 {
            assert!(reveal_threshold(len - 1, len, STAT_CARD_WINDOW) < 0.5);
        }
    }

    #[test]
    fn element_fades_in_after_threshold() {
        let t = reveal_threshold(1, 3, NARRATION_WINDOW);
        let before = element_state(t - 1e-6, 1, 3, NARRATION_WINDOW, Motion::Full);
        assert!(!before.visible);
        let at = element_state(t, 1, 3, NARRATION_WINDOW, Motion::Full);
        assert!(at.visible);
        assert_eq!(at.opacity, 0.0);
        assert_eq!(at.offset, ENTRY_RISE);
        let settled = element_state(t + REVEAL_FADE, 1, 3, NARRATION_WINDOW, Motion::Full);
        assert!((settled.opacity - 1.0).abs() < 1e-9);
        assert!(settled.offset.abs() < 1e-9);
    }

    #[test]
    fn reduced_motion_reveals_instantly() {
        let t = reveal_threshold(0, 2, STAT_CARD_WINDOW);
        let state = element_state(t, 0, 2, STAT_CARD_WINDOW, Motion::Reduced);
        assert_eq!(state.opacity, 1.0);
        assert_eq!(state.offset, 0.0);
    }

    #[test]
    fn out_of_range_index_is_hidden() {
        assert_eq!(
            element_state(1.0, 5, 2, NARRATION_WINDOW, Motion::Full),
            ElementState::HIDDEN
        );
    }

    #[test]
    fn latch_never_unreveals_within_a_scene() {
        let mut latch = RevealLatch::default();
        assert_eq!(latch.observe(2, 0.4), 0.4);
        assert_eq!(latch.observe(2, 0.1), 0.4);
        assert_eq!(latch.observe(2, 0.6), 0.6);
        // New scene resets.
        assert_eq!(latch.observe(3, 0.05), 0.05);
        // Returning to the earlier scene starts over too.
        assert_eq!(latch.observe(2, 0.9), 0.9);
        assert_eq!(latch.observe(2, 0.2), 0.9);
    }

    #[test]
    fn lifecycle_three_phases() {
        let at = |p| lifecycle(p, Motion::Full);
        assert_eq!(at(0.0).opacity, 0.0);
        assert!((at(0.2).opacity - 1.0).abs() < 1e-12);
        assert!((at(0.5).opacity - 1.0).abs() < 1e-12);
        assert!((at(0.8).opacity - 1.0).abs() < 1e-12);
        assert!(at(1.0).opacity.abs() < 1e-12);

        assert_eq!(at(0.0).offset, ENTRY_DROP);
        assert_eq!(at(0.5).offset, 0.0);
        assert!((at(1.0).offset - EXIT_RISE).abs() < 1e-12);
    }

    #[test]
    fn lifecycle_reduced_motion_is_static() {
        let l = lifecycle(0.05, Motion::Reduced);
        assert_eq!(l.opacity, 1.0);
        assert_eq!(l.offset, 0.0);
    }

    #[test]
    fn emissive_is_a_two_level_step() {
        assert_eq!(emissive(0.0, Focus::Focused), EMISSIVE_FLOOR);
        assert_eq!(emissive(0.0, Focus::Ambient), EMISSIVE_FLOOR);
        assert!((emissive(0.5, Focus::Focused) - 0.35).abs() < 1e-12);
        assert!((emissive(0.5, Focus::Ambient) - 0.2).abs() < 1e-12);
        let mid = emissive(0.2, Focus::Focused);
        assert!(mid > EMISSIVE_FLOOR && mid < 0.35);
    }

    #[test]
    fn visual_window_overlaps_neighbours() {
        let s0 = scene("a", 0.0, 0.3);
        let s1 = scene("b", 0.3, 0.6);
        assert_eq!(visual_window(0, &s0).0, 0.0);
        assert!((visual_window(1, &s1).0 - 0.28).abs() < 1e-12);
        assert!(visual_mounted(0.33, 0, &s0));
        assert!(visual_mounted(0.29, 1, &s1));
        assert!(!visual_mounted(0.36, 0, &s0));
    }

    #[test]
    fn oscillation_is_static_under_reduced_motion() {
        let visual = Visual::new("v").rotation([1.0, 2.0, 3.0]);
        let rest = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(oscillation(&visual, 12.5, Motion::Reduced), rest);
        let moving = oscillation(&visual, 3.0, Motion::Full);
        assert_ne!(moving, rest);
        // Default amplitude leaves z alone.
        assert_eq!(moving.z, rest.z);
    }
}
