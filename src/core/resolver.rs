//! Scroll-to-scene resolution.

use super::catalog::Scene;
use super::easing::clamp01;

/// The active scene for a progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub index: usize,
    /// Progress renormalised to `[0, 1]` within the active scene.
    pub intra: f64,
}

/// Find the last scene whose start is `<= progress`.
///
/// Scanning from the end makes a progress value sitting exactly on a
/// boundary belong to the later scene.  Anything before the first start
/// (including NaN) falls back to the first scene.
///
/// `scenes` must be non-empty; a validated [`Catalog`](super::catalog::Catalog)
/// guarantees that.  An empty slice resolves to index 0 with zero progress.
pub fn resolve_scene(progress: f64, scenes: &[Scene]) -> Resolved {
    let index = scenes
        .iter()
        .rposition(|scene| progress >= scene.range.start)
        .unwrap_or(0);
    let intra = scenes
        .get(index)
        .map_or(0.0, |scene| intra_progress(progress, scene));
    Resolved { index, intra }
}

/// Progress within `scene`, clamped to `[0, 1]`.
///
/// A zero-length range yields 0 or 1 rather than NaN.
pub fn intra_progress(progress: f64, scene: &Scene) -> f64 {
    let duration = scene.range.duration();
    if duration <= 0.0 {
        return if progress >= scene.range.start { 1.0 } else { 0.0 };
    }
    clamp01((progress - scene.range.start) / duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::tests::scene;

    fn three() -> Vec<Scene> {
        vec![scene("a", 0.0, 0.2), scene("b", 0.2, 0.5), scene("c", 0.5, 0.9)]
    }

    #[test]
    fn boundary_belongs_to_later_scene() {
        let scenes = three();
        let r = resolve_scene(0.2, &scenes);
        assert_eq!(r.index, 1);
        assert_eq!(r.intra, 0.0);
    }

    #[test]
    fn intra_progress_is_normalised() {
        let scenes = three();
        let r = resolve_scene(0.35, &scenes);
        assert_eq!(r.index, 1);
        assert!((r.intra - 0.5).abs() < 1e-12);
    }

    #[test]
    fn trailing_buffer_clamps_to_last_scene() {
        let scenes = three();
        for p in [0.9, 0.95, 1.0] {
            let r = resolve_scene(p, &scenes);
            assert_eq!(r.index, 2);
            assert_eq!(r.intra, 1.0);
        }
    }

    #[test]
    fn below_first_start_falls_back_to_first() {
        let scenes = three();
        assert_eq!(resolve_scene(-0.5, &scenes).index, 0);
        assert_eq!(resolve_scene(f64::NAN, &scenes).index, 0);
    }

    #[test]
    fn degenerate_range_never_produces_nan() {
        let s = scene("z", 0.3, 0.3);
        assert_eq!(intra_progress(0.2, &s), 0.0);
        assert_eq!(intra_progress(0.3, &s), 1.0);
        assert!(!intra_progress(0.31, &s).is_nan());
    }

    #[test]
    fn every_progress_resolves_to_a_containing_scene() {
        let scenes = three();
        for i in 0..=1000 {
            let p = i as f64 / 1000.0;
            let r = resolve_scene(p, &scenes);
            let range = scenes[r.index].range;
            if p < scenes[2].range.end {
                assert!(range.contains(p), "{p} not inside scene {}", r.index);
            } else {
                assert_eq!(r.index, 2);
            }
            assert!((0.0..=1.0).contains(&r.intra));
        }
    }
}
