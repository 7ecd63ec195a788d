//! Camera blending across scene boundaries.
//!
//! Each scene authors a resting pose.  Mid-scene the camera holds that pose
//! exactly; only the first and last [`BLEND_WINDOW`] of a scene's intra
//! progress blend toward the neighbouring scene.  Position, look-at and
//! field of view share one eased parameter so they move together.

use super::catalog::{CameraPose, Scene};
use super::easing::{ease_in_out_quad, lerp};
use super::resolver::resolve_scene;

/// Fraction of intra-scene progress blended at each end of a scene.
pub const BLEND_WINDOW: f64 = 0.15;

/// Blended camera pose for `progress`.
pub fn interpolate_camera(progress: f64, scenes: &[Scene]) -> CameraPose {
    let Some(last) = scenes.len().checked_sub(1) else {
        return CameraPose::default();
    };
    let resolved = resolve_scene(progress, scenes);
    let index = resolved.index;
    let p = resolved.intra;
    let current = &scenes[index].camera;

    if p < BLEND_WINDOW && index > 0 {
        let prev = &scenes[index - 1].camera;
        // Halfway through the incoming window sits exactly on the boundary
        // blend of the outgoing one, so both sides meet at the midpoint pose.
        let t = 0.5 + 0.5 * ease_in_out_quad(p / BLEND_WINDOW);
        blend(prev, current, t)
    } else if p > 1.0 - BLEND_WINDOW && index < last {
        let next = &scenes[index + 1].camera;
        let t = 0.5 * ease_in_out_quad((p - (1.0 - BLEND_WINDOW)) / BLEND_WINDOW);
        blend(current, next, t)
    } else {
        *current
    }
}

fn blend(from: &CameraPose, to: &CameraPose, t: f64) -> CameraPose {
    CameraPose {
        pos: from.pos.lerp(to.pos, t),
        look_at: from.look_at.lerp(to.look_at, t),
        fov: lerp(from.fov, to.fov, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::tests::scene;

    fn posed() -> Vec<Scene> {
        let mut a = scene("a", 0.0, 0.3);
        let mut b = scene("b", 0.3, 0.6);
        let mut c = scene("c", 0.6, 1.0);
        a.camera = CameraPose::new([0.0, 0.0, 5.0], [0.0, 0.0, 0.0]);
        b.camera = CameraPose::new([4.0, 2.0, 8.0], [1.0, 0.0, 0.0]).with_fov(70.0);
        c.camera = CameraPose::new([-3.0, 1.0, 3.0], [0.0, 1.0, 0.0]).with_fov(35.0);
        vec![a, b, c]
    }

    fn distance(a: &CameraPose, b: &CameraPose) -> f64 {
        let d = (a.pos - b.pos)
            .abs()
            .max((a.look_at - b.look_at).abs())
            .max_element();
        d.max((a.fov - b.fov).abs())
    }

    #[test]
    fn mid_scene_holds_authored_pose() {
        let scenes = posed();
        for p in [0.0, 0.05, 0.1, 0.2, 0.3 + 0.3 * 0.15, 0.45, 0.6 + 0.4 * 0.5] {
            let resolved = resolve_scene(p, &scenes);
            if resolved.intra >= BLEND_WINDOW && resolved.intra <= 1.0 - BLEND_WINDOW {
                assert_eq!(interpolate_camera(p, &scenes), scenes[resolved.index].camera);
            }
        }
        // First scene has no predecessor, so its opening window is unblended.
        assert_eq!(interpolate_camera(0.0, &scenes), scenes[0].camera);
    }

    #[test]
    fn boundaries_do_not_pop() {
        let scenes = posed();
        for boundary in [0.3, 0.6] {
            let before = interpolate_camera(boundary - 1e-4, &scenes);
            let after = interpolate_camera(boundary + 1e-4, &scenes);
            assert!(
                distance(&before, &after) < 0.05,
                "pop at {boundary}: {before:?} vs {after:?}"
            );
        }
    }

    #[test]
    fn last_scene_end_is_unblended() {
        let scenes = posed();
        assert_eq!(interpolate_camera(1.0, &scenes), scenes[2].camera);
    }

    #[test]
    fn all_channels_share_one_parameter() {
        let scenes = posed();
        // Inside a's outgoing window: every channel is at the same fraction.
        let p = 0.3 * 0.95;
        let cam = interpolate_camera(p, &scenes);
        let (a, b) = (scenes[0].camera, scenes[1].camera);
        let t_pos = (cam.pos.x - a.pos.x) / (b.pos.x - a.pos.x);
        let t_fov = (cam.fov - a.fov) / (b.fov - a.fov);
        let t_look = (cam.look_at.x - a.look_at.x) / (b.look_at.x - a.look_at.x);
        assert!((t_pos - t_fov).abs() < 1e-9);
        assert!((t_pos - t_look).abs() < 1e-9);
        assert!(t_pos > 0.0 && t_pos < 0.5);
    }
}
