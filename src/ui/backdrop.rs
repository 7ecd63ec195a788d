//! 3D backdrop: mounted visuals and a starfield projected through the
//! current camera onto a braille canvas.

use glam::{DMat3, EulerRot};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Widget,
    },
};

use crate::app::asset_runtime::MeshCache;
use crate::core::animation::{
    emissive, lifecycle, oscillation, visual_mounted, Focus, Motion,
};
use crate::core::catalog::{CameraPose, Scene, Vec3};
use crate::core::easing::clamp01;

use super::shapes::fallback_primitive;
use super::theme::{Theme, BONE, EMBER, VOID};

/// Mesh points drawn per visual.
const MAX_MESH_POINTS: usize = 2400;
/// Fog starts and ends at these camera distances.
const FOG_NEAR: f64 = 8.0;
const FOG_FAR: f64 = 30.0;
/// Light falling on a visual before its own glow.
const BASE_LIGHT: f64 = 0.6;
/// Distinct shades per frame; points are bucketed to keep draws few.
const SHADES: usize = 8;
const STAR_COUNT: usize = 900;
const STAR_RADIUS: f64 = 100.0;
const STAR_DEPTH: f64 = 50.0;

// ───────────────────────────────────────── camera ────────────

/// Perspective projection for one camera pose.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pos: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    /// tan(fov / 2).
    half_height: f64,
    /// Width / height of the drawing surface.
    aspect: f64,
}

impl Projection {
    pub fn new(camera: &CameraPose, aspect: f64) -> Self {
        let forward = (camera.look_at - camera.pos)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        Self {
            pos: camera.pos,
            forward,
            right,
            up,
            half_height: (camera.fov.to_radians() / 2.0).tan(),
            aspect: if aspect > 0.0 { aspect } else { 1.0 },
        }
    }

    /// Normalised screen position in `[-1, 1]²` plus depth, or `None`
    /// when the point is behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<(f64, f64, f64)> {
        let d = p - self.pos;
        let z = d.dot(self.forward);
        if z < 0.1 {
            return None;
        }
        let x = d.dot(self.right) / (z * self.half_height * self.aspect);
        let y = d.dot(self.up) / (z * self.half_height);
        Some((x, y, z))
    }
}

// ───────────────────────────────────────── widget ────────────

pub struct Backdrop<'a> {
    pub scenes: &'a [Scene],
    pub meshes: &'a MeshCache,
    pub camera: CameraPose,
    pub progress: f64,
    pub active: usize,
    pub elapsed: f64,
    pub motion: Motion,
    pub stars: bool,
}

/// Points grouped by shade.
struct Layers {
    buckets: Vec<Vec<(f64, f64)>>,
}

impl Layers {
    fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); SHADES],
        }
    }

    fn push(&mut self, x: f64, y: f64, shade: f64) {
        if !(-1.0..=1.0).contains(&x) || !(-1.0..=1.0).contains(&y) {
            return;
        }
        let level = (clamp01(shade) * SHADES as f64).round() as usize;
        if level == 0 {
            return;
        }
        self.buckets[level.min(SHADES) - 1].push((x, y));
    }
}

impl Backdrop<'_> {
    fn draw_stars(&self, projection: &Projection, layers: &mut Layers) {
        // Spin slowly unless motion is reduced.
        let spin = if self.motion.is_reduced() {
            0.0
        } else {
            self.elapsed * 0.01
        };
        let (sin, cos) = spin.sin_cos();
        let mut seed = 0x2545_f491_u64;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 11) as f64) / ((1u64 << 53) as f64)
        };
        for _ in 0..STAR_COUNT {
            let y = next() * 2.0 - 1.0;
            let a = next() * std::f64::consts::TAU;
            let r = STAR_RADIUS + next() * STAR_DEPTH;
            let brightness = 0.15 + next() * 0.35;
            let flat = (1.0 - y * y).sqrt();
            let (sx, sz) = (flat * a.cos(), flat * a.sin());
            let p = r * Vec3::new(sx * cos - sz * sin, y, sx * sin + sz * cos);
            if let Some((x, y, _)) = projection.project(p) {
                layers.push(x, y, brightness);
            }
        }
    }

    fn draw_visual(&self, index: usize, scene: &Scene, projection: &Projection, layers: &mut Layers) {
        let visual = &scene.visual;
        let (points, scale): (Vec<Vec3>, f64) = match &visual.model {
            Some(model) => match self.meshes.get(model) {
                Some(mesh) => (
                    mesh.sample_points(MAX_MESH_POINTS)
                        .map(|p| p.as_dvec3())
                        .collect(),
                    visual.scale,
                ),
                // Loading or failed: nothing in its place.
                None => return,
            },
            None => (fallback_primitive(index).points(), 1.0),
        };
        if points.is_empty() {
            return;
        }

        let p = clamp01((self.progress - scene.range.start) / scene.range.duration());
        let life = lifecycle(p, self.motion);
        if life.opacity <= 0.0 {
            return;
        }
        let focus = if index == self.active {
            Focus::Focused
        } else {
            Focus::Ambient
        };
        let shade = life.opacity * (BASE_LIGHT + emissive(p, focus));
        let rotation = orientation(oscillation(visual, self.elapsed, self.motion));
        let lift = Vec3::new(0.0, life.offset, 0.0);

        for point in points {
            let world = rotation * (point * scale) + lift;
            if let Some((x, y, z)) = projection.project(world) {
                let fog = clamp01((z - FOG_NEAR) / (FOG_FAR - FOG_NEAR));
                layers.push(x, y, shade * (1.0 - fog));
            }
        }
    }
}

impl Widget for Backdrop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        // Braille cells are 2×4 dots, roughly square on screen.
        let aspect = f64::from(area.width) / (2.0 * f64::from(area.height));
        let projection = Projection::new(&self.camera, aspect);

        let mut stars = Layers::new();
        if self.stars {
            self.draw_stars(&projection, &mut stars);
        }
        let mut visuals = Layers::new();
        for (index, scene) in self.scenes.iter().enumerate() {
            if visual_mounted(self.progress, index, scene) {
                self.draw_visual(index, scene, &projection, &mut visuals);
            }
        }

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(Theme::rgb(VOID))
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .paint(|ctx| {
                for (level, coords) in stars.buckets.iter().enumerate() {
                    if !coords.is_empty() {
                        ctx.draw(&Points {
                            coords,
                            color: shade_color(BONE, level),
                        });
                    }
                }
                ctx.layer();
                for (level, coords) in visuals.buckets.iter().enumerate() {
                    if !coords.is_empty() {
                        ctx.draw(&Points {
                            coords,
                            color: shade_color(EMBER, level),
                        });
                    }
                }
            })
            .render(area, buf);
    }
}

fn shade_color(rgb: (u8, u8, u8), level: usize) -> Color {
    Theme::fade(rgb, (level + 1) as f64 / SHADES as f64)
}

// ───────────────────────────────────────── vectors ───────────

/// Intrinsic XYZ Euler angles as a matrix: z applies first, then y, then x.
fn orientation(r: Vec3) -> DMat3 {
    DMat3::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use tokio::sync::mpsc;

    #[test]
    fn origin_projects_to_centre() {
        let proj = Projection::new(&CameraPose::default(), 1.0);
        let (x, y, z) = proj.project(Vec3::ZERO).unwrap();
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);
        assert!((z - 5.0).abs() < 1e-12);
        assert!(proj.project(Vec3::new(0.0, 0.0, 6.0)).is_none());
    }

    #[test]
    fn up_is_up_and_right_is_right() {
        let proj = Projection::new(&CameraPose::default(), 1.0);
        let (_, y, _) = proj.project(Vec3::Y).unwrap();
        let (x, _, _) = proj.project(Vec3::X).unwrap();
        assert!(y > 0.0);
        assert!(x > 0.0);
    }

    #[test]
    fn quarter_turn_about_z() {
        let p = orientation(Vec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2)) * Vec3::X;
        assert!(p.abs_diff_eq(Vec3::Y, 1e-12));
    }

    #[test]
    fn z_turn_applies_before_x_turn() {
        use std::f64::consts::FRAC_PI_2;
        // x-axis turned a quarter about z lands on y, then a quarter about x lifts it to z.
        let p = orientation(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2)) * Vec3::X;
        assert!(p.abs_diff_eq(Vec3::Z, 1e-12));
    }

    fn lit_cells(buf: &Buffer) -> usize {
        buf.content().iter().filter(|c| c.symbol() != " ").count()
    }

    #[test]
    fn unloaded_mesh_draws_nothing_but_fallbacks_do() {
        let catalog = Catalog::builtin().unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let meshes = MeshCache::new("does-not-exist".into(), tx);
        let area = Rect::new(0, 0, 60, 20);
        let render = |progress: f64, active: usize| {
            let mut buf = Buffer::empty(area);
            Backdrop {
                scenes: catalog.scenes(),
                meshes: &meshes,
                camera: CameraPose::default(),
                progress,
                active,
                elapsed: 0.0,
                motion: Motion::Reduced,
                stars: false,
            }
            .render(area, &mut buf);
            lit_cells(&buf)
        };
        // SC_00 has a model that was never loaded.
        assert_eq!(render(0.05, 0), 0);
        // SC_03 has no model and falls back to an open torus.
        assert!(render(0.33, 3) > 0);
    }
}
