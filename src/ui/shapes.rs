//! Point clouds for the stand-in shapes shown when a scene has no model.

use std::f64::consts::{PI, TAU};

use crate::core::catalog::Vec3;

/// Stand-in shape for a visual without a mesh, chosen by scene index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Thin box: width, height, depth.
    Card(f64, f64, f64),
    /// Top radius, bottom radius, height.
    Cylinder(f64, f64, f64),
    /// Base radius, height, radial segments.
    Cone(f64, f64, usize),
    /// Ring radius, tube radius, arc in radians.
    Torus(f64, f64, f64),
    Icosahedron(f64),
    /// (2,3) knot: radius, tube radius.
    TorusKnot(f64, f64),
    Sphere(f64),
    Empty,
}

pub fn fallback_primitive(scene_index: usize) -> Primitive {
    match scene_index {
        0 => Primitive::Card(1.2, 1.6, 0.1),
        1 => Primitive::Cylinder(0.8, 0.6, 1.5),
        2 => Primitive::Cone(1.5, 1.0, 8),
        3 => Primitive::Torus(0.8, 0.2, PI * 1.9),
        4 => Primitive::Icosahedron(1.0),
        5 => Primitive::TorusKnot(0.6, 0.2),
        6 => Primitive::Sphere(1.0),
        7 => Primitive::Empty,
        8 => Primitive::Sphere(1.2),
        9 => Primitive::Card(1.0, 1.4, 0.1),
        _ => Primitive::Card(1.0, 1.0, 1.0),
    }
}

impl Primitive {
    /// Points on the shape's surface or edges, centred on the origin.
    pub fn points(self) -> Vec<Vec3> {
        match self {
            Primitive::Card(w, h, d) => box_edges(w, h, d),
            Primitive::Cylinder(top, bottom, h) => {
                let mut pts = Vec::new();
                for ring in 0..=6 {
                    let t = f64::from(ring) / 6.0;
                    let r = bottom + (top - bottom) * t;
                    pts.extend(circle(r, -h / 2.0 + h * t, 48));
                }
                for seg in 0..16 {
                    let a = TAU * f64::from(seg) / 16.0;
                    pts.extend(segment(
                        Vec3::new(bottom * a.cos(), -h / 2.0, bottom * a.sin()),
                        Vec3::new(top * a.cos(), h / 2.0, top * a.sin()),
                        12,
                    ));
                }
                pts
            }
            Primitive::Cone(r, h, segments) => {
                let apex = Vec3::new(0.0, h / 2.0, 0.0);
                let mut pts = circle(r, -h / 2.0, 64);
                for seg in 0..segments {
                    let a = TAU * seg as f64 / segments as f64;
                    pts.extend(segment(Vec3::new(r * a.cos(), -h / 2.0, r * a.sin()), apex, 16));
                }
                pts
            }
            Primitive::Torus(ring, tube, arc) => {
                let mut pts = Vec::new();
                for i in 0..=48 {
                    let u = arc * f64::from(i) / 48.0;
                    for j in 0..12 {
                        let v = TAU * f64::from(j) / 12.0;
                        let r = ring + tube * v.cos();
                        pts.push(Vec3::new(r * u.cos(), r * u.sin(), tube * v.sin()));
                    }
                }
                pts
            }
            Primitive::Icosahedron(radius) => icosahedron_edges(radius),
            Primitive::TorusKnot(radius, tube) => {
                let knot = |t: f64| -> Vec3 {
                    let r = radius * (2.0 + (3.0 * t).cos()) / 2.0;
                    Vec3::new(
                        r * (2.0 * t).cos(),
                        r * (2.0 * t).sin(),
                        radius * (3.0 * t).sin() / 2.0,
                    )
                };
                let mut pts = Vec::new();
                for i in 0..192 {
                    let t = TAU * f64::from(i) / 192.0;
                    let c = knot(t);
                    // Crude tube: a small ring around each centre point.
                    for j in 0..6 {
                        let v = TAU * f64::from(j) / 6.0;
                        let offset = Vec3::new(
                            v.cos() * (2.0 * t).cos(),
                            v.cos() * (2.0 * t).sin(),
                            v.sin(),
                        );
                        pts.push(c + tube * offset);
                    }
                }
                pts
            }
            Primitive::Sphere(radius) => fibonacci_sphere(radius, 600),
            Primitive::Empty => Vec::new(),
        }
    }
}

fn segment(a: Vec3, b: Vec3, steps: usize) -> Vec<Vec3> {
    (0..=steps)
        .map(|i| {
            a.lerp(b, i as f64 / steps as f64)
        })
        .collect()
}

/// Horizontal circle at height `y`.
fn circle(r: f64, y: f64, steps: usize) -> Vec<Vec3> {
    (0..steps)
        .map(|i| {
            let a = TAU * i as f64 / steps as f64;
            Vec3::new(r * a.cos(), y, r * a.sin())
        })
        .collect()
}

fn box_edges(w: f64, h: f64, d: f64) -> Vec<Vec3> {
    let (x, y, z) = (w / 2.0, h / 2.0, d / 2.0);
    let corners = [
        Vec3::new(-x, -y, -z),
        Vec3::new(x, -y, -z),
        Vec3::new(x, y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(-x, -y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, z),
        Vec3::new(-x, y, z),
    ];
    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    EDGES
        .iter()
        .flat_map(|&(a, b)| segment(corners[a], corners[b], 24))
        .collect()
}

fn icosahedron_edges(radius: f64) -> Vec<Vec3> {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    let mut verts = Vec::with_capacity(12);
    for &a in &[-1.0, 1.0] {
        for &b in &[-phi, phi] {
            verts.push(Vec3::new(0.0, a, b));
            verts.push(Vec3::new(a, b, 0.0));
            verts.push(Vec3::new(b, 0.0, a));
        }
    }
    let norm = (1.0 + phi * phi).sqrt();
    let verts: Vec<Vec3> = verts.into_iter().map(|v| v / norm * radius).collect();
    // Neighbouring vertices sit exactly one edge length apart.
    let edge = 2.0 / norm * radius;
    let mut pts = Vec::new();
    for i in 0..verts.len() {
        for j in i + 1..verts.len() {
            if (verts[i].distance(verts[j]) - edge).abs() < 1e-6 {
                pts.extend(segment(verts[i], verts[j], 16));
            }
        }
    }
    pts
}

fn fibonacci_sphere(radius: f64, count: usize) -> Vec<Vec3> {
    let golden = PI * (3.0 - 5f64.sqrt());
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
            let r = (1.0 - y * y).sqrt();
            let a = golden * i as f64;
            radius * Vec3::new(r * a.cos(), y, r * a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icosahedron_has_thirty_edges() {
        let pts = icosahedron_edges(1.0);
        assert_eq!(pts.len(), 30 * 17);
        for p in &pts {
            assert!(p.length() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn empty_slot_draws_nothing() {
        assert!(fallback_primitive(7).points().is_empty());
        assert!(!fallback_primitive(3).points().is_empty());
    }

    #[test]
    fn sphere_points_lie_on_the_surface() {
        for p in Primitive::Sphere(1.2).points() {
            assert!((p.length() - 1.2).abs() < 1e-9);
        }
    }
}
