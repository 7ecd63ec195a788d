//! Minimal STL decoding: enough to turn a triangle mesh into a point cloud
//! for the backdrop.
//!
//! Both the binary layout (80-byte header, `u32` triangle count, 50 bytes
//! per triangle) and the ASCII `solid … facet … vertex` layout are accepted.
//! Normals and attribute bytes are ignored.

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use thiserror::Error;

const HEADER_LEN: usize = 80;
const TRIANGLE_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to read mesh: {0}")]
    Io(#[from] std::io::Error),
    #[error("binary STL declares {declared} triangles but holds {actual} bytes")]
    Truncated { declared: u32, actual: usize },
    #[error("malformed ASCII STL at line {line}: {reason}")]
    Malformed { line: usize, reason: &'static str },
    #[error("mesh has no triangles")]
    Empty,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    fn of(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(
            Bounds {
                min: first,
                max: first,
            },
            |b, &p| Bounds {
                min: b.min.min(p),
                max: b.max.max(p),
            },
        ))
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }
}

/// A decoded mesh, centred on the origin and scaled so its largest
/// dimension spans 2 units.
#[derive(Debug, Clone)]
pub struct Mesh {
    points: Vec<Vec3>,
    triangles: usize,
    source_bounds: Bounds,
}

impl Mesh {
    pub fn load(path: &Path) -> Result<Self, MeshError> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, MeshError> {
        let triangles = if let Some(tris) = decode_binary(bytes)? {
            tris
        } else {
            decode_ascii(bytes)?
        };
        Self::from_triangles(&triangles)
    }

    pub fn from_triangles(triangles: &[[[f32; 3]; 3]]) -> Result<Self, MeshError> {
        if triangles.is_empty() {
            return Err(MeshError::Empty);
        }

        // Corners are shared between neighbouring triangles; keep each once,
        // plus one centroid per face to fill large flat areas.
        let mut seen = HashSet::new();
        let mut raw = Vec::with_capacity(triangles.len() * 2);
        let mut push = |p: Vec3| {
            if seen.insert(p.to_array().map(f32::to_bits)) {
                raw.push(p);
            }
        };
        for tri in triangles {
            let [a, b, c] = (*tri).map(Vec3::from);
            push(a);
            push(b);
            push(c);
            push((a + b + c) / 3.0);
        }

        let source_bounds = Bounds::of(&raw).ok_or(MeshError::Empty)?;
        let center = source_bounds.center();
        let scale = fit_scale(&source_bounds);
        let points = raw.into_iter().map(|p| (p - center) * scale).collect();

        Ok(Self {
            points,
            triangles: triangles.len(),
            source_bounds,
        })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles
    }

    /// Bounds before centring and scaling.
    pub fn source_bounds(&self) -> Bounds {
        self.source_bounds
    }

    /// Bounds of the normalised cloud: centred, largest side 2.
    pub fn bounds(&self) -> Bounds {
        let center = self.source_bounds.center();
        let scale = fit_scale(&self.source_bounds);
        Bounds {
            min: (self.source_bounds.min - center) * scale,
            max: (self.source_bounds.max - center) * scale,
        }
    }

    /// At most `max` points, evenly strided through the cloud.
    pub fn sample_points(&self, max: usize) -> impl Iterator<Item = Vec3> + '_ {
        let stride = if max == 0 {
            usize::MAX
        } else {
            self.points.len().div_ceil(max).max(1)
        };
        self.points.iter().copied().step_by(stride).take(max)
    }
}

/// Scale that makes the largest dimension 2; 1 for degenerate meshes.
pub fn fit_scale(bounds: &Bounds) -> f32 {
    let max_dim = bounds.size().max_element();
    if max_dim > 0.0 {
        2.0 / max_dim
    } else {
        1.0
    }
}

/// `Ok(None)` when `bytes` do not look like a binary STL.
fn decode_binary(bytes: &[u8]) -> Result<Option<Vec<[[f32; 3]; 3]>>, MeshError> {
    if bytes.len() < HEADER_LEN + 4 {
        return Ok(None);
    }
    let mut count_bytes = [0u8; 4];
    count_bytes.copy_from_slice(&bytes[HEADER_LEN..HEADER_LEN + 4]);
    let declared = u32::from_le_bytes(count_bytes);
    let body = &bytes[HEADER_LEN + 4..];
    let expected = (declared as usize).checked_mul(TRIANGLE_LEN);

    if expected != Some(body.len()) {
        // ASCII files start with "solid"; anything else is a broken binary.
        if looks_ascii(bytes) {
            return Ok(None);
        }
        return Err(MeshError::Truncated {
            declared,
            actual: bytes.len(),
        });
    }

    let triangles = body
        .chunks_exact(TRIANGLE_LEN)
        .map(|chunk| {
            let mut tri = [[0.0f32; 3]; 3];
            // Skip the 12-byte normal.
            for (v, corner) in tri.iter_mut().enumerate() {
                for (axis, value) in corner.iter_mut().enumerate() {
                    let at = 12 + v * 12 + axis * 4;
                    let mut f = [0u8; 4];
                    f.copy_from_slice(&chunk[at..at + 4]);
                    *value = f32::from_le_bytes(f);
                }
            }
            tri
        })
        .collect();
    Ok(Some(triangles))
}

fn looks_ascii(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    std::str::from_utf8(head)
        .map(|s| s.trim_start().starts_with("solid"))
        .unwrap_or(false)
}

fn decode_ascii(bytes: &[u8]) -> Result<Vec<[[f32; 3]; 3]>, MeshError> {
    let text = String::from_utf8_lossy(bytes);
    if !text.trim_start().starts_with("solid") {
        return Err(MeshError::Malformed {
            line: 1,
            reason: "missing `solid` header",
        });
    }

    let mut triangles = Vec::new();
    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(3);
    for (i, line) in text.lines().enumerate() {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("vertex") => {
                let mut v = [0.0f32; 3];
                for slot in &mut v {
                    *slot = words
                        .next()
                        .and_then(|w| w.parse().ok())
                        .ok_or(MeshError::Malformed {
                            line: i + 1,
                            reason: "vertex needs three numbers",
                        })?;
                }
                corners.push(v);
            }
            Some("endfacet") => {
                if corners.len() != 3 {
                    return Err(MeshError::Malformed {
                        line: i + 1,
                        reason: "facet without exactly three vertices",
                    });
                }
                triangles.push([corners[0], corners[1], corners[2]]);
                corners.clear();
            }
            _ => {}
        }
    }
    Ok(triangles)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_LEN];
        out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            out.extend_from_slice(&[0u8; 12]);
            for corner in tri {
                for value in corner {
                    out.extend_from_slice(&value.to_le_bytes());
                }
            }
            out.extend_from_slice(&[0u8; 2]);
        }
        out
    }

    const TETRA: [[[f32; 3]; 3]; 4] = [
        [[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 2.0, 0.0]],
        [[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        [[0.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]],
        [[4.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 1.0]],
    ];

    #[test]
    fn decodes_binary() {
        let mesh = Mesh::decode(&binary_stl(&TETRA)).unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.source_bounds().max, Vec3::new(4.0, 2.0, 1.0));
        // Largest dimension (x = 4) now spans exactly 2.
        let xs: Vec<f32> = mesh.points().iter().map(|p| p.x).collect();
        let span = xs.iter().cloned().fold(f32::MIN, f32::max) - xs.iter().cloned().fold(f32::MAX, f32::min);
        assert!((span - 2.0).abs() < 1e-5);
        let b = mesh.bounds();
        assert!((b.size().x - 2.0).abs() < 1e-5);
        assert!(b.center().abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn decodes_ascii() {
        let text = "solid demo\n\
            facet normal 0 0 1\n outer loop\n  vertex 0 0 0\n  vertex 1 0 0\n  vertex 0 1 0\n endloop\nendfacet\n\
            endsolid demo\n";
        let mesh = Mesh::decode(text.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        // Three corners + one centroid.
        assert_eq!(mesh.points().len(), 4);
    }

    #[test]
    fn truncated_binary_is_an_error() {
        let mut bytes = binary_stl(&TETRA);
        bytes.truncate(bytes.len() - 7);
        assert!(matches!(Mesh::decode(&bytes), Err(MeshError::Truncated { .. })));
    }

    #[test]
    fn malformed_ascii_reports_line() {
        let text = "solid x\nfacet normal 0 0 1\nvertex 0 0\nendfacet\n";
        match Mesh::decode(text.as_bytes()) {
            Err(MeshError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert!(matches!(Mesh::decode(b"solid nothing\nendsolid\n"), Err(MeshError::Empty)));
    }

    #[test]
    fn sampling_respects_limit() {
        let mesh = Mesh::decode(&binary_stl(&TETRA)).unwrap();
        assert!(mesh.sample_points(3).count() <= 3);
        assert_eq!(mesh.sample_points(1000).count(), mesh.points().len());
        assert_eq!(mesh.sample_points(0).count(), 0);
    }

    #[test]
    fn degenerate_bounds_keep_unit_scale() {
        let b = Bounds {
            min: Vec3::ONE,
            max: Vec3::ONE,
        };
        assert_eq!(fit_scale(&b), 1.0);
    }
}
