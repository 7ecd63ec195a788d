//! Scene and source catalog: the read-only story data every derivation
//! reads from.
//!
//! A [`Catalog`] is validated once at construction and never mutated
//! afterwards.  It is passed by reference into the resolver, the camera
//! interpolator and the animation engine, so tests can hand those functions
//! small synthetic catalogs instead of the built-in story.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Contiguity tolerance between one scene's `end` and the next one's `start`.
const RANGE_EPSILON: f64 = 1e-9;

pub type Vec3 = glam::DVec3;

// ───────────────────────────────────────── camera ────────────

/// Resting camera pose for a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub pos: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f64,
}

impl CameraPose {
    pub const DEFAULT_FOV: f64 = 50.0;

    pub fn new(pos: impl Into<Vec3>, look_at: impl Into<Vec3>) -> Self {
        Self {
            pos: pos.into(),
            look_at: look_at.into(),
            fov: Self::DEFAULT_FOV,
        }
    }

    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }
}

// ───────────────────────────────────────── content ───────────

/// A data callout shown beside the narration, with its citations.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub id: String,
    pub text: String,
    pub source_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    Top,
    Center,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAnchor {
    Left,
    Center,
    #[default]
    Right,
}

/// Where the stat-card overlay sits.  Offsets are percentages of the
/// viewport (`offset_y = -10` lifts the panel by a tenth of the screen).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsPlacement {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Backdrop visual for a scene.  Only the presentation layer reads this.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub key: String,
    /// Mesh path as authored (e.g. `/models/shirt.stl`), resolved against
    /// the asset root by the loader.
    pub model: Option<String>,
    /// Initial orientation in radians.
    pub rotation: Vec3,
    /// Oscillation amplitude per axis in radians.
    pub rotation_amplitude: Vec3,
    pub scale: f64,
}

impl Visual {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            model: None,
            rotation: Vec3::ZERO,
            rotation_amplitude: Vec3::new(0.05, 0.2, 0.0),
            scale: 1.0,
        }
    }

    pub fn model(mut self, path: &str) -> Self {
        self.model = Some(path.to_string());
        self
    }

    pub fn rotation(mut self, rotation: impl Into<Vec3>) -> Self {
        self.rotation = rotation.into();
        self
    }

    pub fn amplitude(mut self, amplitude: impl Into<Vec3>) -> Self {
        self.rotation_amplitude = amplitude.into();
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Half-open slice `[start, end)` of the normalised scroll range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && progress < self.end
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// One chapter of the story.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: String,
    pub chapter: String,
    pub headline: String,
    /// Revealed top to bottom.
    pub narration_lines: Vec<String>,
    pub stat_cards: Vec<StatCard>,
    pub range: ScrollRange,
    pub camera: CameraPose,
    pub visual: Visual,
    pub stats_placement: Option<StatsPlacement>,
}

impl Scene {
    /// Stats placement with the default filled in.
    pub fn placement(&self) -> StatsPlacement {
        self.stats_placement.unwrap_or_default()
    }
}

/// A citation record.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub id: String,
    pub org: String,
    pub title: String,
    pub year: String,
    pub url: String,
    pub quote: String,
    pub note: Option<String>,
}

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog has no scenes")]
    Empty,
    #[error("first scene must start at 0, found {0}")]
    FirstSceneOffset(f64),
    #[error("scene {id} has an empty or inverted range [{start}, {end})")]
    EmptyRange { id: String, start: f64, end: f64 },
    #[error("scene {0} lies outside the unit range")]
    OutOfUnitRange(String),
    #[error("scene {next} starts at {next_start} but {prev} ends at {prev_end}")]
    Gap {
        prev: String,
        next: String,
        prev_end: f64,
        next_start: f64,
    },
    #[error("duplicate scene id {0}")]
    DuplicateScene(String),
    #[error("duplicate source id {0}")]
    DuplicateSource(String),
    #[error("citation order names unknown source {0}")]
    UnknownCitation(String),
    #[error("citation order lists {0} twice")]
    DuplicateCitation(String),
    #[error("source {0} has no citation number")]
    UncitedSource(String),
}

// ───────────────────────────────────────── catalog ───────────

/// Validated, immutable story data.
#[derive(Debug, Clone)]
pub struct Catalog {
    scenes: Vec<Scene>,
    sources: HashMap<String, Source>,
    /// Canonical source ordering; position + 1 is the citation number.
    citation_order: Vec<String>,
}

impl Catalog {
    /// Validate and freeze a catalog.
    ///
    /// Scenes must tile `[0, last.end)` without gaps, each with a positive
    /// duration.  `citation_order` must name every source exactly once.
    /// Stat cards citing unknown sources are allowed; their markers are
    /// simply left out when rendered.
    pub fn new(
        scenes: Vec<Scene>,
        sources: Vec<Source>,
        citation_order: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let first = scenes.first().ok_or(CatalogError::Empty)?;
        if first.range.start.abs() > RANGE_EPSILON {
            return Err(CatalogError::FirstSceneOffset(first.range.start));
        }

        let mut seen_scenes = HashSet::new();
        for scene in &scenes {
            if !seen_scenes.insert(scene.id.as_str()) {
                return Err(CatalogError::DuplicateScene(scene.id.clone()));
            }
            let ScrollRange { start, end } = scene.range;
            if !(end - start > 0.0) {
                return Err(CatalogError::EmptyRange {
                    id: scene.id.clone(),
                    start,
                    end,
                });
            }
            if start < 0.0 || end > 1.0 + RANGE_EPSILON {
                return Err(CatalogError::OutOfUnitRange(scene.id.clone()));
            }
        }
        for pair in scenes.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if (prev.range.end - next.range.start).abs() > RANGE_EPSILON {
                return Err(CatalogError::Gap {
                    prev: prev.id.clone(),
                    next: next.id.clone(),
                    prev_end: prev.range.end,
                    next_start: next.range.start,
                });
            }
        }

        let mut by_id = HashMap::with_capacity(sources.len());
        for source in sources {
            if by_id.contains_key(&source.id) {
                return Err(CatalogError::DuplicateSource(source.id));
            }
            by_id.insert(source.id.clone(), source);
        }

        let mut cited = HashSet::new();
        for id in &citation_order {
            if !by_id.contains_key(id) {
                return Err(CatalogError::UnknownCitation(id.clone()));
            }
            if !cited.insert(id.as_str()) {
                return Err(CatalogError::DuplicateCitation(id.clone()));
            }
        }
        if let Some(missing) = by_id.keys().find(|id| !cited.contains(id.as_str())) {
            return Err(CatalogError::UncitedSource(missing.clone()));
        }

        for scene in &scenes {
            for card in &scene.stat_cards {
                for id in card.source_ids.iter().filter(|id| !by_id.contains_key(*id)) {
                    tracing::warn!(scene = %scene.id, card = %card.id, source = %id, "stat card cites unknown source");
                }
            }
        }

        Ok(Self {
            scenes,
            sources: by_id,
            citation_order,
        })
    }

    /// The compiled-in fast-fashion story.
    pub fn builtin() -> Result<Self, CatalogError> {
        let order = super::story::CITATION_ORDER
            .iter()
            .map(|id| id.to_string())
            .collect();
        Self::new(super::story::scenes(), super::story::sources(), order)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn scene_index(&self, id: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.id == id)
    }

    pub fn scene_by_id(&self, id: &str) -> Option<&Scene> {
        self.scene_index(id).and_then(|i| self.scenes.get(i))
    }

    /// Look a scene up by id, or by its 1-based position as shown in the
    /// scene counter.
    pub fn find_scene(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        self.scene_index(key).or_else(|| {
            key.parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|&i| i < self.scenes.len())
        })
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    /// 1-based citation number, fixed by the canonical order.
    pub fn citation_number(&self, id: &str) -> Option<usize> {
        self.citation_order
            .iter()
            .position(|cited| cited == id)
            .map(|pos| pos + 1)
    }

    /// Sources in citation order.
    pub fn ordered_sources(&self) -> impl Iterator<Item = &Source> + '_ {
        self.citation_order
            .iter()
            .filter_map(|id| self.sources.get(id))
    }

    pub fn source_count(&self) -> usize {
        self.citation_order.len()
    }
}

// ───────────────────────────────────────── tests ─────────────
