//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    animation::{element_state, Motion, RevealLatch, STAT_CARD_WINDOW},
    camera::interpolate_camera,
    catalog::{CameraPose, Catalog},
    citations::{citation_markers, SourceQuery},
    resolver::resolve_scene,
    sampler::{ScrollSampler, JUMP_INSET},
};
use crate::ui::{layout::AppLayout, sources_section};

use super::asset_runtime::MeshCache;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Story,
    Sources,
}

/// The sources drawer: search line, highlight and list scroll.
#[derive(Debug, Clone, Default)]
pub struct DrawerState {
    pub query: String,
    /// Source id given a highlight ring, set when opened from a citation.
    pub highlighted: Option<String>,
    /// First list entry shown.
    pub scroll: usize,
    /// Drives the slide-in; `None` when closed.
    pub opened_at: Option<Instant>,
}

impl DrawerState {
    pub fn source_query(&self) -> SourceQuery {
        SourceQuery::new(&self.query)
    }
}

/// Clickable regions recorded by the last draw, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct HitZones {
    /// Progress dots: area → scene index.
    pub dots: Vec<(Rect, usize)>,
    /// Citation markers on revealed stat cards: area → source id.
    pub citations: Vec<(Rect, String)>,
    pub drawer: Option<Rect>,
    pub drawer_close: Option<Rect>,
}

/// What the current frame shows, derived once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryView {
    /// Smoothed global progress.
    pub progress: f64,
    pub scene: usize,
    pub intra: f64,
    /// Latched intra progress for narration reveals.
    pub narration_intra: f64,
    /// Latched intra progress for stat-card reveals.
    pub stats_intra: f64,
    pub camera: CameraPose,
    /// Seconds since start; drives oscillation and the hint bob.
    pub elapsed: f64,
}

/// Top-level application state.
pub struct AppState {
    pub catalog: Catalog,
    pub sampler: ScrollSampler,
    pub narration_latch: RevealLatch,
    pub stats_latch: RevealLatch,
    pub view: StoryView,
    pub drawer: DrawerState,
    pub active_view: ActiveView,
    pub motion: Motion,
    pub config: AppConfig,
    /// Background-loaded meshes for the backdrop.
    pub meshes: MeshCache,
    pub hit_zones: HitZones,
    /// Last known terminal size.
    pub terminal_area: Rect,
    /// Progress dot under the mouse, for its chapter label.
    pub hovered_dot: Option<usize>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub started: Instant,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        config: AppConfig,
        motion: Motion,
        meshes: MeshCache,
        terminal_area: Rect,
    ) -> Self {
        let layout = AppLayout::from_area(terminal_area);
        let mut sampler = ScrollSampler::new(
            catalog.len(),
            layout.story_area.height,
            config.sampler_config(),
        );
        sampler.set_motion(motion);
        sampler.set_trailing_rows(sources_section::section_height(&catalog));
        let camera = interpolate_camera(0.0, catalog.scenes());

        Self {
            catalog,
            sampler,
            narration_latch: RevealLatch::default(),
            stats_latch: RevealLatch::default(),
            view: StoryView {
                progress: 0.0,
                scene: 0,
                intra: 0.0,
                narration_intra: 0.0,
                stats_intra: 0.0,
                camera,
                elapsed: 0.0,
            },
            drawer: DrawerState::default(),
            active_view: ActiveView::default(),
            motion,
            config,
            meshes,
            hit_zones: HitZones::default(),
            terminal_area,
            hovered_dot: None,
            should_quit: false,
            status_message: None,
            started: Instant::now(),
        }
    }

    // ── per-frame update ───────────────────────────────────────

    /// Advance the sampler and derive everything the next draw needs.
    pub fn tick(&mut self, now: Instant) {
        self.sampler.tick(self.catalog.scenes(), now);
        self.refresh_view(now);
    }

    fn refresh_view(&mut self, now: Instant) {
        let scenes = self.catalog.scenes();
        let progress = self.sampler.progress();
        let resolved = resolve_scene(progress, scenes);
        if resolved.index != self.view.scene {
            if let Some(scene) = scenes.get(resolved.index) {
                tracing::debug!(scene = %scene.id, progress, "scene changed");
            }
        }
        self.view = StoryView {
            progress,
            scene: resolved.index,
            intra: resolved.intra,
            narration_intra: self.narration_latch.observe(resolved.index, resolved.intra),
            stats_intra: self.stats_latch.observe(resolved.index, resolved.intra),
            camera: interpolate_camera(progress, scenes),
            elapsed: now.saturating_duration_since(self.started).as_secs_f64(),
        };
        self.meshes.sync(scenes, progress);
    }

    /// Open at `progress` with no smoothing lag.
    pub fn place_at(&mut self, progress: f64) {
        self.sampler.place_at(progress);
        self.refresh_view(Instant::now());
    }

    /// Open at scene `index` with no scroll animation.
    pub fn open_at_scene(&mut self, index: usize) {
        let Some(scene) = self.catalog.scene(index) else {
            return;
        };
        let progress = if index == 0 {
            0.0
        } else {
            scene.range.start + JUMP_INSET
        };
        self.place_at(progress);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        let layout = AppLayout::from_area(self.terminal_area);
        self.sampler.set_viewport(layout.story_area.height);
    }

    // ── reading controls ───────────────────────────────────────

    pub fn scroll_rows(&mut self, rows: f64) {
        self.sampler.scroll_by(rows, Instant::now());
    }

    pub fn jump_to_scene(&mut self, index: usize) {
        if index < self.catalog.len() {
            self.sampler.jump_to_scene(self.catalog.scenes(), index);
        }
    }

    pub fn next_scene(&mut self) {
        self.jump_to_scene(self.view.scene + 1);
    }

    pub fn prev_scene(&mut self) {
        if let Some(prev) = self.view.scene.checked_sub(1) {
            self.jump_to_scene(prev);
        } else {
            self.sampler.auto_scroll_to(0.0);
        }
    }

    pub fn set_motion(&mut self, motion: Motion) {
        if self.motion != motion {
            tracing::info!(?motion, "motion preference changed");
        }
        self.motion = motion;
        self.sampler.set_motion(motion);
    }

    pub fn toggle_motion(&mut self) {
        let next = if self.motion.is_reduced() {
            Motion::Full
        } else {
            Motion::Reduced
        };
        self.set_motion(next);
        self.status_message = Some(if next.is_reduced() {
            "Reduced motion on".into()
        } else {
            "Reduced motion off".into()
        });
    }

    // ── sources drawer ─────────────────────────────────────────

    /// Open the drawer, optionally highlighting one source and scrolling it
    /// into view.
    pub fn open_sources(&mut self, highlight: Option<String>) {
        self.active_view = ActiveView::Sources;
        if self.drawer.opened_at.is_none() {
            self.drawer.opened_at = Some(Instant::now());
        }
        if let Some(id) = &highlight {
            // The highlighted entry must survive the filter.
            let visible = self
                .drawer
                .source_query()
                .filter(&self.catalog)
                .iter()
                .any(|(_, s)| &s.id == id);
            if !visible {
                self.drawer.query.clear();
            }
            self.drawer.scroll = self
                .drawer
                .source_query()
                .filter(&self.catalog)
                .iter()
                .position(|(_, s)| &s.id == id)
                .unwrap_or(0);
        }
        self.drawer.highlighted = highlight;
    }

    pub fn close_sources(&mut self) {
        self.active_view = ActiveView::Story;
        self.drawer.opened_at = None;
        self.drawer.highlighted = None;
    }

    pub fn set_query(&mut self, query: String) {
        self.drawer.query = query;
        self.drawer.scroll = 0;
    }

    /// Source cited first on the first stat card currently revealed.
    pub fn first_revealed_citation(&self) -> Option<String> {
        let scene = self.catalog.scene(self.view.scene)?;
        let len = scene.stat_cards.len();
        scene
            .stat_cards
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                element_state(self.view.stats_intra, *i, len, STAT_CARD_WINDOW, self.motion)
                    .visible
            })
            .find_map(|(_, card)| {
                citation_markers(card, &self.catalog)
                    .first()
                    .map(|m| m.source_id.to_string())
            })
    }

    pub fn cite(&mut self) {
        match self.first_revealed_citation() {
            Some(id) => self.open_sources(Some(id)),
            None => self.status_message = Some("No citation on screen yet".into()),
        }
    }
}
