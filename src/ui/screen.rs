//! Frame composition: the story viewport, the trailing sources section,
//! the status bar and the drawer overlay.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::app::state::{ActiveView, AppState, HitZones};
use crate::core::animation::lifecycle;

use super::backdrop::Backdrop;
use super::drawer::{slide_progress, SourcesDrawer};
use super::layout::{AppLayout, StoryLayout};
use super::narration::NarrationPanel;
use super::progress::{ProgressDots, SceneCounter, ScrollHint};
use super::sources_section::SourcesSection;
use super::spinner::LoadingIndicator;
use super::stats::StatsOverlay;
use super::theme::Theme;

/// Draw one frame and record its hit zones on `state`.
pub fn draw(frame: &mut Frame, state: &mut AppState, now: Instant) {
    let area = frame.area();
    let zones = render(state, area, frame.buffer_mut(), now);
    state.hit_zones = zones;
}

/// Render the whole screen into `buf`.
pub fn render(state: &AppState, area: Rect, buf: &mut Buffer, now: Instant) -> HitZones {
    let layout = AppLayout::from_area(area);
    let story = layout.story_area;
    buf.set_style(area, Theme::background());

    let overflow = state.sampler.overflow_rows().round().min(f64::from(u16::MAX)) as u16;
    let mut zones = HitZones::default();

    // ── story, shifted up once the reader scrolls past it ───────
    if overflow == 0 {
        let (dots, citations) = render_story(state, story, buf);
        zones.dots = dots;
        zones.citations = citations;
    } else if overflow < story.height {
        let mut scratch = Buffer::empty(story);
        let (dots, citations) = render_story(state, story, &mut scratch);
        for y in overflow..story.height {
            for x in story.x..story.x + story.width {
                buf[(x, story.y + y - overflow)] = scratch[(x, story.y + y)].clone();
            }
        }
        let lift = |rect: Rect| -> Option<Rect> {
            (rect.y >= story.y + overflow).then(|| Rect {
                y: rect.y - overflow,
                ..rect
            })
        };
        zones.dots = dots
            .into_iter()
            .filter_map(|(r, i)| lift(r).map(|r| (r, i)))
            .collect();
        zones.citations = citations
            .into_iter()
            .filter_map(|(r, id)| lift(r).map(|r| (r, id)))
            .collect();
    }

    // ── trailing sources section ────────────────────────────────
    let section_top = story.height.saturating_sub(overflow);
    if section_top < story.height {
        let rect = Rect::new(
            story.x,
            story.y + section_top,
            story.width,
            story.height - section_top,
        );
        SourcesSection {
            catalog: &state.catalog,
            skip: overflow.saturating_sub(story.height),
        }
        .render(rect, buf);
    }

    // ── status bar ──────────────────────────────────────────────
    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    Paragraph::new(status_text)
        .style(Theme::status_bar_style())
        .render(layout.status_area, buf);

    // ── drawer overlay ──────────────────────────────────────────
    if state.active_view == ActiveView::Sources {
        let drawer = SourcesDrawer {
            catalog: &state.catalog,
            drawer: &state.drawer,
            slide: slide_progress(state.drawer.opened_at, now, state.motion),
        }
        .render_and_hit(area, buf);
        zones.drawer = Some(drawer.panel);
        zones.drawer_close = Some(drawer.close);
    }

    zones
}

type StoryZones = (Vec<(Rect, usize)>, Vec<(Rect, String)>);

fn render_story(state: &AppState, story: Rect, buf: &mut Buffer) -> StoryZones {
    let view = &state.view;
    let scenes = state.catalog.scenes();
    let Some(scene) = scenes.get(view.scene) else {
        return (Vec::new(), Vec::new());
    };

    Backdrop {
        scenes,
        meshes: &state.meshes,
        camera: view.camera,
        progress: view.progress,
        active: view.scene,
        elapsed: view.elapsed,
        motion: state.motion,
        stars: true,
    }
    .render(story, buf);

    let regions = StoryLayout::from_area(story);
    NarrationPanel {
        scene,
        intra: view.narration_intra,
        motion: state.motion,
    }
    .render(regions.narration, buf);

    // Cards stay clear of the dots column and the counter row.
    let stats_area = Rect::new(
        story.x,
        story.y,
        story.width.saturating_sub(regions.dots.width),
        story.height.saturating_sub(1),
    );
    let citations = StatsOverlay {
        scene,
        catalog: &state.catalog,
        intra: view.stats_intra,
        container_opacity: lifecycle(view.intra, state.motion).opacity,
        motion: state.motion,
    }
    .render_and_hit(stats_area, buf);

    let dots = ProgressDots {
        scenes,
        active: view.scene,
        hovered: state.hovered_dot,
    }
    .render_and_hit(regions.dots, story, buf);

    SceneCounter {
        index: view.scene,
        total: scenes.len(),
    }
    .render(regions.counter, buf);

    ScrollHint {
        progress: view.progress,
        elapsed: view.elapsed,
        motion: state.motion,
    }
    .render(regions.hint, buf);

    LoadingIndicator {
        visible: state.meshes.is_loading(),
        elapsed: view.elapsed,
    }
    .render(story, buf);

    (dots, citations)
}
