//! Sources drawer: a right-hand panel with a search line and every source
//! behind the story's numbers.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::app::state::DrawerState;
use crate::core::animation::Motion;
use crate::core::catalog::{Catalog, Source};
use crate::core::easing::ease_in_out_quart;

use super::text::{ellipsize, wrap};
use super::theme::{Theme, EMBER};

/// Slide-in duration.
pub const DRAWER_SLIDE: Duration = Duration::from_millis(300);
const MAX_WIDTH: u16 = 60;
const MIN_WIDTH: u16 = 30;

/// How far the drawer has slid in: 0 = off-screen, 1 = open.
pub fn slide_progress(opened_at: Option<Instant>, now: Instant, motion: Motion) -> f64 {
    let Some(opened_at) = opened_at else {
        return 0.0;
    };
    if motion.is_reduced() {
        return 1.0;
    }
    let t = now.saturating_duration_since(opened_at).as_secs_f64() / DRAWER_SLIDE.as_secs_f64();
    ease_in_out_quart(t)
}

/// Clickable regions of the drawer.
#[derive(Debug, Clone, Copy)]
pub struct DrawerHitZones {
    pub panel: Rect,
    pub close: Rect,
}

pub struct SourcesDrawer<'a> {
    pub catalog: &'a Catalog,
    pub drawer: &'a DrawerState,
    /// From [`slide_progress`].
    pub slide: f64,
}

impl SourcesDrawer<'_> {
    fn panel_area(area: Rect, slide: f64) -> Rect {
        let width = (area.width.saturating_mul(9) / 20)
            .clamp(MIN_WIDTH, MAX_WIDTH)
            .min(area.width);
        let hidden = ((1.0 - slide.clamp(0.0, 1.0)) * f64::from(width)).round() as u16;
        let visible = width - hidden;
        Rect::new(
            area.x + area.width - visible,
            area.y,
            visible,
            area.height,
        )
    }

    /// Render and return hit zones for mouse interaction.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> DrawerHitZones {
        // Dim whatever is behind the drawer.
        buf.set_style(area, Style::default().add_modifier(Modifier::DIM));

        let panel = Self::panel_area(area, self.slide);
        let close = Rect::new(
            (panel.x + panel.width).saturating_sub(4),
            panel.y + 1,
            3.min(panel.width),
            1,
        );
        if panel.width < 8 || panel.height < 6 {
            return DrawerHitZones { panel, close };
        }
        Clear.render(panel, buf);

        let block = Block::default()
            .borders(Borders::LEFT)
            .border_type(BorderType::Thick)
            .border_style(Theme::border_style())
            .style(Theme::panel_style());
        let inner = block.inner(panel);
        block.render(panel, buf);

        let x = inner.x + 2;
        let width = inner.width.saturating_sub(4);
        let w = usize::from(width);
        let bottom = inner.y + inner.height;

        // ── header ──────────────────────────────────────────────
        buf.set_string(x, inner.y + 1, "Sources", Theme::title_style());
        buf.set_string(close.x, close.y, " ✕ ", Theme::dim_style());

        let search = if self.drawer.query.is_empty() {
            Line::from(vec![
                Span::styled("⌕ ", Theme::dim_style()),
                Span::styled("Search sources…", Theme::faint_style()),
            ])
        } else {
            Line::from(vec![
                Span::styled("⌕ ", Theme::dim_style()),
                Span::styled(self.drawer.query.as_str(), Theme::text_style()),
                Span::styled("▏", Theme::accent_style()),
            ])
        };
        buf.set_line(x, inner.y + 3, &search, width);
        buf.set_string(
            inner.x,
            inner.y + 4,
            "─".repeat(usize::from(inner.width)),
            Theme::border_style(),
        );
        buf.set_string(
            x,
            bottom.saturating_sub(1),
            ellipsize("Esc close · type to filter · ↑↓ scroll", w),
            Theme::faint_style(),
        );

        // ── list ────────────────────────────────────────────────
        let list_top = inner.y + 6;
        let list_bottom = bottom.saturating_sub(2);
        let hits = self.drawer.source_query().filter(self.catalog);
        if hits.is_empty() {
            let msg = "No sources found";
            let mx = inner.x + inner.width.saturating_sub(msg.len() as u16) / 2;
            let my = (list_top + 2).min(list_bottom.saturating_sub(1));
            if my >= list_top {
                buf.set_string(mx, my, msg, Theme::dim_style());
            }
            return DrawerHitZones { panel, close };
        }

        let first = self.drawer.scroll.min(hits.len() - 1);
        let mut y = list_top;
        for (number, source) in &hits[first..] {
            if y >= list_bottom {
                break;
            }
            let highlighted = self.drawer.highlighted.as_deref() == Some(source.id.as_str());
            let lines = entry_lines(*number, source, w);
            for line in &lines {
                if y >= list_bottom {
                    break;
                }
                if highlighted {
                    buf.set_string(x - 2, y, "▌", Style::default().fg(Theme::rgb(EMBER)));
                }
                buf.set_line(x, y, line, width);
                y += 1;
            }
            y += 1;
        }

        DrawerHitZones { panel, close }
    }
}

/// The rows one source occupies in the drawer.
pub fn entry_lines(number: usize, source: &Source, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{number}] "), Theme::accent_style()),
        Span::styled(
            ellipsize(&source.org, width.saturating_sub(6)),
            Theme::dim_style().add_modifier(Modifier::BOLD),
        ),
    ])];
    for part in wrap(&source.title, width) {
        lines.push(Line::styled(part, Theme::title_style()));
    }
    lines.push(Line::styled(source.year.clone(), Theme::dim_style()));
    for part in wrap(&format!("“{}”", source.quote), width) {
        lines.push(Line::styled(part, Theme::text_style().add_modifier(Modifier::ITALIC)));
    }
    if let Some(note) = &source.note {
        for (i, part) in wrap(note, width.saturating_sub(2)).into_iter().enumerate() {
            let lead = if i == 0 { "ⓘ " } else { "  " };
            lines.push(Line::styled(format!("{lead}{part}"), Theme::dim_style()));
        }
    }
    lines.push(Line::styled(ellipsize(&source.url, width), Theme::accent_style()));
    lines
}
