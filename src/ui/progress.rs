//! Wayfinding chrome: progress dots, the "n / N" counter and the
//! first-screen scroll hint.

use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::animation::Motion;
use crate::core::catalog::Scene;

use super::theme::{Theme, DUST, EMBER, SMOKE};

/// The hint is shown while progress is below this.
pub const HINT_UNTIL: f64 = 0.03;
/// Seconds per bob of the hint arrow.
const HINT_PERIOD: f64 = 1.8;
/// Rows between dots.
const DOT_SPACING: u16 = 2;

// ───────────────────────────────────────── dots ──────────────

pub struct ProgressDots<'a> {
    pub scenes: &'a [Scene],
    pub active: usize,
    pub hovered: Option<usize>,
}

impl ProgressDots<'_> {
    /// Render into the dots column of `story` and return click zones
    /// (area → scene index).
    pub fn render_and_hit(self, dots: Rect, story: Rect, buf: &mut Buffer) -> Vec<(Rect, usize)> {
        let mut zones = Vec::new();
        let n = self.scenes.len() as u16;
        if n == 0 || dots.width < 2 {
            return zones;
        }
        let span = (n - 1) * DOT_SPACING + 1;
        if span > dots.height {
            return zones;
        }
        let top = dots.y + (dots.height - span) / 2;
        let x = dots.x + dots.width.saturating_sub(2);

        // Connecting line behind the dots.
        for y in top..top + span {
            buf.set_string(x, y, "│", Theme::faint_style().fg(Theme::fade(SMOKE, 0.8)));
        }

        for (i, scene) in self.scenes.iter().enumerate() {
            let y = top + i as u16 * DOT_SPACING;
            let (glyph, style) = if i == self.active {
                ("◉", Theme::highlight_style())
            } else if i < self.active {
                ("●", Theme::faint_style())
            } else {
                ("○", Theme::border_style())
            };
            let style = if self.hovered == Some(i) && i != self.active {
                style.fg(Theme::rgb(DUST))
            } else {
                style
            };
            buf.set_string(x, y, glyph, style);
            zones.push((Rect::new(x.saturating_sub(1), y, 3, 1), i));

            if self.hovered == Some(i) {
                let label = format!("{} ", scene.chapter);
                let w = label.chars().count() as u16;
                let lx = x.saturating_sub(w + 1).max(story.x);
                buf.set_string(lx, y, &label, Theme::dim_style());
            }
        }
        zones
    }
}

// ───────────────────────────────────────── counter ───────────

pub struct SceneCounter {
    /// 0-based active scene.
    pub index: usize,
    pub total: usize,
}

impl Widget for SceneCounter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let text = counter_text(self.index, self.total);
        buf.set_string(area.x, area.y, text, Theme::faint_style());
    }
}

pub fn counter_text(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}

// ───────────────────────────────────────── hint ──────────────

pub struct ScrollHint {
    pub progress: f64,
    pub elapsed: f64,
    pub motion: Motion,
}

impl ScrollHint {
    pub fn visible(progress: f64) -> bool {
        progress < HINT_UNTIL
    }

    /// Rows the arrow is pushed down at `elapsed` seconds.
    pub fn bob(elapsed: f64, motion: Motion) -> u16 {
        if motion.is_reduced() {
            return 0;
        }
        let phase = (elapsed / HINT_PERIOD).fract();
        let depth = (1.0 - (phase * TAU).cos()) / 2.0;
        depth.round() as u16
    }
}

impl Widget for ScrollHint {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !Self::visible(self.progress) || area.height < 2 {
            return;
        }
        let label = "Scroll to explore";
        let w = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(w) / 2;
        buf.set_line(
            x,
            area.y,
            &Line::from(Span::styled(label, Theme::dim_style())),
            area.width,
        );
        let arrow_y = area.y + 1 + Self::bob(self.elapsed, self.motion);
        if arrow_y < area.y + area.height {
            buf.set_string(
                area.x + area.width / 2,
                arrow_y,
                "↓",
                Theme::faint_style()
                    .fg(Theme::rgb(EMBER))
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}
