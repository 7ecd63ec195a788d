//! Narration panel: chapter tag, headline and the scene's lines revealed
//! one by one as the reader moves through the scene.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::animation::{element_state, Motion, NARRATION_WINDOW};
use crate::core::catalog::Scene;

use super::text::wrap;
use super::theme::Theme;

const PADDING_X: u16 = 4;
/// Readable measure, in columns.
const MAX_WIDTH: u16 = 56;

pub struct NarrationPanel<'a> {
    pub scene: &'a Scene,
    /// Latched intra-scene progress.
    pub intra: f64,
    pub motion: Motion,
}

impl Widget for NarrationPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= PADDING_X * 2 || area.height < 4 {
            return;
        }
        let width = (area.width - PADDING_X * 2).min(MAX_WIDTH);
        let x = area.x + PADDING_X;

        // (line, rows pushed down by the entry rise)
        let mut rows: Vec<(Line, u16)> = Vec::new();
        rows.push((
            Line::from(vec![
                Span::styled("──── ", Theme::chapter_style(1.0)),
                Span::styled(self.scene.chapter.to_uppercase(), Theme::chapter_style(1.0)),
            ]),
            0,
        ));
        rows.push((Line::raw(""), 0));
        for part in wrap(&self.scene.headline, usize::from(width)) {
            rows.push((Line::styled(part, Theme::headline_style(1.0)), 0));
        }
        rows.push((Line::raw(""), 0));

        let len = self.scene.narration_lines.len();
        for (i, text) in self.scene.narration_lines.iter().enumerate() {
            let state = element_state(self.intra, i, len, NARRATION_WINDOW, self.motion);
            let wrapped = wrap(text, usize::from(width));
            let height = wrapped.len();
            if state.visible {
                let rise = state.offset.round() as u16;
                for part in wrapped {
                    rows.push((Line::styled(part, Theme::narration_style(state.opacity)), rise));
                }
            } else {
                // Reserve the space so revealed lines never shift.
                rows.extend(std::iter::repeat_n((Line::raw(""), 0), height));
            }
            rows.push((Line::raw(""), 0));
        }

        let total = rows.len() as u16;
        let top = area.y + area.height.saturating_sub(total) / 2;
        let bottom = area.y + area.height;
        for (i, (line, rise)) in rows.into_iter().enumerate() {
            let y = top + i as u16 + rise;
            if y >= bottom {
                continue;
            }
            buf.set_line(x, y, &line, width);
        }
    }
}
