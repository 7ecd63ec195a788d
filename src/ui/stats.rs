//! Stat-card overlay with clickable citation markers.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::core::animation::{element_state, Motion, STAT_CARD_WINDOW};
use crate::core::catalog::{Catalog, Scene};
use crate::core::citations::{citation_markers, CitationMarker};

use super::layout::anchored;
use super::text::wrap;
use super::theme::Theme;

const MAX_CARD_WIDTH: u16 = 44;
const MIN_CARD_WIDTH: u16 = 20;
/// Blank rows between cards.
const CARD_GAP: u16 = 1;

pub struct StatsOverlay<'a> {
    pub scene: &'a Scene,
    pub catalog: &'a Catalog,
    /// Latched intra-scene progress.
    pub intra: f64,
    /// Opacity of the whole overlay from the scene's entry/exit curve.
    pub container_opacity: f64,
    pub motion: Motion,
}

struct CardLayout<'a> {
    lines: Vec<String>,
    markers: Vec<CitationMarker<'a>>,
    /// Markers continue the last text line instead of starting their own.
    markers_inline: bool,
    height: u16,
}

impl<'a> StatsOverlay<'a> {
    fn card_width(area: Rect) -> u16 {
        (area.width.saturating_mul(2) / 5)
            .clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH)
            .min(area.width)
    }

    fn layout_card(&self, index: usize, inner_w: usize) -> CardLayout<'a> {
        let scene: &'a Scene = self.scene;
        let card = &scene.stat_cards[index];
        let lines = wrap(&card.text, inner_w);
        let markers = citation_markers(card, self.catalog);
        let marker_w: usize = markers.iter().map(|m| marker_label(m).chars().count()).sum();
        let last_w = lines.last().map_or(0, |l| l.chars().count());
        let markers_inline = markers.is_empty() || last_w + marker_w <= inner_w;
        let text_rows = lines.len() + usize::from(!markers_inline);
        CardLayout {
            lines,
            markers,
            markers_inline,
            height: text_rows as u16 + 2,
        }
    }

    /// Render and return citation hit zones (area → source id).
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> Vec<(Rect, String)> {
        let mut zones = Vec::new();
        let cards = &self.scene.stat_cards;
        if cards.is_empty() || area.width < MIN_CARD_WIDTH || area.height < 3 {
            return zones;
        }

        let card_w = Self::card_width(area);
        let inner_w = usize::from(card_w.saturating_sub(4)).max(1);
        let layouts: Vec<CardLayout> = (0..cards.len())
            .map(|i| self.layout_card(i, inner_w))
            .collect();
        let total_h: u16 = layouts.iter().map(|l| l.height).sum::<u16>()
            + CARD_GAP * (layouts.len() as u16 - 1);
        let bounds = anchored(area, card_w, total_h, &self.scene.placement());

        let mut y = bounds.y;
        let bottom = area.y + area.height;
        for (i, layout) in layouts.iter().enumerate() {
            let state = element_state(self.intra, i, cards.len(), STAT_CARD_WINDOW, self.motion);
            let card_y = y + state.offset.round() as u16;
            y += layout.height + CARD_GAP;
            if !state.visible || card_y >= bottom {
                continue;
            }
            let opacity = state.opacity * self.container_opacity;
            if opacity <= 0.0 {
                continue;
            }
            let rect = Rect::new(bounds.x, card_y, card_w, layout.height.min(bottom - card_y));
            Clear.render(rect, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::card_border_style(opacity))
                .style(Theme::card_style(opacity));
            let inner = block.inner(rect);
            block.render(rect, buf);
            let text_x = inner.x + 1;
            let text_w = inner.width.saturating_sub(2);

            for (row, text) in layout.lines.iter().enumerate() {
                let ly = inner.y + row as u16;
                if ly >= inner.y + inner.height {
                    break;
                }
                buf.set_line(text_x, ly, &Line::styled(text.as_str(), Theme::card_style(opacity)), text_w);
            }

            let (mut mx, my) = if layout.markers_inline {
                let last = layout.lines.last().map_or(0, |l| l.chars().count()) as u16;
                (text_x + last, inner.y + layout.lines.len().saturating_sub(1) as u16)
            } else {
                (text_x, inner.y + layout.lines.len() as u16)
            };
            if my >= inner.y + inner.height {
                continue;
            }
            for marker in &layout.markers {
                let label = marker_label(marker);
                let w = label.chars().count() as u16;
                if mx + w > text_x + text_w {
                    break;
                }
                buf.set_span(mx, my, &Span::styled(label, Theme::citation_style(opacity)), w);
                zones.push((Rect::new(mx, my, w, 1), marker.source_id.to_string()));
                mx += w;
            }
        }
        zones
    }
}

fn marker_label(marker: &CitationMarker) -> String {
    format!("[{}]", marker.number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::reveal_threshold;

    fn render(catalog: &Catalog, scene: usize, intra: f64) -> (Buffer, Vec<(Rect, String)>) {
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        let zones = StatsOverlay {
            scene: &catalog.scenes()[scene],
            catalog,
            intra,
            container_opacity: 1.0,
            motion: Motion::Reduced,
        }
        .render_and_hit(area, &mut buf);
        (buf, zones)
    }

    #[test]
    fn hidden_cards_have_no_citation_zones() {
        let catalog = Catalog::builtin().unwrap();
        let (_, zones) = render(&catalog, 0, 0.0);
        assert!(zones.is_empty());
    }

    #[test]
    fn revealed_cards_expose_their_markers() {
        let catalog = Catalog::builtin().unwrap();
        let cards = catalog.scenes()[0].stat_cards.len();
        let first = reveal_threshold(0, cards, STAT_CARD_WINDOW);
        let (buf, zones) = render(&catalog, 0, first);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].1, "S_UNEP_2025_PR");
        let zone = zones[0].0;
        let label: String = (zone.x..zone.x + zone.width)
            .map(|x| buf[(x, zone.y)].symbol().to_string())
            .collect();
        assert_eq!(label, "[1]");

        let (_, all) = render(&catalog, 0, 1.0);
        assert_eq!(all.len(), 2);
    }
}
