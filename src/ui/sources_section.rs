//! "All Sources": the list below the last scene, reached by scrolling
//! past the story.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::catalog::Catalog;

use super::text::ellipsize;
use super::theme::Theme;

/// Title, blank, rule.
const HEADER_ROWS: u16 = 3;
/// `[n] org · year`, title, quote, url, blank.
const ENTRY_ROWS: u16 = 5;
const PADDING_X: u16 = 4;
const MAX_WIDTH: u16 = 96;

/// Rows the section occupies below the story.
pub fn section_height(catalog: &Catalog) -> u16 {
    HEADER_ROWS + ENTRY_ROWS * catalog.source_count() as u16 + 1
}

pub struct SourcesSection<'a> {
    pub catalog: &'a Catalog,
    /// Section rows scrolled above the top of `area`.
    pub skip: u16,
}

impl Widget for SourcesSection<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= PADDING_X * 2 || area.height == 0 {
            return;
        }
        buf.set_style(area, Theme::background());
        let x = area.x + PADDING_X;
        let width = (area.width - PADDING_X * 2).min(MAX_WIDTH);
        let w = usize::from(width);

        let mut rows: Vec<Line> = vec![
            Line::styled("All Sources", Theme::title_style()),
            Line::raw(""),
            Line::styled("─".repeat(w), Theme::border_style()),
        ];
        for (i, source) in self.catalog.ordered_sources().enumerate() {
            rows.push(Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), Theme::accent_style()),
                Span::styled(
                    ellipsize(&format!("{} · {}", source.org, source.year), w.saturating_sub(6)),
                    Theme::dim_style(),
                ),
            ]));
            rows.push(Line::styled(ellipsize(&source.title, w), Theme::text_style()));
            rows.push(Line::styled(
                ellipsize(&format!("“{}”", source.quote), w),
                Theme::faint_style(),
            ));
            rows.push(Line::from(vec![
                Span::styled("View source ", Theme::dim_style()),
                Span::styled(
                    ellipsize(&source.url, w.saturating_sub(12)),
                    Theme::accent_style(),
                ),
            ]));
            rows.push(Line::raw(""));
        }

        for (row, line) in rows
            .iter()
            .skip(usize::from(self.skip))
            .take(usize::from(area.height))
            .enumerate()
        {
            buf.set_line(x, area.y + row as u16, line, width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_covers_every_source() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            section_height(&catalog),
            HEADER_ROWS + ENTRY_ROWS * catalog.source_count() as u16 + 1
        );
    }

    #[test]
    fn lists_sources_in_citation_order() {
        let catalog = Catalog::builtin().unwrap();
        let area = Rect::new(0, 0, 100, section_height(&catalog));
        let mut buf = Buffer::empty(area);
        SourcesSection {
            catalog: &catalog,
            skip: 0,
        }
        .render(area, &mut buf);
        let row = |y: u16| -> String { (0..100).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert!(row(0).contains("All Sources"));
        assert!(row(HEADER_ROWS).contains("[1] "));
        assert!(row(HEADER_ROWS + ENTRY_ROWS).contains("[2] "));
    }

    #[test]
    fn skip_scrolls_the_header_away() {
        let catalog = Catalog::builtin().unwrap();
        let area = Rect::new(0, 0, 100, 4);
        let mut buf = Buffer::empty(area);
        SourcesSection {
            catalog: &catalog,
            skip: HEADER_ROWS,
        }
        .render(area, &mut buf);
        let first: String = (0..100).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(first.contains("[1] "));
    }
}
