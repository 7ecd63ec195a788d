//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::catalog::{HorizontalAnchor, StatsPlacement, VerticalAnchor};

/// Primary screen layout: the story viewport and a bottom status bar.
pub struct AppLayout {
    pub story_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // story (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            story_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

/// Regions inside the story viewport.
pub struct StoryLayout {
    /// Left column for chapter, headline and narration.
    pub narration: Rect,
    /// Right-edge column holding the progress dots.
    pub dots: Rect,
    /// Bottom-left corner for the "n / N" counter.
    pub counter: Rect,
    /// Bottom band, centred, for the first-screen hint.
    pub hint: Rect,
}

impl StoryLayout {
    pub fn from_area(area: Rect) -> Self {
        let narration_w = if area.width >= 100 {
            area.width / 2
        } else {
            area.width.saturating_mul(3) / 5
        };
        let narration = Rect::new(
            area.x,
            area.y,
            narration_w.max(area.width.min(24)),
            area.height.saturating_sub(2),
        );
        let dots = Rect::new(
            area.x + area.width.saturating_sub(4),
            area.y,
            area.width.min(4),
            area.height,
        );
        let counter = Rect::new(
            area.x + 2.min(area.width),
            area.y + area.height.saturating_sub(1),
            area.width.saturating_sub(2).min(12),
            area.height.min(1),
        );
        let hint_w = area.width.min(24);
        let hint = Rect::new(
            area.x + (area.width - hint_w) / 2,
            area.y + area.height.saturating_sub(5),
            hint_w,
            area.height.min(3),
        );
        Self {
            narration,
            dots,
            counter,
            hint,
        }
    }
}

/// Place a `width × height` box inside `area` by a stats placement.
///
/// Offsets are percentages of the area's size; positive moves right/down.
pub fn anchored(area: Rect, width: u16, height: u16, placement: &StatsPlacement) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    // Keep the dots column and the counter row clear.
    let margin_x = 6.min(area.width.saturating_sub(w) / 2);
    let margin_y = 1.min(area.height.saturating_sub(h) / 2);

    let free_x = area.width.saturating_sub(w);
    let free_y = area.height.saturating_sub(h);
    let base_x = match placement.horizontal {
        HorizontalAnchor::Left => margin_x,
        HorizontalAnchor::Center => free_x / 2,
        HorizontalAnchor::Right => free_x.saturating_sub(margin_x),
    };
    let base_y = match placement.vertical {
        VerticalAnchor::Top => margin_y,
        VerticalAnchor::Center => free_y / 2,
        VerticalAnchor::Bottom => free_y.saturating_sub(margin_y),
    };

    let shift = |base: u16, free: u16, extent: u16, pct: f64| -> u16 {
        let moved = f64::from(base) + f64::from(extent) * pct / 100.0;
        moved.round().clamp(0.0, f64::from(free)) as u16
    };
    Rect::new(
        area.x + shift(base_x, free_x, area.width, placement.offset_x),
        area.y + shift(base_y, free_y, area.height, placement.offset_y),
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_placement_is_bottom_right() {
        let area = Rect::new(0, 0, 100, 40);
        let r = anchored(area, 30, 10, &StatsPlacement::default());
        assert!(r.x + r.width > 80);
        assert!(r.y + r.height >= 38);
    }

    #[test]
    fn top_center_with_offset_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let placement = StatsPlacement {
            vertical: VerticalAnchor::Top,
            horizontal: HorizontalAnchor::Center,
            offset_x: 0.0,
            offset_y: -10.0,
        };
        let r = anchored(area, 30, 10, &placement);
        assert_eq!(r.x, 35);
        assert_eq!(r.y, 0);
        let down = anchored(area, 30, 10, &StatsPlacement { offset_y: 30.0, ..placement });
        assert_eq!(down.y, 13);
    }

    #[test]
    fn oversized_box_is_clamped() {
        let area = Rect::new(5, 5, 10, 4);
        let r = anchored(area, 50, 50, &StatsPlacement::default());
        assert_eq!(r, area);
    }
}
