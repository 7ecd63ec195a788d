//! Loading indicator: a small spinner + label shown in the top-right corner
//! of the story while a backdrop mesh is still being read.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Braille-dot spinner frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// Frames per second of the spin.
const SPIN_RATE: f64 = 10.0;

pub struct LoadingIndicator {
    pub visible: bool,
    /// Seconds since start; drives the frame.
    pub elapsed: f64,
}

impl LoadingIndicator {
    fn frame(elapsed: f64) -> &'static str {
        let i = (elapsed.max(0.0) * SPIN_RATE) as usize;
        SPINNER_FRAMES[i % SPINNER_FRAMES.len()]
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 16 || area.height == 0 {
            return;
        }
        let label = format!(" {} loading ", Self::frame(self.elapsed));
        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 6);
        let line = Line::from(Span::styled(label, Theme::faint_style()));
        buf.set_line(x, area.y, &line, label_width);
    }
}
