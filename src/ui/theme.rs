//! Colour palette and text styles used across the UI.
//!
//! Terminals have no alpha channel, so opacity is rendered by blending a
//! colour toward the background.

use ratatui::style::{Color, Modifier, Style};

pub const VOID: (u8, u8, u8) = (10, 10, 12);
pub const ASH: (u8, u8, u8) = (26, 26, 30);
pub const SMOKE: (u8, u8, u8) = (42, 42, 48);
pub const DUST: (u8, u8, u8) = (138, 133, 128);
pub const BONE: (u8, u8, u8) = (232, 228, 220);
pub const EMBER: (u8, u8, u8) = (255, 107, 53);

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    /// `rgb` at `opacity` over the background.
    pub fn fade(rgb: (u8, u8, u8), opacity: f64) -> Color {
        Self::blend(VOID, rgb, opacity)
    }

    /// Linear mix from `from` (t = 0) to `to` (t = 1).
    pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
    }

    pub fn rgb(c: (u8, u8, u8)) -> Color {
        Color::Rgb(c.0, c.1, c.2)
    }

    // ── story ──────────────────────────────────────────────────
    pub fn background() -> Style {
        Style::default().bg(Self::rgb(VOID))
    }

    pub fn chapter_style(opacity: f64) -> Style {
        Style::default()
            .fg(Self::fade(EMBER, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn headline_style(opacity: f64) -> Style {
        Style::default()
            .fg(Self::fade(BONE, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn narration_style(opacity: f64) -> Style {
        Style::default().fg(Self::fade(BONE, opacity * 0.95))
    }

    pub fn card_style(opacity: f64) -> Style {
        Style::default()
            .fg(Self::fade(BONE, opacity))
            .bg(Self::rgb(ASH))
    }

    pub fn card_border_style(opacity: f64) -> Style {
        Style::default().fg(Self::fade(SMOKE, opacity)).bg(Self::rgb(ASH))
    }

    pub fn citation_style(opacity: f64) -> Style {
        Style::default()
            .fg(Self::fade(EMBER, opacity))
            .bg(Self::rgb(ASH))
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn dim_style() -> Style {
        Style::default().fg(Self::rgb(DUST))
    }

    pub fn faint_style() -> Style {
        Style::default().fg(Self::fade(DUST, 0.6))
    }

    pub fn accent_style() -> Style {
        Style::default().fg(Self::rgb(EMBER))
    }

    pub fn text_style() -> Style {
        Style::default().fg(Self::rgb(BONE))
    }

    pub fn border_style() -> Style {
        Style::default().fg(Self::rgb(SMOKE))
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Self::rgb(BONE))
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Self::rgb(ASH)).fg(Self::rgb(DUST))
    }

    pub fn panel_style() -> Style {
        Style::default().bg(Self::rgb(ASH)).fg(Self::rgb(BONE))
    }

    pub fn highlight_style() -> Style {
        Style::default()
            .fg(Self::rgb(EMBER))
            .add_modifier(Modifier::BOLD)
    }
}
