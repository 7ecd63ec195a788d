//! Input handling: maps key/mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;

use super::state::{ActiveView, AppState};

/// Share of the viewport a page key moves.
const PAGE_FRACTION: f64 = 0.9;
/// Drawer entries moved by a page key.
const DRAWER_PAGE: usize = 5;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Story => handle_story_key(state, key),
        ActiveView::Sources => handle_drawer_key(state, key),
    }
}

// ── Story view (configurable bindings) ──────────────────────────

fn handle_story_key(state: &mut AppState, key: KeyEvent) {
    // Number keys jump straight to a scene.
    if let KeyCode::Char(ch @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            let index = (ch as usize) - ('1' as usize);
            state.jump_to_scene(index);
            return;
        }
    }
    if key.code == KeyCode::Esc {
        state.status_message = None;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let step = f64::from(state.config.scroll_step_rows);
    let page = f64::from(state.sampler.viewport_rows()) * PAGE_FRACTION;
    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => state.scroll_rows(-step),
        Action::ScrollDown => state.scroll_rows(step),
        Action::PageUp => state.scroll_rows(-page),
        Action::PageDown => state.scroll_rows(page),
        Action::Top => state.sampler.scroll_to(0.0, Instant::now()),
        Action::Bottom => state.sampler.scroll_to(f64::INFINITY, Instant::now()),
        Action::PrevScene => state.prev_scene(),
        Action::NextScene => state.next_scene(),
        Action::OpenSources => state.open_sources(None),
        Action::Cite => state.cite(),
        Action::ToggleMotion => state.toggle_motion(),
    }
}

// ── Sources drawer (fixed keys; typing goes to the search line) ──

fn handle_drawer_key(state: &mut AppState, key: KeyEvent) {
    let results = state.drawer.source_query().filter(&state.catalog).len();
    let last = results.saturating_sub(1);

    match key.code {
        KeyCode::Esc => state.close_sources(),
        KeyCode::Up => state.drawer.scroll = state.drawer.scroll.saturating_sub(1),
        KeyCode::Down => state.drawer.scroll = (state.drawer.scroll + 1).min(last),
        KeyCode::PageUp => state.drawer.scroll = state.drawer.scroll.saturating_sub(DRAWER_PAGE),
        KeyCode::PageDown => state.drawer.scroll = (state.drawer.scroll + DRAWER_PAGE).min(last),
        KeyCode::Home => state.drawer.scroll = 0,
        KeyCode::End => state.drawer.scroll = last,
        KeyCode::Backspace => {
            let mut query = std::mem::take(&mut state.drawer.query);
            query.pop();
            state.set_query(query);
        }
        KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => {
            state.set_query(String::new());
        }
        KeyCode::Char(ch) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            let mut query = std::mem::take(&mut state.drawer.query);
            query.push(ch);
            state.set_query(query);
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match state.active_view {
        ActiveView::Sources => handle_drawer_mouse(state, mouse),
        ActiveView::Story => handle_story_mouse(state, mouse),
    }
}

fn handle_story_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = f64::from(state.config.scroll_step_rows);
    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_rows(step),
        MouseEventKind::ScrollUp => state.scroll_rows(-step),
        MouseEventKind::Moved => {
            state.hovered_dot = hit(&state.hit_zones.dots, mouse.column, mouse.row).copied();
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(&index) = hit(&state.hit_zones.dots, mouse.column, mouse.row) {
                state.jump_to_scene(index);
                return;
            }
            if let Some(id) = hit(&state.hit_zones.citations, mouse.column, mouse.row).cloned() {
                state.open_sources(Some(id));
            }
        }
        _ => {}
    }
}

fn handle_drawer_mouse(state: &mut AppState, mouse: MouseEvent) {
    let results = state.drawer.source_query().filter(&state.catalog).len();
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            state.drawer.scroll = (state.drawer.scroll + 1).min(results.saturating_sub(1));
        }
        MouseEventKind::ScrollUp => state.drawer.scroll = state.drawer.scroll.saturating_sub(1),
        MouseEventKind::Down(MouseButton::Left) => {
            let on_close = state
                .hit_zones
                .drawer_close
                .is_some_and(|r| point_in_rect(r, mouse.column, mouse.row));
            let inside = state
                .hit_zones
                .drawer
                .is_some_and(|r| point_in_rect(r, mouse.column, mouse.row));
            // Clicking the backdrop closes, like the close button.
            if on_close || !inside {
                state.close_sources();
            }
        }
        _ => {}
    }
}

fn hit<T>(zones: &[(Rect, T)], col: u16, row: u16) -> Option<&T> {
    zones
        .iter()
        .find(|(area, _)| point_in_rect(*area, col, row))
        .map(|(_, value)| value)
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::asset_runtime::MeshCache;
    use crate::config::AppConfig;
    use crate::core::animation::Motion;
    use crate::core::catalog::Catalog;
    use crossterm::event::KeyEventKind;

    fn state() -> AppState {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let meshes = MeshCache::new("does-not-exist".into(), tx);
        AppState::new(
            Catalog::builtin().unwrap(),
            AppConfig::default(),
            Motion::Reduced,
            meshes,
            Rect::new(0, 0, 120, 40),
        )
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let mut s = state();
        s.open_sources(None);
        let mut key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        key.kind = KeyEventKind::Press;
        handle_key(&mut s, key);
        assert!(s.should_quit);
    }

    #[test]
    fn number_key_jumps_to_scene() {
        let mut s = state();
        press(&mut s, KeyCode::Char('3'));
        s.tick(Instant::now());
        assert_eq!(s.view.scene, 2);
        assert!((s.view.progress - 0.19).abs() < 1e-6);
    }

    #[test]
    fn typing_in_drawer_filters_without_triggering_actions() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        assert_eq!(s.active_view, ActiveView::Sources);
        for ch in "quit".chars() {
            press(&mut s, KeyCode::Char(ch));
        }
        assert!(!s.should_quit);
        assert_eq!(s.drawer.query, "quit");
        press(&mut s, KeyCode::Backspace);
        assert_eq!(s.drawer.query, "qui");
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.active_view, ActiveView::Story);
    }

    #[test]
    fn dot_click_uses_recorded_zones() {
        let mut s = state();
        s.hit_zones.dots = vec![(Rect::new(110, 10, 2, 1), 4)];
        click(&mut s, 111, 10);
        s.tick(Instant::now());
        assert_eq!(s.view.scene, 4);
    }

    #[test]
    fn citation_click_opens_highlighted_drawer() {
        let mut s = state();
        s.hit_zones.citations = vec![(Rect::new(5, 5, 3, 1), "S_UNEP_2025_PR".into())];
        click(&mut s, 6, 5);
        assert_eq!(s.active_view, ActiveView::Sources);
        assert_eq!(s.drawer.highlighted.as_deref(), Some("S_UNEP_2025_PR"));

        // Click outside the drawer closes it and clears the highlight.
        s.hit_zones.drawer = Some(Rect::new(60, 0, 60, 40));
        click(&mut s, 1, 1);
        assert_eq!(s.active_view, ActiveView::Story);
        assert!(s.drawer.highlighted.is_none());
    }

    #[test]
    fn m_toggles_motion() {
        let mut s = state();
        press(&mut s, KeyCode::Char('m'));
        assert_eq!(s.motion, Motion::Full);
        assert_eq!(s.sampler.motion(), Motion::Full);
        press(&mut s, KeyCode::Char('m'));
        assert!(s.motion.is_reduced());
    }

    #[test]
    fn wheel_scrolls_story() {
        let mut s = state();
        handle_mouse(
            &mut s,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert!(s.sampler.offset_rows() > 0.0);
    }
}
