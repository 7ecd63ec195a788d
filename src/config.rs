//! User configuration: reading preferences, keybindings and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scrollytell/config.toml` (default
//! `~/.config/scrollytell/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::sampler::{SamplerConfig, DEFAULT_SCENE_HEIGHT_PCT, DEFAULT_SMOOTHING};

pub const DEFAULT_SCROLL_STEP_ROWS: u16 = 3;

// ───────────────────────────────────────── actions ───────────

/// All rebindable reader actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    PrevScene,
    NextScene,
    OpenSources,
    Cite,
    ToggleMotion,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when serialising).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::PrevScene,
        Action::NextScene,
        Action::OpenSources,
        Action::Cite,
        Action::ToggleMotion,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::Top => "Beginning",
            Action::Bottom => "End",
            Action::PrevScene => "Previous Scene",
            Action::NextScene => "Next Scene",
            Action::OpenSources => "Sources",
            Action::Cite => "Cite",
            Action::ToggleMotion => "Reduce Motion",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::PrevScene => "prev_scene",
            Action::NextScene => "next_scene",
            Action::OpenSources => "open_sources",
            Action::Cite => "cite",
            Action::ToggleMotion => "toggle_motion",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"PageDown"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Down"`, `"n"`, `"Space"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Reader preferences and keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Persistent reduced-motion preference.
    pub reduced_motion: bool,
    /// Damping constant for progress smoothing.
    pub smoothing: f64,
    /// Rows moved per wheel notch or arrow key.
    pub scroll_step_rows: u16,
    /// Scroll height of one scene, in percent of the viewport.
    pub scene_height_pct: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            reduced_motion: false,
            smoothing: DEFAULT_SMOOTHING,
            scroll_step_rows: DEFAULT_SCROLL_STEP_ROWS,
            scene_height_pct: DEFAULT_SCENE_HEIGHT_PCT,
        }
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(
            Action::PageDown,
            vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)],
        );
        m.insert(Top, vec![KeyBind::new(Home, n)]);
        m.insert(Bottom, vec![KeyBind::new(End, n)]);
        m.insert(PrevScene, vec![KeyBind::new(Char('p'), n), KeyBind::new(Left, n)]);
        m.insert(NextScene, vec![KeyBind::new(Char('n'), n), KeyBind::new(Right, n)]);
        m.insert(OpenSources, vec![KeyBind::new(Char('s'), n)]);
        m.insert(Cite, vec![KeyBind::new(Char('c'), n)]);
        m.insert(ToggleMotion, vec![KeyBind::new(Char('m'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Char('c'), ctrl)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status line).
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-line hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: scene | {}: sources | {}: motion | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::PrevScene),
            self.short_binding(Action::NextScene),
            self.short_binding(Action::OpenSources),
            self.short_binding(Action::ToggleMotion),
            self.short_binding(Action::Quit),
        )
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            smoothing: self.smoothing,
            scene_height_pct: self.scene_height_pct,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => return Self::parse_config(&contents),
                Err(err) => {
                    tracing::warn!(path = %path.display(), "unreadable config, using defaults: {err}")
                }
            }
        }
        Self::default()
    }

    /// Write the config out, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for (n, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = n + 1, "config line without `=` ignored");
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Reader settings.
            match key {
                "reduced_motion" => {
                    config.reduced_motion = value == "true";
                    continue;
                }
                "smoothing" => {
                    match value.parse::<f64>() {
                        Ok(v) if v.is_finite() => config.smoothing = v.clamp(0.02, 1.0),
                        _ => tracing::warn!(value, "bad smoothing, keeping default"),
                    }
                    continue;
                }
                "scroll_step_rows" => {
                    match value.parse::<u16>() {
                        Ok(v) => config.scroll_step_rows = v.clamp(1, 50),
                        Err(_) => tracing::warn!(value, "bad scroll_step_rows, keeping default"),
                    }
                    continue;
                }
                "scene_height_pct" => {
                    match value.parse::<u16>() {
                        Ok(v) => config.scene_height_pct = v.clamp(10, 1000),
                        Err(_) => tracing::warn!(value, "bad scene_height_pct, keeping default"),
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key, "unknown config key ignored");
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# scrollytell configuration".to_string(),
            String::new(),
            "# Reader settings".to_string(),
            format!("reduced_motion = {}", self.reduced_motion),
            format!("smoothing = {}", self.smoothing),
            format!("scroll_step_rows = {}", self.scroll_step_rows),
            format!("scene_height_pct = {}", self.scene_height_pct),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Truthy values of the `REDUCE_MOTION` environment variable.
pub fn env_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Startup reduced-motion preference: any one source turns it on.
pub fn resolve_reduced_motion(cli: bool, config: &AppConfig, env: Option<&str>) -> bool {
    cli || config.reduced_motion || env_flag(env)
}

/// Return the config file path (`$XDG_CONFIG_HOME/scrollytell/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scrollytell").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_cover_every_action() {
        let config = AppConfig::default();
        for action in Action::ALL {
            assert!(config.bindings.contains_key(action), "{action:?} unbound");
        }
        assert_eq!(
            config.match_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(Action::Cite)
        );
    }

    #[test]
    fn parse_reads_settings_and_rebinds() {
        let config = AppConfig::parse_config(
            "reduced_motion = true\nsmoothing = 5\nscroll_step_rows = 7\nnext_scene = Tab, Shift+Down\nbogus = 1\n",
        );
        assert!(config.reduced_motion);
        assert_eq!(config.smoothing, 1.0);
        assert_eq!(config.scroll_step_rows, 7);
        assert_eq!(config.scene_height_pct, DEFAULT_SCENE_HEIGHT_PCT);
        assert_eq!(
            config.match_key(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::NextScene)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Down, KeyModifiers::SHIFT)),
            Some(Action::NextScene)
        );
        // `n` was replaced, not kept alongside.
        assert_eq!(config.match_key(key(KeyCode::Char('n'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = AppConfig::parse_config("smoothing = fast\nscene_height_pct = -3\nquit = \n");
        assert_eq!(config.smoothing, DEFAULT_SMOOTHING);
        assert_eq!(config.scene_height_pct, DEFAULT_SCENE_HEIGHT_PCT);
        assert_eq!(
            config.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig {
            reduced_motion: true,
            scene_height_pct: 200,
            ..AppConfig::default()
        };
        config
            .bindings
            .insert(Action::Cite, vec![KeyBind::new(KeyCode::Char('C'), KeyModifiers::SHIFT)]);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert!(loaded.reduced_motion);
        assert_eq!(loaded.scene_height_pct, 200);
        assert_eq!(loaded.bindings.get(&Action::Cite), config.bindings.get(&Action::Cite));
        assert_eq!(loaded.bindings.get(&Action::PageDown), config.bindings.get(&Action::PageDown));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert!(!loaded.reduced_motion);
        assert_eq!(loaded.scroll_step_rows, DEFAULT_SCROLL_STEP_ROWS);
    }

    #[test]
    fn reduced_motion_sources_combine() {
        let config = AppConfig::default();
        assert!(!resolve_reduced_motion(false, &config, None));
        assert!(resolve_reduced_motion(true, &config, None));
        assert!(resolve_reduced_motion(false, &config, Some("Yes")));
        assert!(!resolve_reduced_motion(false, &config, Some("0")));
        let on = AppConfig {
            reduced_motion: true,
            ..AppConfig::default()
        };
        assert!(resolve_reduced_motion(false, &on, Some("off")));
    }
}
