/// Popup theme preference, persisted in localStorage
const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_str(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Toggle button icon: the sun offers the way back to light mode.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

/// Read the persisted theme, defaulting to light when absent or unreadable.
pub fn load() -> Theme {
    web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten())
        .map(|value| Theme::from_str(&value))
        .unwrap_or_default()
}

/// Persist the theme. A storage failure is logged and otherwise ignored.
pub fn save(theme: Theme) {
    let stored = web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .map(|storage| storage.set_item(STORAGE_KEY, theme.as_str()));

    if !matches!(stored, Some(Ok(()))) {
        log::warn!("failed to persist theme preference");
    }
}
