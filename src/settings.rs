//! Theme preference and palettes
//!
//! Persisted in the key-value store as the plain string "light" or "dark".

use crate::persistence::KeyValueStore;

/// Light or dark theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(&self) -> Theme {
        match self {
            ThemeMode::Light => Theme::LIGHT,
            ThemeMode::Dark => Theme::DARK,
        }
    }
}

/// Colors for one theme (CSS color strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Background gradient stops
    pub gradient: [&'static str; 3],
    pub card: &'static str,
    pub card_border: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub card_title: &'static str,
    pub card_description: &'static str,
    pub header_border: &'static str,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        gradient: ["#4158D0", "#C850C0", "#FFCC70"],
        card: "rgba(255, 255, 255, 0.95)",
        card_border: "rgba(255, 255, 255, 0.3)",
        title: "#000000",
        text: "#1C1C1E",
        card_title: "#1C1C1E",
        card_description: "#8E8E93",
        header_border: "rgba(0, 0, 0, 0.1)",
    };

    pub const DARK: Theme = Theme {
        gradient: ["#1A1A1A", "#2D2D2D", "#3D3D3D"],
        card: "rgba(45, 45, 45, 0.95)",
        card_border: "rgba(255, 255, 255, 0.1)",
        title: "#FFFFFF",
        text: "#FFFFFF",
        card_title: "#FFFFFF",
        card_description: "#FFFFFF",
        header_border: "rgba(255, 255, 255, 0.1)",
    };
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub theme: ThemeMode,
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "themePreference";

    /// Active palette
    pub fn palette(&self) -> Theme {
        self.theme.palette()
    }

    /// Load the stored preference, defaulting to light
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(value)) => match ThemeMode::parse(&value) {
                Some(theme) => {
                    log::info!("Loaded theme preference: {}", theme.as_str());
                    Self { theme }
                }
                None => {
                    log::warn!("Unknown theme preference {value:?}, using default");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Can't load theme preference: {e}");
                Self::default()
            }
        }
    }

    /// Save the preference (best effort)
    pub fn save(&self, store: &dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, self.theme.as_str()) {
            Ok(()) => log::info!("Theme preference saved"),
            Err(e) => log::warn!("Theme preference not saved: {e}"),
        }
    }

    /// Flip light/dark and save
    pub fn toggle_theme(&mut self, store: &dyn KeyValueStore) {
        self.theme = self.theme.toggled();
        self.save(store);
    }
}
