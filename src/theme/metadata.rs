//! theme metadata stuff
use {
    crate::theme::{ThemePreset, ThemeVariant, palette::ThemeColors},
    serde::Serialize,
};

/// one selectable visual identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// the id of the theme, stable across releases
    pub id: &'static str,
    /// the theme name
    pub name: &'static str,
    /// the theme variant (dark/light)
    pub variant: ThemeVariant,
    /// the theme colors
    pub colors: ThemeColors,
}

impl Theme {
    /// make a theme from a preset
    pub fn from_preset<T: ThemePreset>(id: &'static str) -> Self {
        Self {
            id,
            name: T::name(),
            variant: T::variant(),
            colors: T::colors(),
        }
    }

    /// make a theme from its parts
    pub fn new(
        id: &'static str,
        name: &'static str,
        variant: ThemeVariant,
        colors: ThemeColors,
    ) -> Self {
        Self {
            id,
            name,
            variant,
            colors,
        }
    }
}
