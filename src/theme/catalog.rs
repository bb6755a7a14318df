//! the ordered theme catalog
use {
    crate::{
        error::{Result, ThemeError},
        theme::{ThemeVariant, metadata::Theme, presets::*},
    },
    hashbrown::HashSet,
};

/// the static, ordered registry of every selectable theme
///
/// order is display order, and the first entry is the fallback for any id the
/// catalog doesn't know. a catalog is never empty and never holds two themes
/// with the same id.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    /// the installed themes, in display order
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// the built-in catalog
    pub fn builtin() -> Self {
        Self {
            themes: vec![
                Theme::from_preset::<Luxury>("luxury"),
                Theme::from_preset::<Classic>("classic"),
                Theme::from_preset::<Modern>("modern"),
                Theme::from_preset::<Minimal>("minimal"),
                Theme::from_preset::<Emerald>("emerald"),
            ],
        }
    }

    /// make a catalog from a list of themes
    ///
    /// # Errors
    ///
    /// returns [`ThemeError::EmptyCatalog`] if `themes` is empty
    /// returns [`ThemeError::DuplicateThemeId`] if two themes share an id
    pub fn from_themes(themes: Vec<Theme>) -> Result<Self> {
        if themes.is_empty() {
            return Err(ThemeError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(themes.len());
        for theme in &themes {
            if !seen.insert(theme.id) {
                return Err(ThemeError::DuplicateThemeId(theme.id.to_string()));
            }
        }

        Ok(Self { themes })
    }

    /// get a theme by its id
    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.id == id)
    }

    /// whether the catalog has a theme with this id
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// the display position of a theme
    pub fn position(&self, id: &str) -> Option<usize> {
        self.themes.iter().position(|theme| theme.id == id)
    }

    /// the fallback theme (first entry)
    pub fn default_theme(&self) -> &Theme {
        // from_themes and builtin both guarantee at least one entry
        &self.themes[0]
    }

    /// resolve an id, falling back to the default theme if it's unknown
    pub fn resolve(&self, id: Option<&str>) -> &Theme {
        id.and_then(|id| self.get(id))
            .unwrap_or_else(|| self.default_theme())
    }

    /// list theme ids in display order
    pub fn ids(&self) -> Vec<&'static str> {
        self.themes.iter().map(|theme| theme.id).collect()
    }

    /// list themes by variant
    pub fn list_by_variant(&self, variant: ThemeVariant) -> Vec<&'static str> {
        self.themes
            .iter()
            .filter(|theme| theme.variant == variant)
            .map(|theme| theme.id)
            .collect()
    }

    /// the themes in display order
    pub fn as_slice(&self) -> &[Theme] {
        &self.themes
    }

    /// iterate over the themes in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Theme> {
        self.themes.iter()
    }

    /// the number of themes
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// always false, a catalog can't be empty
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a ThemeCatalog {
    type Item = &'a Theme;
    type IntoIter = std::slice::Iter<'a, Theme>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
