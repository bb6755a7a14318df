//! the theme catalog: built-in palettes and the ordered registry that holds them
pub mod catalog;
pub mod metadata;
pub mod palette;
pub mod presets;

pub use {catalog::ThemeCatalog, metadata::Theme, palette::ThemeColors};

use {
    crate::error::ThemeError,
    serde::{Deserialize, Serialize},
    std::str::FromStr,
};

/// a built-in theme preset
pub trait ThemePreset {
    /// the colors of the theme
    fn colors() -> ThemeColors;
    /// the display name of the theme
    fn name() -> &'static str;
    /// the theme variant (light/dark)
    fn variant() -> ThemeVariant;
}

/// a theme variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// light variant
    Light,
    /// dark variant
    Dark,
}

impl FromStr for ThemeVariant {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeVariant::Light),
            "dark" => Ok(ThemeVariant::Dark),
            other => Err(ThemeError::Other(format!(
                "unknown theme variant `{}` (expected light or dark)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant() {
        assert_eq!("Dark".parse::<ThemeVariant>().unwrap(), ThemeVariant::Dark);
        assert_eq!("light".parse::<ThemeVariant>().unwrap(), ThemeVariant::Light);
        assert!("sepia".parse::<ThemeVariant>().is_err());
    }
}
