//! built-in theme presets
use crate::{
    impl_theme,
    theme::{
        ThemePreset, ThemeVariant,
        palette::{CorePalette, ExtendedPalette, ThemeColors},
    },
};

impl_theme!(Luxury, "Luxury", ThemeVariant::Dark, {
    ThemeColors::new(CorePalette {
        primary: "#0B0B0F".to_string(),
        accent: "#C9A227".to_string(),
    })
    .with_extended(ExtendedPalette {
        secondary: Some("#1C1A17".to_string()),
        background: Some("#08080A".to_string()),
        surface: Some("#15141A".to_string()),
        text: Some("#F4EFE6".to_string()),
        muted: Some("#9C958A".to_string()),
    })
});

impl_theme!(Classic, "Classic", ThemeVariant::Light, {
    ThemeColors::new(CorePalette {
        primary: "#1F2A44".to_string(),
        accent: "#8C1C13".to_string(),
    })
    .with_extended(ExtendedPalette {
        secondary: Some("#3A4A6B".to_string()),
        background: Some("#FBF8F3".to_string()),
        surface: Some("#FFFFFF".to_string()),
        text: Some("#1A1A1A".to_string()),
        muted: Some("#6B6B6B".to_string()),
    })
});

impl_theme!(Modern, "Modern", ThemeVariant::Light, {
    ThemeColors::new(CorePalette {
        primary: "#0F172A".to_string(),
        accent: "#14B8A6".to_string(),
    })
    .with_extended(ExtendedPalette {
        secondary: Some("#334155".to_string()),
        background: Some("#F8FAFC".to_string()),
        surface: Some("#FFFFFF".to_string()),
        text: Some("#0F172A".to_string()),
        muted: Some("#64748B".to_string()),
    })
});

impl_theme!(Minimal, "Minimal", ThemeVariant::Light, {
    ThemeColors::new(CorePalette {
        primary: "#111111".to_string(),
        accent: "#777777".to_string(),
    })
    .with_extended(ExtendedPalette {
        background: Some("#FFFFFF".to_string()),
        text: Some("#111111".to_string()),
        ..Default::default()
    })
});

impl_theme!(Emerald, "Emerald", ThemeVariant::Dark, {
    ThemeColors::new(CorePalette {
        primary: "#064E3B".to_string(),
        accent: "#D4AF37".to_string(),
    })
    .with_extended(ExtendedPalette {
        secondary: Some("#065F46".to_string()),
        background: Some("#022C22".to_string()),
        surface: Some("#053B2E".to_string()),
        text: Some("#ECFDF5".to_string()),
        muted: Some("#A7C4B8".to_string()),
    })
});
