//! pallete creation stuff
use {
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// a named slot on the token surface
///
/// every role maps to exactly one css custom property (`--<role>`), and this list
/// is the whole surface the rest of the site is allowed to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    /// main brand color
    Primary,
    /// accent color for calls to action
    Accent,
    /// secondary brand color
    Secondary,
    /// page background
    Background,
    /// cards and raised sections
    Surface,
    /// body text
    Text,
    /// less important text
    Muted,
}

impl ColorRole {
    /// every role, in the order they're written to the surface
    pub const ALL: [ColorRole; 7] = [
        ColorRole::Primary,
        ColorRole::Accent,
        ColorRole::Secondary,
        ColorRole::Background,
        ColorRole::Surface,
        ColorRole::Text,
        ColorRole::Muted,
    ];

    /// the role name
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Accent => "accent",
            ColorRole::Secondary => "secondary",
            ColorRole::Background => "background",
            ColorRole::Surface => "surface",
            ColorRole::Text => "text",
            ColorRole::Muted => "muted",
        }
    }

    /// the css custom property this role is written to
    pub const fn css_var(&self) -> &'static str {
        match self {
            ColorRole::Primary => "--primary",
            ColorRole::Accent => "--accent",
            ColorRole::Secondary => "--secondary",
            ColorRole::Background => "--background",
            ColorRole::Surface => "--surface",
            ColorRole::Text => "--text",
            ColorRole::Muted => "--muted",
        }
    }

    /// whether a css variable name belongs to the token surface
    pub fn is_token_var(var: &str) -> bool {
        Self::ALL.iter().any(|role| role.css_var() == var)
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// the core colors every theme needs
///
/// the switcher draws its two-dot preview from exactly these two
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorePalette {
    /// main brand color
    pub primary: String,
    /// accent color
    pub accent: String,
}

/// optional extended palette colors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedPalette {
    /// secondary brand color
    pub secondary: Option<String>,
    /// page background
    pub background: Option<String>,
    /// raised surface color
    pub surface: Option<String>,
    /// body text color
    pub text: Option<String>,
    /// muted text color
    pub muted: Option<String>,
}

/// complete theme color configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// required core palette
    pub core: CorePalette,
    /// optional extended palette
    pub extended: ExtendedPalette,
}

impl ThemeColors {
    /// make new theme colors
    pub fn new(core: CorePalette) -> Self {
        Self {
            core,
            extended: ExtendedPalette::default(),
        }
    }

    /// shorthand for a palette with only the two required roles
    pub fn pair(primary: impl Into<String>, accent: impl Into<String>) -> Self {
        Self::new(CorePalette {
            primary: primary.into(),
            accent: accent.into(),
        })
    }

    /// set the extension pallete
    pub fn with_extended(mut self, extended: ExtendedPalette) -> Self {
        self.extended = extended;
        self
    }

    /// the primary color
    pub fn primary(&self) -> &str {
        &self.core.primary
    }

    /// the accent color
    pub fn accent(&self) -> &str {
        &self.core.accent
    }

    /// get the value of a role, if the theme sets it
    pub fn get(&self, role: ColorRole) -> Option<&str> {
        match role {
            ColorRole::Primary => Some(&self.core.primary),
            ColorRole::Accent => Some(&self.core.accent),
            ColorRole::Secondary => self.extended.secondary.as_deref(),
            ColorRole::Background => self.extended.background.as_deref(),
            ColorRole::Surface => self.extended.surface.as_deref(),
            ColorRole::Text => self.extended.text.as_deref(),
            ColorRole::Muted => self.extended.muted.as_deref(),
        }
    }
}

/// check that a string looks like a css hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`)
pub fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };

    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// the red, green and blue channels of a css hex color, ignoring any alpha
pub fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    if !is_hex_color(value) {
        return None;
    }

    let hex = &value[1..];
    let channel = |i: usize| -> Option<u8> {
        if hex.len() == 3 {
            let digit = u8::from_str_radix(&hex[i..i + 1], 16).ok()?;
            Some(digit * 17)
        } else {
            u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()
        }
    };

    Some((channel(0)?, channel(1)?, channel(2)?))
}
