//! applying a theme's colors to the token surface
//!
//! the token surface is the fixed set of `--<role>` css custom properties listed by
//! [`ColorRole`]. applying a theme rewrites every one of those slots (setting the
//! ones the theme defines, clearing the ones it doesn't) and leaves every other
//! variable alone, so applying twice is a no-op and switching themes never leaves
//! residue behind.
use {
    crate::{
        error::Result,
        theme::palette::{ColorRole, ThemeColors},
    },
    hashbrown::HashMap,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    tracing::debug,
};

/// the value every token slot should hold after applying a theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    /// one entry per [`ColorRole`], in [`ColorRole::ALL`] order
    slots: Vec<(ColorRole, Option<String>)>,
}

impl TokenSet {
    /// build the token set for a palette
    pub fn from_colors(colors: &ThemeColors) -> Self {
        Self {
            slots: ColorRole::ALL
                .iter()
                .map(|role| (*role, colors.get(*role).map(str::to_string)))
                .collect(),
        }
    }

    /// iterate over `(role, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, Option<&str>)> {
        self.slots
            .iter()
            .map(|(role, value)| (*role, value.as_deref()))
    }
}

/// something that can show a theme's colors
pub trait TokenSurface {
    /// write every slot of `tokens` to the surface
    ///
    /// # Errors
    ///
    /// implementations must either apply the whole set or leave the surface as it
    /// was and return an error
    fn apply(&mut self, tokens: &TokenSet) -> Result<()>;

    /// read a variable off the surface
    fn get(&self, var: &str) -> Option<&str>;

    /// render the surface as a `:root` block
    fn render(&self) -> String;
}

/// an in-memory set of css custom properties (the document root)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssVarSurface {
    /// the variables currently set
    vars: HashMap<String, String>,
}

impl CssVarSurface {
    /// make an empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// set a variable that isn't a color token (fonts, spacing, ...)
    ///
    /// color tokens only ever come from [`TokenSurface::apply`], so those names
    /// are ignored here
    pub fn with_var(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        let var = var.into();

        if ColorRole::is_token_var(&var) {
            debug!("ignoring `{}` outside of a theme apply", var);
        } else {
            self.vars.insert(var, value.into());
        }

        self
    }

    /// the surface that applying `tokens` would produce
    fn next_state(&self, tokens: &TokenSet) -> HashMap<String, String> {
        let mut next = self.vars.clone();

        for (role, value) in tokens.iter() {
            match value {
                Some(value) => {
                    next.insert(role.css_var().to_string(), value.to_string());
                }
                None => {
                    next.remove(role.css_var());
                }
            }
        }

        next
    }

    /// the number of variables set
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// whether no variables are set
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl TokenSurface for CssVarSurface {
    fn apply(&mut self, tokens: &TokenSet) -> Result<()> {
        self.vars = self.next_state(tokens);
        Ok(())
    }

    fn get(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }

    fn render(&self) -> String {
        let mut names: Vec<&String> = self.vars.keys().collect();
        // color tokens first in role order, everything else alphabetically after
        let rank = |var: &str| {
            ColorRole::ALL
                .iter()
                .position(|role| role.css_var() == var)
                .unwrap_or(ColorRole::ALL.len())
        };
        names.sort_by(|a, b| rank(a.as_str()).cmp(&rank(b.as_str())).then_with(|| a.cmp(b)));

        let mut css = String::from(":root {\n");
        for name in names {
            css.push_str(&format!("  {}: {};\n", name, self.vars[name]));
        }
        css.push_str("}\n");
        css
    }
}

/// a stylesheet file the site links to, kept in sync with an in-memory surface
#[derive(Debug, Clone)]
pub struct CssFileSurface {
    /// the stylesheet path
    path: PathBuf,
    /// what the file currently says
    inner: CssVarSurface,
}

impl CssFileSurface {
    /// make a surface that writes to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: CssVarSurface::new(),
        }
    }

    /// the stylesheet path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// write `css` next to the target and move it into place
    fn write_atomically(&self, css: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, css)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        Ok(())
    }
}

impl TokenSurface for CssFileSurface {
    fn apply(&mut self, tokens: &TokenSet) -> Result<()> {
        let next = CssVarSurface {
            vars: self.inner.next_state(tokens),
        };

        self.write_atomically(&next.render())?;
        debug!("wrote theme stylesheet to {}", self.path.display());
        self.inner = next;

        Ok(())
    }

    fn get(&self, var: &str) -> Option<&str> {
        self.inner.get(var)
    }

    fn render(&self) -> String {
        self.inner.render()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::theme::palette::{CorePalette, ExtendedPalette},
        tempfile::TempDir,
    };

    fn rich() -> ThemeColors {
        ThemeColors::new(CorePalette {
            primary: "#111".to_string(),
            accent: "#222".to_string(),
        })
        .with_extended(ExtendedPalette {
            surface: Some("#333".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let tokens = TokenSet::from_colors(&rich());
        let mut once = CssVarSurface::new();
        once.apply(&tokens).unwrap();

        let mut twice = once.clone();
        twice.apply(&tokens).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.render(), twice.render());
    }

    #[test]
    fn test_switch_leaves_no_residue() {
        let mut surface = CssVarSurface::new();
        surface.apply(&TokenSet::from_colors(&rich())).unwrap();
        assert_eq!(surface.get("--surface"), Some("#333"));

        surface
            .apply(&TokenSet::from_colors(&ThemeColors::pair("#444", "#555")))
            .unwrap();

        assert_eq!(surface.get("--surface"), None);
        assert_eq!(surface.get("--primary"), Some("#444"));
        assert_eq!(surface.len(), 2);
    }

    #[test]
    fn test_other_vars_untouched() {
        let mut surface = CssVarSurface::new().with_var("--font-body", "Inter");
        surface.apply(&TokenSet::from_colors(&rich())).unwrap();

        assert_eq!(surface.get("--font-body"), Some("Inter"));
        assert_eq!(
            surface.render(),
            ":root {\n  --primary: #111;\n  --accent: #222;\n  --surface: #333;\n  --font-body: Inter;\n}\n"
        );
    }

    #[test]
    fn test_with_var_ignores_color_tokens() {
        let surface = CssVarSurface::new()
            .with_var("--primary", "#fff")
            .with_var("--radius", "6px");

        assert_eq!(surface.get("--primary"), None);
        assert_eq!(surface.get("--radius"), Some("6px"));
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_file_surface_writes_stylesheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public").join("theme.css");
        let mut surface = CssFileSurface::new(&path);

        surface.apply(&TokenSet::from_colors(&rich())).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, surface.render());
        assert!(written.contains("--accent: #222;"));
    }

    #[test]
    fn test_file_surface_failure_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut surface = CssFileSurface::new(dir.path());

        assert!(surface.apply(&TokenSet::from_colors(&rich())).is_err());
        assert_eq!(surface.get("--primary"), None);
    }
}
