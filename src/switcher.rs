//! the floating theme picker
use {
    crate::{context::ThemeContext, error::Result},
    serde::Serialize,
    tracing::debug,
};

/// whether the picker is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwitcherState {
    /// only the activation button is showing
    #[default]
    Closed,
    /// the theme list is showing
    Open,
}

/// one row in the open picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherEntry {
    /// the theme id
    pub id: &'static str,
    /// the display name
    pub name: &'static str,
    /// the first preview dot
    pub primary: String,
    /// the second preview dot
    pub accent: String,
    /// whether this is the active theme
    pub active: bool,
}

/// the picker's open/closed state machine
///
/// `Closed -activate-> Open`, then either `-select(id)-> Closed` (switching to
/// `id`) or `-dismiss-> Closed` (switching nothing). it can be reopened forever.
#[derive(Debug, Clone, Default)]
pub struct ThemeSwitcher {
    /// the current state
    state: SwitcherState,
}

impl ThemeSwitcher {
    /// a closed picker
    pub fn new() -> Self {
        Self::default()
    }

    /// the current state
    pub fn state(&self) -> SwitcherState {
        self.state
    }

    /// whether the list is showing
    pub fn is_open(&self) -> bool {
        self.state == SwitcherState::Open
    }

    /// open the picker, returning whether it was closed before
    pub fn activate(&mut self) -> bool {
        match self.state {
            SwitcherState::Closed => {
                debug!("theme switcher opened");
                self.state = SwitcherState::Open;
                true
            }
            SwitcherState::Open => false,
        }
    }

    /// close the picker without picking anything, returning whether it was open
    pub fn dismiss(&mut self) -> bool {
        match self.state {
            SwitcherState::Open => {
                debug!("theme switcher dismissed");
                self.state = SwitcherState::Closed;
                true
            }
            SwitcherState::Closed => false,
        }
    }

    /// pick a theme from the open list
    ///
    /// returns `Ok(true)` if the theme was switched and the picker closed, and
    /// `Ok(false)` if the picker wasn't open (nothing happens)
    ///
    /// # Errors
    ///
    /// returns the error from [`ThemeContext::set_theme`], in which case the picker
    /// stays open
    pub fn select(&mut self, ctx: &mut ThemeContext, id: &str) -> Result<bool> {
        if self.state == SwitcherState::Closed {
            debug!("ignoring selection of `{}` while the switcher is closed", id);
            return Ok(false);
        }

        ctx.set_theme(id)?;
        self.state = SwitcherState::Closed;

        Ok(true)
    }

    /// the rows to show, in catalog order
    pub fn entries(&self, ctx: &ThemeContext) -> Vec<SwitcherEntry> {
        let current = ctx.current_id();

        ctx.themes()
            .iter()
            .map(|theme| SwitcherEntry {
                id: theme.id,
                name: theme.name,
                primary: theme.colors.primary().to_string(),
                accent: theme.colors.accent().to_string(),
                active: theme.id == current,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            error::ThemeError,
            store::{MemoryBackend, PersistedThemeStore},
            theme::{Theme, ThemeCatalog, ThemeColors, ThemeVariant},
            tokens::CssVarSurface,
        },
    };

    fn context() -> ThemeContext {
        let catalog = ThemeCatalog::from_themes(vec![
            Theme::new("luxury", "Luxury", ThemeVariant::Dark, ThemeColors::pair("#111", "#222")),
            Theme::new("classic", "Classic", ThemeVariant::Light, ThemeColors::pair("#333", "#444")),
        ])
        .unwrap();

        ThemeContext::new(
            catalog,
            PersistedThemeStore::new(MemoryBackend::new()),
            Box::new(CssVarSurface::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_activate_select_closes_and_switches() {
        let mut ctx = context();
        let mut switcher = ThemeSwitcher::new();
        assert_eq!(switcher.state(), SwitcherState::Closed);

        assert!(switcher.activate());
        assert!(switcher.select(&mut ctx, "classic").unwrap());

        assert_eq!(switcher.state(), SwitcherState::Closed);
        assert_eq!(ctx.current_id(), "classic");
    }

    #[test]
    fn test_activate_dismiss_changes_nothing() {
        let mut ctx = context();
        let mut switcher = ThemeSwitcher::new();

        switcher.activate();
        assert!(switcher.dismiss());

        assert_eq!(switcher.state(), SwitcherState::Closed);
        assert_eq!(ctx.current_id(), "luxury");
        assert!(!switcher.select(&mut ctx, "classic").unwrap());
        assert_eq!(ctx.current_id(), "luxury");
    }

    #[test]
    fn test_unknown_selection_stays_open() {
        let mut ctx = context();
        let mut switcher = ThemeSwitcher::new();
        switcher.activate();

        assert!(matches!(
            switcher.select(&mut ctx, "nonexistent"),
            Err(ThemeError::InvalidThemeId(_))
        ));
        assert!(switcher.is_open());
        assert_eq!(ctx.current_id(), "luxury");
    }

    #[test]
    fn test_reentrant_and_reselect_active() {
        let mut ctx = context();
        let mut switcher = ThemeSwitcher::new();

        for _ in 0..3 {
            assert!(switcher.activate());
            assert!(!switcher.activate());
            assert!(switcher.select(&mut ctx, "luxury").unwrap());
            assert!(!switcher.dismiss());
        }

        assert_eq!(ctx.current_id(), "luxury");
    }

    #[test]
    fn test_entries_preview_and_active_marker() {
        let mut ctx = context();
        let switcher = ThemeSwitcher::new();
        ctx.set_theme("classic").unwrap();

        let entries = switcher.entries(&ctx);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "luxury");
        assert_eq!((entries[0].primary.as_str(), entries[0].accent.as_str()), ("#111", "#222"));
        assert!(!entries[0].active);
        assert!(entries[1].active);
    }
}
