//! the single owner of "which theme is active"
//!
//! a [`ThemeContext`] is built once at startup from the catalog, the persisted
//! store and a token surface, and handed by reference to whatever needs the
//! theme. it is the only thing that changes the token surface after startup.
use {
    crate::{
        error::{Result, ThemeError},
        store::PersistedThemeStore,
        theme::{ThemeCatalog, metadata::Theme},
        tokens::{TokenSet, TokenSurface},
    },
    tracing::{debug, info},
};

/// a handle for removing a subscriber again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// a callback run after every successful theme change
type Subscriber = Box<dyn FnMut(&Theme)>;

/// process-wide theme state
pub struct ThemeContext {
    /// every selectable theme
    catalog: ThemeCatalog,
    /// index of the active theme in `catalog`
    current: usize,
    /// where the choice is remembered
    store: PersistedThemeStore,
    /// where the colors are shown
    surface: Box<dyn TokenSurface>,
    /// registered consumers, in registration order
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    /// the next subscription id to hand out
    next_subscription: u64,
}

impl ThemeContext {
    /// resolve the starting theme and paint it
    ///
    /// the starting theme is the saved one if it's still in the catalog, and the
    /// catalog's first theme otherwise
    ///
    /// # Errors
    ///
    /// returns an error if the surface can't be painted. a missing, unreadable or
    /// stale saved preference is never an error.
    pub fn new(
        catalog: ThemeCatalog,
        store: PersistedThemeStore,
        mut surface: Box<dyn TokenSurface>,
    ) -> Result<Self> {
        let saved = store.load();
        let theme = catalog.resolve(saved.as_deref());

        if let Some(saved) = saved.as_deref()
            && saved != theme.id
        {
            info!(
                "saved theme `{}` is no longer available, falling back to `{}`",
                saved, theme.id
            );
        }

        surface.apply(&TokenSet::from_colors(&theme.colors))?;
        let current = catalog.position(theme.id).unwrap_or(0);
        info!("starting with theme `{}`", theme.id);

        Ok(Self {
            catalog,
            current,
            store,
            surface,
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// the active theme
    pub fn theme(&self) -> &Theme {
        // `current` only ever comes from `catalog.position`
        &self.catalog.as_slice()[self.current]
    }

    /// the id of the active theme
    pub fn current_id(&self) -> &'static str {
        self.theme().id
    }

    /// every selectable theme, in display order
    pub fn themes(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// the surface the active theme is painted on
    pub fn surface(&self) -> &dyn TokenSurface {
        self.surface.as_ref()
    }

    /// switch to the theme with this id
    ///
    /// paints the surface, remembers the choice, then tells every subscriber, in
    /// that order. picking the active theme again repaints it harmlessly.
    ///
    /// # Errors
    ///
    /// returns [`ThemeError::InvalidThemeId`] if the catalog has no such theme
    /// returns an error if the surface can't be painted
    ///
    /// either way the active theme stays what it was
    pub fn set_theme(&mut self, id: &str) -> Result<&Theme> {
        let Some(index) = self.catalog.position(id) else {
            debug!("ignoring unknown theme `{}`", id);
            return Err(ThemeError::InvalidThemeId(id.to_string()));
        };

        let theme = &self.catalog.as_slice()[index];
        self.surface.apply(&TokenSet::from_colors(&theme.colors))?;
        self.current = index;
        self.store.save(theme.id);
        info!("switched theme to `{}`", theme.id);

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(theme);
        }

        Ok(theme)
    }

    /// run `f` after every successful [`ThemeContext::set_theme`]
    pub fn subscribe(&mut self, f: impl FnMut(&Theme) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// stop notifying a subscriber, returning whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("current", &self.current_id())
            .field("themes", &self.catalog.len())
            .field("store", &self.store)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
