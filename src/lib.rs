//! sitetheme picks, applies, persists and mirrors the visual theme of a site
//!
//! a [`ThemeContext`] owns the active theme. it paints a [`TokenSurface`],
//! remembers the choice in a [`PersistedThemeStore`] and notifies subscribers.
//! the [`ThemeSwitcher`] is the picker state machine on top of it, and
//! [`settings::RemoteSettingsMirror`] pushes snapshots to a hosted table.
#![forbid(
    clippy::missing_docs_in_private_items,
    missing_docs,
    rustdoc::missing_crate_level_docs
)]

#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod macros;
pub mod settings;
pub mod store;
pub mod switcher;
pub mod theme;
pub mod tokens;
pub mod utils;

pub use {
    context::{SubscriptionId, ThemeContext},
    error::{Result, ThemeError},
    store::PersistedThemeStore,
    switcher::ThemeSwitcher,
    theme::{Theme, ThemeCatalog, ThemeColors},
    tokens::{TokenSet, TokenSurface},
};
