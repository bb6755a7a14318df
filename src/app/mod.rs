//! the sitetheme binary
pub mod cli;
pub mod core;
pub mod logging;

pub use core::SiteThemeApp;
