//! config singleton management stuff
use {
    crate::config::options::SiteThemeCfg,
    color_eyre::{Result, eyre::Context},
    std::sync::{LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard},
    tracing::warn,
};

/// global config instance
///
/// a config that fails to load here falls back to the defaults; call
/// [`init_config`] first to surface the error instead
static CONFIG: LazyLock<RwLock<SiteThemeCfg>> = LazyLock::new(|| {
    RwLock::new(SiteThemeCfg::load().unwrap_or_else(|e| {
        warn!("failed to load configuration, using defaults: {:#}", e);
        SiteThemeCfg::default()
    }))
});

/// load the config from disk and install it, reporting any error
pub fn init_config() -> Result<()> {
    let loaded = SiteThemeCfg::load()?;
    *config_mut().wrap_err("failed to acquire write lock for cfg init")? = loaded;
    Ok(())
}

/// get a ro ref to the config
pub fn config() -> Result<RwLockReadGuard<'static, SiteThemeCfg>> {
    CONFIG
        .read()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration lock poisoned: {}", e))
}

/// get a rw ref to the config
pub fn config_mut() -> Result<RwLockWriteGuard<'static, SiteThemeCfg>> {
    CONFIG
        .write()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration lock poisoned: {}", e))
}

/// get a specific config value with a default fallback
pub fn get_or_default<T, F>(getter: F, default: T) -> T
where
    F: FnOnce(&SiteThemeCfg) -> Option<T>,
    T: Clone,
{
    config()
        .ok()
        .and_then(|cfg| getter(&cfg))
        .unwrap_or(default)
}
