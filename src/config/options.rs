//! every available configuration option and its type is listed in this file
use {
    crate::config::validate::{Validate, format_validation_errors},
    color_eyre::{
        Section, SectionExt,
        eyre::{Context, OptionExt, Result, eyre},
    },
    config::{Config, ConfigBuilder},
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    smart_default::SmartDefault,
    std::path::{Path, PathBuf},
    tracing::info,
};

/// the config file name, both globally and locally
pub const CONFIG_FILE_NAME: &str = "sitetheme.toml";

/// the prefix for environment overrides (`SITETHEME_THEME__PERSIST=false`)
pub const ENV_PREFIX: &str = "SITETHEME";

/// Settings for the active theme and where it's kept
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct ThemeCfg {
    /// Remember the chosen theme between runs
    #[default(Some(true))]
    pub persist: Option<bool>,

    /// Where the chosen theme is remembered
    #[default(Some(default_store_path()))]
    pub store_path: Option<String>,

    /// Write the active theme's `:root` block to this file on every change
    #[default(None)]
    pub stylesheet: Option<String>,
}

/// Settings for the hosted settings table
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct RemoteCfg {
    /// The base url of the record store (leave unset to disable mirroring)
    #[default(None)]
    pub base_url: Option<String>,

    /// The table settings rows live in
    #[default(Some("site_settings".to_string()))]
    pub table: Option<String>,

    /// The api key sent with every request
    #[default(None)]
    pub api_key: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, SmartDefault)]
/// The format to log in
pub enum LoggingFormat {
    /// Use the compact output format
    Compact,

    /// Use a pretty, multi-line output format
    #[default]
    Pretty,
}

/// Settings for logging
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct LoggingConfig {
    /// Enable logging
    #[default(Some(true))]
    pub enable: Option<bool>,

    /// The max level to log at
    #[default(Some("warn".to_string()))]
    pub level: Option<String>,

    /// The output format
    #[default(Some(LoggingFormat::Compact))]
    pub format: Option<LoggingFormat>,

    /// Enable ANSI escape codes for colors and stuff
    #[default(Some(true))]
    pub asni: Option<bool>,

    /// Display event targets in log messages
    #[default(Some(false))]
    pub event_targets: Option<bool>,

    /// Display line numbers in log messages
    #[default(Some(false))]
    pub line_numbers: Option<bool>,
}

/// sitetheme configuration
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct SiteThemeCfg {
    /// The config version
    #[default(Some(env!("CARGO_PKG_VERSION").to_string()))]
    pub version: Option<String>,

    /// Theme settings
    #[default(Some(ThemeCfg::default()))]
    pub theme: Option<ThemeCfg>,

    /// Remote settings mirror
    #[default(Some(RemoteCfg::default()))]
    pub remote: Option<RemoteCfg>,

    /// Logging settings
    #[default(Some(LoggingConfig::default()))]
    pub logging: Option<LoggingConfig>,
}

/// the default preference store location
fn default_store_path() -> String {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sitetheme")
        .join("preferences.redb")
        .to_string_lossy()
        .into_owned()
}

impl SiteThemeCfg {
    /// load config from default locations
    ///
    /// load prio: env > local > global > defaults
    pub fn load() -> Result<Self> {
        let global_config_path = Self::global_config_path()?;
        let mut builder = Self::create_builder(Self::default())?;

        builder = builder.add_source(config::File::from(global_config_path).required(false));

        if let Some(local_config) = Self::find_local_config()? {
            builder = builder.add_source(config::File::from(local_config).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = builder.build().wrap_err("Failed to build configuration")?;
        let cfg: SiteThemeCfg = settings
            .try_deserialize::<SiteThemeCfg>()
            .wrap_err("Failed to deserialize configuration")?;

        cfg.run_validation()?;
        info!("Configuration validation successful");

        Ok(cfg)
    }

    /// get the global config file path
    pub fn global_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_eyre("Unable to determine system config directory")
            .suggestion("Ensure XDG_CONFIG_HOME or HOME environment variables are set")
            .suggestion("On Windows, APPDATA should be set")?;

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// create a config builder with defaults
    fn create_builder(
        defaults: SiteThemeCfg,
    ) -> Result<ConfigBuilder<config::builder::DefaultState>> {
        let builder = Config::builder();
        let config_source = config::Config::try_from(&defaults)
            .wrap_err("Failed to convert default config to a config source")?;

        Ok(builder.add_source(config_source))
    }

    /// run validation and return a pretty error if it fails
    fn run_validation(&self) -> Result<()> {
        self.validate()
            .map_err(|errors| {
                let formatted = format_validation_errors(&errors);
                eyre!(formatted)
            })
            .wrap_err("config validation failed")
            .suggestion("Check your sitetheme.toml for invalid values")
            .suggestion("Run `sitetheme --gen-default` to see valid options")
    }

    /// find the nearest local config file
    fn find_local_config() -> Result<Option<PathBuf>> {
        let curr_dir = std::env::current_dir()
            .wrap_err("Failed to get current working directory")
            .suggestion("Ensure the current directory exists and is accessible")?;

        Ok(Self::find_config_in(&curr_dir))
    }

    /// find the config file closest to `dir`, walking up its ancestors
    pub fn find_config_in(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|path| path.exists())
    }

    /// save config to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let toml_str =
            toml::to_string_pretty(self).wrap_err("Failed to serialize config to TOML")?;

        std::fs::write(path, &toml_str)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))
            .with_section(|| path.display().to_string().header("File path"))
            .with_section(|| format!("{} bytes", toml_str.len()).header("Content size:"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, tempfile::tempdir};

    #[test]
    fn test_defaults_are_valid() {
        let defaults = SiteThemeCfg::default();
        assert!(defaults.is_valid());

        let theme = defaults.theme.unwrap();
        assert_eq!(theme.persist, Some(true));
        assert!(theme.store_path.unwrap().ends_with("preferences.redb"));
        assert_eq!(defaults.remote.unwrap().base_url, None);
    }

    #[test]
    fn test_defaults_survive_toml() {
        let toml_str = toml::to_string_pretty(&SiteThemeCfg::default()).unwrap();
        let parsed: SiteThemeCfg = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            parsed.remote.and_then(|r| r.table).as_deref(),
            Some("site_settings")
        );
    }

    #[test]
    fn test_layered_sources() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[theme]\npersist = false\n\n[remote]\nbase_url = \"https://db.example.com\"\n",
        )
        .unwrap();

        let cfg: SiteThemeCfg = SiteThemeCfg::create_builder(SiteThemeCfg::default())
            .unwrap()
            .add_source(config::File::from(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let theme = cfg.theme.unwrap();
        assert_eq!(theme.persist, Some(false));
        assert!(theme.store_path.is_some());
        assert_eq!(
            cfg.remote.and_then(|r| r.base_url).as_deref(),
            Some("https://db.example.com")
        );
    }

    #[test]
    fn test_find_config_in_ancestors() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("site").join("pages");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(SiteThemeCfg::find_config_in(&nested), None);

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(
            SiteThemeCfg::find_config_in(&nested),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
    }
}
