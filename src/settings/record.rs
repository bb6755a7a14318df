//! settings rows and their per-key schemas
use {
    crate::error::{Result, ThemeError},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// the keys we know a schema for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKey {
    /// the site theme snapshot
    Theme,
    /// search engine metadata
    Seo,
    /// public contact details
    Contact,
}

impl SettingKey {
    /// the row key
    pub const fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Theme => "theme",
            SettingKey::Seo => "seo",
            SettingKey::Contact => "contact",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "theme" => Ok(SettingKey::Theme),
            "seo" => Ok(SettingKey::Seo),
            "contact" => Ok(SettingKey::Contact),
            other => Err(ThemeError::UnknownSettingKey(other.to_string())),
        }
    }
}

/// the value of the `theme` row
///
/// `available` is a snapshot of the catalog ids at save time and is never read
/// back into the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSetting {
    /// the theme id that was active
    pub current: String,
    /// every catalog id, in display order
    pub available: Vec<String>,
}

/// the value of the `seo` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoSetting {
    /// appended to every page title
    pub title_suffix: String,
    /// the default meta description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// the value of the `contact` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSetting {
    /// where the contact form sends leads
    pub email: String,
    /// the phone number shown in the footer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// a settings value, tagged by its key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// the theme snapshot
    Theme(ThemeSetting),
    /// seo metadata
    Seo(SeoSetting),
    /// contact details
    Contact(ContactSetting),
}

impl Setting {
    /// the key this value is stored under
    pub fn key(&self) -> SettingKey {
        match self {
            Setting::Theme(_) => SettingKey::Theme,
            Setting::Seo(_) => SettingKey::Seo,
            Setting::Contact(_) => SettingKey::Contact,
        }
    }

    /// the value as json
    fn to_value(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Setting::Theme(v) => serde_json::to_value(v)?,
            Setting::Seo(v) => serde_json::to_value(v)?,
            Setting::Contact(v) => serde_json::to_value(v)?,
        })
    }

    /// parse the value of a row stored under `key`
    fn from_value(key: SettingKey, value: serde_json::Value) -> Result<Self> {
        Ok(match key {
            SettingKey::Theme => Setting::Theme(serde_json::from_value(value)?),
            SettingKey::Seo => Setting::Seo(serde_json::from_value(value)?),
            SettingKey::Contact => Setting::Contact(serde_json::from_value(value)?),
        })
    }
}

/// a settings row as the record store sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSettingsRecord {
    /// the row key
    pub key: String,
    /// the row value, shaped by `key`
    pub value: serde_json::Value,
    /// when the row was last written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// a settings row with a checked value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    /// the value (and through it, the key)
    pub setting: Setting,
    /// when the row was last written
    pub updated_at: Option<DateTime<Utc>>,
}

impl SettingsRecord {
    /// a row stamped with the current time
    pub fn now(setting: Setting) -> Self {
        Self {
            setting,
            updated_at: Some(Utc::now()),
        }
    }

    /// the row key
    pub fn key(&self) -> SettingKey {
        self.setting.key()
    }

    /// convert to the record store's shape
    pub fn to_raw(&self) -> Result<RawSettingsRecord> {
        Ok(RawSettingsRecord {
            key: self.key().as_str().to_string(),
            value: self.setting.to_value()?,
            updated_at: self.updated_at,
        })
    }
}

impl TryFrom<RawSettingsRecord> for SettingsRecord {
    type Error = ThemeError;

    fn try_from(raw: RawSettingsRecord) -> Result<Self> {
        let key: SettingKey = raw.key.parse()?;

        Ok(Self {
            setting: Setting::from_value(key, raw.value)?,
            updated_at: raw.updated_at,
        })
    }
}
