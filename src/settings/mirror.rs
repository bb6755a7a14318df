//! pushing local theme state out to the record store
use {
    crate::{
        context::ThemeContext,
        defer,
        error::{Result, ThemeError},
        settings::{
            record::{RawSettingsRecord, Setting, SettingKey, SettingsRecord, ThemeSetting},
            remote::RecordStore,
        },
    },
    std::{
        fmt,
        sync::atomic::{AtomicUsize, Ordering},
    },
    tracing::{info, warn},
};

impl ThemeSetting {
    /// the active theme and every catalog id, as of right now
    pub fn snapshot(ctx: &ThemeContext) -> Self {
        Self {
            current: ctx.current_id().to_string(),
            available: ctx
                .themes()
                .ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// a one-way mirror of local settings into a [`RecordStore`]
///
/// the mirror only ever reads local state. a failed save is reported to the
/// caller and changes nothing locally; the next save simply tries again.
#[derive(Debug)]
pub struct RemoteSettingsMirror<S: RecordStore> {
    /// where rows go
    store: S,
    /// how many saves are in flight
    in_flight: AtomicUsize,
}

impl<S: RecordStore> RemoteSettingsMirror<S> {
    /// mirror into `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// whether any save is in flight
    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// save the active theme id and the catalog ids under the `theme` key
    ///
    /// the snapshot is taken when this is called, and the returned future doesn't
    /// hold on to `ctx`, so the theme can keep changing while the save is in
    /// flight without changing what gets written
    ///
    /// # Errors
    ///
    /// the future resolves to [`ThemeError::RemoteSave`] if the row couldn't be
    /// written
    pub fn save_theme_snapshot<'a>(
        &'a self,
        ctx: &ThemeContext,
    ) -> impl Future<Output = Result<SettingsRecord>> + use<'a, S> {
        let snapshot = Setting::Theme(ThemeSetting::snapshot(ctx));
        self.save_setting(snapshot)
    }

    /// save any settings value under its key, stamped with the current time
    ///
    /// # Errors
    ///
    /// returns [`ThemeError::RemoteSave`] if the row couldn't be written
    pub async fn save_setting(&self, setting: Setting) -> Result<SettingsRecord> {
        let record = SettingsRecord::now(setting);
        let key = record.key();

        self.in_flight.fetch_add(1, Ordering::AcqRel);
        defer! {
            self.in_flight.fetch_sub(1, Ordering::AcqRel);
        }

        match self.upsert(&record).await {
            Ok(()) => {
                info!("saved `{}` settings", key);
                Ok(record)
            }
            Err(e) => {
                warn!("failed to save `{}` settings: {}", key, e);
                Err(ThemeError::remote_save(key.as_str(), e))
            }
        }
    }

    /// convert and write one record
    async fn upsert(&self, record: &SettingsRecord) -> Result<()> {
        let raw: RawSettingsRecord = record.to_raw()?;
        self.store.upsert(&raw).await
    }

    /// read back the row stored under `key`
    ///
    /// # Errors
    ///
    /// returns an error if the store can't be reached or the row doesn't match
    /// the schema for `key`
    pub async fn fetch_setting(&self, key: SettingKey) -> Result<Option<SettingsRecord>> {
        match self.store.fetch(key.as_str()).await? {
            Some(raw) => Ok(Some(SettingsRecord::try_from(raw)?)),
            None => Ok(None),
        }
    }

    /// read back the last theme snapshot
    ///
    /// this is informational only and is never applied to a [`ThemeContext`]
    ///
    /// # Errors
    ///
    /// see [`RemoteSettingsMirror::fetch_setting`]
    pub async fn load_theme_snapshot(&self) -> Result<Option<ThemeSetting>> {
        Ok(self
            .fetch_setting(SettingKey::Theme)
            .await?
            .and_then(|record| match record.setting {
                Setting::Theme(theme) => Some(theme),
                _ => None,
            }))
    }
}

/// a short message about how a save went, for showing to whoever asked for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// the save went through
    Success(String),
    /// the save didn't go through
    Failure(String),
}

impl Notice {
    /// describe the outcome of a save
    pub fn from_save(result: &Result<SettingsRecord>) -> Self {
        match result {
            Ok(record) => Notice::Success(format!("{} settings saved", record.key())),
            Err(ThemeError::RemoteSave { key, .. }) => {
                Notice::Failure(format!("couldn't save {} settings, try again", key))
            }
            Err(e) => Notice::Failure(format!("couldn't save settings: {}", e)),
        }
    }

    /// whether this is good news
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    /// the message
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Failure(msg) => msg,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
