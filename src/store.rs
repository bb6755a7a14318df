//! remembering the chosen theme across restarts
use {
    crate::{error::Result, utils::is_theme_identifier},
    redb::{Database, ReadableDatabase, TableDefinition},
    std::{
        cell::RefCell,
        fs::create_dir_all,
        path::{Path, PathBuf},
        rc::Rc,
    },
    tracing::{debug, info, warn},
};

/// the table the preference lives in
const PREFERENCES_TABLE: TableDefinition<&str, &str> = TableDefinition::new("preferences");

/// the key the active theme id is stored under
pub const THEME_KEY: &str = "site-theme";

/// a durable slot holding one string
pub trait PreferenceBackend {
    /// read the stored value, if there is one
    fn read(&self) -> Result<Option<String>>;

    /// overwrite the stored value
    fn write(&mut self, value: &str) -> Result<()>;
}

/// a preference slot in a redb database
#[derive(Debug)]
pub struct RedbBackend {
    /// the database itself
    db: Database,
    /// the path to the database file
    path: PathBuf,
}

impl RedbBackend {
    /// open (or create) the preference database at `path`
    ///
    /// # Errors
    ///
    /// returns an error if the parent directory can't be made or the database
    /// can't be opened (e.g. another process holds it)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)?;
        }

        let db = Database::create(&path)?;
        info!("opened theme preference store at {:?}", path);

        Ok(Self { db, path })
    }

    /// the path to the database file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceBackend for RedbBackend {
    fn read(&self) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(PREFERENCES_TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(table.get(THEME_KEY)?.map(|value| value.value().to_string()))
    }

    fn write(&mut self, value: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;

        {
            let mut table = write_txn.open_table(PREFERENCES_TABLE)?;
            table.insert(THEME_KEY, value)?;
        }

        write_txn.commit()?;
        Ok(())
    }
}

/// the shared contents of a [`MemoryBackend`]
#[derive(Debug, Default)]
struct MemorySlot {
    /// the stored value
    value: Option<String>,
    /// make every read fail
    fail_reads: bool,
    /// make every write fail
    fail_writes: bool,
}

/// an in-process preference slot
///
/// clones share the same slot, so a test can keep a handle after giving one to a
/// [`PersistedThemeStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    /// the slot
    slot: Rc<RefCell<MemorySlot>>,
}

impl MemoryBackend {
    /// an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// a slot that already holds `value`
    pub fn with_value(value: impl Into<String>) -> Self {
        let backend = Self::new();
        backend.slot.borrow_mut().value = Some(value.into());
        backend
    }

    /// the stored value
    pub fn value(&self) -> Option<String> {
        self.slot.borrow().value.clone()
    }

    /// make reads fail (or stop failing)
    pub fn set_fail_reads(&self, fail: bool) {
        self.slot.borrow_mut().fail_reads = fail;
    }

    /// make writes fail (or stop failing)
    pub fn set_fail_writes(&self, fail: bool) {
        self.slot.borrow_mut().fail_writes = fail;
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        let slot = self.slot.borrow();

        if slot.fail_reads {
            crate::bail!("preference slot is unavailable");
        }

        Ok(slot.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<()> {
        let mut slot = self.slot.borrow_mut();

        if slot.fail_writes {
            crate::bail!("preference slot is read-only");
        }

        slot.value = Some(value.to_string());
        Ok(())
    }
}

/// the last chosen theme id, kept under [`THEME_KEY`]
///
/// every failure here is soft: a bad read means "no preference" and a bad write
/// only costs cross-session persistence
pub struct PersistedThemeStore {
    /// where the id goes, `None` when persistence is off
    backend: Option<Box<dyn PreferenceBackend>>,
}

impl PersistedThemeStore {
    /// make a store over a backend
    pub fn new(backend: impl PreferenceBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    /// a store that never remembers anything
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// open a redb-backed store, falling back to a disabled one if the database
    /// can't be opened
    pub fn open_or_disabled(path: impl AsRef<Path>) -> Self {
        match RedbBackend::open(path.as_ref()) {
            Ok(backend) => Self::new(backend),
            Err(e) => {
                warn!(
                    "theme preference store at {:?} unavailable, choices won't persist: {}",
                    path.as_ref(),
                    e
                );
                Self::disabled()
            }
        }
    }

    /// load the saved theme id
    ///
    /// returns `None` if nothing is saved, the backend can't be read, or the
    /// saved value isn't a theme identifier
    pub fn load(&self) -> Option<String> {
        let backend = self.backend.as_ref()?;

        match backend.read() {
            Ok(Some(value)) => {
                let value = value.trim();

                if is_theme_identifier(value) {
                    debug!("loaded saved theme `{}`", value);
                    Some(value.to_string())
                } else {
                    warn!("ignoring malformed saved theme value {:?}", value);
                    None
                }
            }
            Ok(None) => {
                debug!("no saved theme");
                None
            }
            Err(e) => {
                warn!("failed to read saved theme, using default: {}", e);
                None
            }
        }
    }

    /// save the theme id, returning whether it was written
    pub fn save(&mut self, id: &str) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };

        match backend.write(id) {
            Ok(()) => {
                debug!("saved theme `{}`", id);
                true
            }
            Err(e) => {
                warn!("failed to save theme `{}`, it won't survive a restart: {}", id, e);
                false
            }
        }
    }

    /// whether there's a backend behind this store
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }
}

impl std::fmt::Debug for PersistedThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedThemeStore")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, tempfile::TempDir};

    #[test]
    fn test_redb_round_trip_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state").join("prefs.redb");

        {
            let mut backend = RedbBackend::open(&path).unwrap();
            assert_eq!(backend.read().unwrap(), None);
            backend.write("classic").unwrap();
            backend.write("modern").unwrap();
        }

        let backend = RedbBackend::open(&path).unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("modern"));
    }

    #[test]
    fn test_load_ignores_malformed_values() {
        let store = PersistedThemeStore::new(MemoryBackend::with_value("{\"id\": 3}"));
        assert_eq!(store.load(), None);

        let store = PersistedThemeStore::new(MemoryBackend::with_value(" classic\n"));
        assert_eq!(store.load().as_deref(), Some("classic"));
    }

    #[test]
    fn test_read_failure_is_absent() {
        let backend = MemoryBackend::with_value("classic");
        backend.set_fail_reads(true);

        assert_eq!(PersistedThemeStore::new(backend).load(), None);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let backend = MemoryBackend::with_value("luxury");
        backend.set_fail_writes(true);
        let mut store = PersistedThemeStore::new(backend.clone());

        assert!(!store.save("classic"));
        assert_eq!(backend.value().as_deref(), Some("luxury"));
    }

    #[test]
    fn test_disabled_store() {
        let mut store = PersistedThemeStore::disabled();

        assert!(!store.save("classic"));
        assert_eq!(store.load(), None);
    }
}
