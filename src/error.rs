//! error handling stuff
use thiserror::Error;

#[derive(Debug, Error)]
/// An error
pub enum ThemeError {
    /// a theme id that isn't in the catalog
    #[error("unknown theme id: `{0}`")]
    InvalidThemeId(String),

    /// a catalog with no themes in it
    #[error("the theme catalog must contain at least one theme")]
    EmptyCatalog,

    /// two catalog entries sharing an id
    #[error("duplicate theme id in catalog: `{0}`")]
    DuplicateThemeId(String),

    /// a redb error
    #[error("preference store error: {0}")]
    Store(#[from] redb::Error),

    /// an IO error
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// a json error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// a toml serialization error
    #[error("toml serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// a reqwest error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// a non-2xx answer from the record store
    #[error("record store answered {status}: {body}")]
    RemoteStatus {
        /// the http status code
        status: u16,
        /// the response body, if any
        body: String,
    },

    /// an invalid url
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// a settings row with a key we don't know the schema of
    #[error("unknown settings key: `{0}`")]
    UnknownSettingKey(String),

    /// a remote settings write that didn't go through
    #[error("failed to save `{key}` settings: {source}")]
    RemoteSave {
        /// the settings key that was being written
        key: String,
        /// what went wrong
        #[source]
        source: Box<ThemeError>,
    },

    /// the remote record store has no base url configured
    #[error("no remote settings store configured (set remote.base_url)")]
    RemoteNotConfigured,

    /// a custom error
    #[error("error: {0}")]
    Other(String),
}

impl ThemeError {
    /// wrap an error as a failed remote save of `key`
    pub fn remote_save(key: impl Into<String>, source: ThemeError) -> Self {
        Self::RemoteSave {
            key: key.into(),
            source: Box::new(source),
        }
    }
}

impl From<String> for ThemeError {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

impl From<redb::DatabaseError> for ThemeError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Store(value.into())
    }
}

impl From<redb::TransactionError> for ThemeError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Store(value.into())
    }
}

impl From<redb::TableError> for ThemeError {
    fn from(value: redb::TableError) -> Self {
        Self::Store(value.into())
    }
}

impl From<redb::StorageError> for ThemeError {
    fn from(value: redb::StorageError) -> Self {
        Self::Store(value.into())
    }
}

impl From<redb::CommitError> for ThemeError {
    fn from(value: redb::CommitError) -> Self {
        Self::Store(value.into())
    }
}

/// A result using [`ThemeError`] as the `Err` variant
pub type Result<T, E = ThemeError> = std::result::Result<T, E>;

/// bail
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::ThemeError::from(String::from($msg)))
    };

    ($err:expr $(,)?) => {
        return Err($crate::error::ThemeError::from($err))
    };

    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::ThemeError::from(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bails_with_message() -> Result<()> {
        bail!("stylesheet path {} is a directory", "public");
    }

    #[test]
    fn test_remote_save_keeps_source() {
        let err = ThemeError::remote_save("theme", ThemeError::RemoteStatus {
            status: 503,
            body: "unavailable".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "failed to save `theme` settings: record store answered 503: unavailable"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_bail_formats_other() {
        match bails_with_message() {
            Err(ThemeError::Other(msg)) => assert_eq!(msg, "stylesheet path public is a directory"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
