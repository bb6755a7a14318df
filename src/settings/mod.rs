//! administrative settings rows in the hosted record store
//!
//! the back office keeps a handful of site-wide settings as generic
//! `{ key, value, updated_at }` rows. this module gives each known key a concrete
//! schema and provides the one-way theme snapshot into that store.
pub mod memory;
pub mod mirror;
pub mod record;
pub mod remote;

pub use {
    memory::MemoryRecordStore,
    mirror::{Notice, RemoteSettingsMirror},
    record::{
        ContactSetting, RawSettingsRecord, SeoSetting, Setting, SettingKey, SettingsRecord,
        ThemeSetting,
    },
    remote::{RecordStore, RestRecordStore},
};
