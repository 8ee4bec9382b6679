use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::state::{ViewState, ViewStore};
use crate::store::Subscription;

pub const VIEW_STATE_KEY: &str = "viewState";
pub const THEME_KEY: &str = "theme";

const APP_DIR: &str = "wordpad";
const PREFS_FILE: &str = "preferences.json";

/// Persisted view preferences. Layout flags live under [`VIEW_STATE_KEY`],
/// the theme under [`THEME_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPrefs {
    pub toolbar: bool,
    pub format_bar: bool,
    pub ruler: bool,
    pub status_bar: bool,
    pub dark_mode: bool,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            toolbar: true,
            format_bar: true,
            ruler: true,
            status_bar: true,
            dark_mode: false,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLayout {
    #[serde(default)]
    toolbar: Option<bool>,
    #[serde(default)]
    format_bar: Option<bool>,
    #[serde(default)]
    ruler: Option<bool>,
    #[serde(default)]
    status_bar: Option<bool>,
}

/// String key/value persistence, modelled on browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RefCell::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys in one JSON object file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/wordpad/preferences.json`.
    pub fn default_location() -> Result<Self, StorageError> {
        let dir = dirs::config_dir().ok_or(StorageError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(PREFS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_entries(&self) -> Result<Map<String, Value>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

impl KeyValueStore for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.read_entries()?;
        Ok(entries.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "discarding unreadable preference file");
            Map::new()
        });
        entries.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let text = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, text).map_err(|err| self.io_error(err))
    }
}

/// Reads view preferences; anything missing or malformed falls back to defaults.
pub fn load_view_prefs(storage: &dyn KeyValueStore) -> ViewPrefs {
    let dark_mode = match storage.get(THEME_KEY) {
        Ok(theme) => theme.as_deref() == Some("dark"),
        Err(err) => {
            warn!(error = %err, "failed to read theme preference");
            false
        }
    };

    let layout = match storage.get(VIEW_STATE_KEY) {
        Ok(Some(raw)) => serde_json::from_str::<StoredLayout>(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring malformed view preferences");
            StoredLayout::default()
        }),
        Ok(None) => StoredLayout::default(),
        Err(err) => {
            warn!(error = %err, "failed to read view preferences");
            StoredLayout::default()
        }
    };

    ViewPrefs {
        toolbar: layout.toolbar.unwrap_or(true),
        format_bar: layout.format_bar.unwrap_or(true),
        ruler: layout.ruler.unwrap_or(true),
        status_bar: layout.status_bar.unwrap_or(true),
        dark_mode,
    }
}

pub fn save_view_prefs(storage: &dyn KeyValueStore, view: &ViewState) -> Result<(), StorageError> {
    let layout = StoredLayout {
        toolbar: Some(view.toolbar),
        format_bar: Some(view.format_bar),
        ruler: Some(view.ruler),
        status_bar: Some(view.status_bar),
    };
    storage.set(VIEW_STATE_KEY, &serde_json::to_string(&layout)?)?;
    storage.set(THEME_KEY, if view.dark_mode { "dark" } else { "light" })
}

/// Subscribes a listener that writes the view slice to `storage` whenever it
/// changes. The state current at subscription time is treated as persisted.
pub fn persist_view_state(store: &ViewStore, storage: Rc<dyn KeyValueStore>) -> Subscription {
    let weak = store.downgrade();
    let last = Cell::new(*store.get_state());
    store.subscribe(move || {
        let Some(store) = weak.upgrade() else {
            return;
        };
        let view = *store.get_state();
        if view == last.get() {
            return;
        }
        match save_view_prefs(storage.as_ref(), &view) {
            Ok(()) => {
                debug!(?view, "persisted view preferences");
                last.set(view);
            }
            Err(err) => warn!(error = %err, "failed to persist view preferences"),
        }
    })
}
