use crate::errors::StoreError;
use crate::ledger::ProgressLedger;
use crate::models::Habit;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
};
use tracing::{debug, error};

pub const HABITS_KEY: &str = "habits";
pub const PROGRESS_KEY: &str = "progress";

/// String-keyed, string-valued durable store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Keeps each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path_for(key), value).map_err(io_err)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Best-effort persistence of habits and progress.
///
/// Reads fall back to empty state on a missing or malformed record and
/// writes only log their failures; neither ever surfaces an error.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn save_habits(&mut self, habits: &[Habit]) {
        self.save(HABITS_KEY, habits);
    }

    pub fn load_habits(&self) -> Vec<Habit> {
        self.load(HABITS_KEY, |habits: &Vec<Habit>| {
            habits.iter().try_for_each(|habit| {
                habit
                    .validate()
                    .map_err(|err| format!("habit `{}`: {err}", habit.id))
            })
        })
    }

    pub fn save_progress(&mut self, ledger: &ProgressLedger) {
        self.save(PROGRESS_KEY, ledger);
    }

    pub fn load_progress(&self) -> ProgressLedger {
        self.load(PROGRESS_KEY, ProgressLedger::validate)
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to serialize {key}: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(key, &payload) {
            error!("failed to save {key}: {err}");
        }
    }

    /// Parses the record under `key`, then runs `check`; either failure
    /// counts as corruption.
    fn load<T, F>(&self, key: &str, check: F) -> T
    where
        T: DeserializeOwned + Default,
        F: Fn(&T) -> Result<(), String>,
    {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => match check(&value) {
                    Ok(()) => value,
                    Err(err) => {
                        error!("stored {key} failed validation: {err}");
                        T::default()
                    }
                },
                Err(err) => {
                    error!("failed to parse stored {key}: {err}");
                    T::default()
                }
            },
            Ok(None) => {
                debug!("no stored {key}, starting empty");
                T::default()
            }
            Err(err) => {
                error!("failed to load {key}: {err}");
                T::default()
            }
        }
    }
}
