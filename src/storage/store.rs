//! `Database` — file-backed document store for `Person` rows.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Person;

/// On-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDoc {
    schema_version: u64,
    #[serde(default)]
    persons: BTreeMap<String, Person>,
}

struct State {
    path: PathBuf,
    doc: StoreDoc,
}

/// Explicitly constructed, cloneable store handle. Clones share one in-memory
/// document behind a mutex; writers are serialized, readers copy out.
///
/// There is no deletion path: rows are only ever inserted or overwritten.
#[derive(Clone)]
pub struct Database {
    // None marks a degraded handle (initialization failed).
    inner: Option<Arc<Mutex<State>>>,
}

impl Database {
    /// Open (or create) the store at `path`. Never fails: a missing file
    /// starts an empty document at `schema_version`; an unreadable or corrupt
    /// file logs a warning and yields a degraded handle.
    pub fn open(path: impl Into<PathBuf>, schema_version: u64) -> Database {
        let path = path.into();
        let doc = if path.exists() {
            match read_doc(&path) {
                Ok(doc) => doc,
                Err(err) => {
                    log::warn!(
                        "failed to initialize store at {}: {}; continuing without persistence",
                        path.display(),
                        err
                    );
                    return Database { inner: None };
                }
            }
        } else {
            StoreDoc {
                schema_version,
                persons: BTreeMap::new(),
            }
        };

        Database {
            inner: Some(Arc::new(Mutex::new(State { path, doc }))),
        }
    }

    /// Schema version currently stored. `None` on a degraded handle.
    pub fn schema_version(&self) -> Option<u64> {
        self.inner.as_ref().map(|m| lock(m).doc.schema_version)
    }

    /// Upsert by email: an existing row with the same email is overwritten in
    /// full. Persists to disk immediately. On a degraded handle this is a
    /// logged no-op.
    pub fn save(&self, person: &Person) -> Result<()> {
        let Some(inner) = &self.inner else {
            log::warn!("store unavailable, dropping save for {}", person.email);
            return Ok(());
        };
        let mut state = lock(inner);
        state
            .doc
            .persons
            .insert(person.email.clone(), person.clone());
        persist(&state)
    }

    /// All persisted rows. Empty on a degraded handle.
    pub fn all(&self) -> Vec<Person> {
        match &self.inner {
            Some(inner) => lock(inner).doc.persons.values().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Rows matching `pred`. Empty when none match or on a degraded handle.
    pub fn filtered(&self, pred: impl Fn(&Person) -> bool) -> Vec<Person> {
        match &self.inner {
            Some(inner) => lock(inner)
                .doc
                .persons
                .values()
                .filter(|p| pred(p))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Row keyed by `email`, if any.
    pub fn find_by_email(&self, email: &str) -> Option<Person> {
        match &self.inner {
            Some(inner) => lock(inner).doc.persons.get(email).cloned(),
            None => None,
        }
    }

    /// Schema-version migration extension point.
    ///
    /// Hands the raw document and the old version to `transform`, stamps the
    /// new version and persists. No default transformation logic exists; a
    /// no-op `transform` only bumps the version.
    pub fn migrate(
        &self,
        new_version: u64,
        transform: impl FnOnce(u64, &mut Value),
    ) -> Result<()> {
        let Some(inner) = &self.inner else {
            log::warn!("store unavailable, skipping migration to version {}", new_version);
            return Ok(());
        };
        let mut state = lock(inner);
        let old_version = state.doc.schema_version;

        let mut raw = serde_json::to_value(&state.doc)?;
        transform(old_version, &mut raw);
        raw["schemaVersion"] = Value::from(new_version);

        state.doc = serde_json::from_value(raw)
            .map_err(|e| AppError::Storage(format!("migration produced an invalid document: {}", e)))?;
        persist(&state)
    }
}

fn lock<'a>(inner: &'a Arc<Mutex<State>>) -> MutexGuard<'a, State> {
    // A poisoned lock only means a writer panicked mid-update; the document
    // itself is still usable.
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_doc(path: &Path) -> Result<StoreDoc> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn persist(state: &State) -> Result<()> {
    if let Some(parent) = state.path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Storage(e.to_string()))?;
    }
    let raw = serde_json::to_string_pretty(&state.doc)?;
    std::fs::write(&state.path, raw).map_err(|e| AppError::Storage(e.to_string()))
}
