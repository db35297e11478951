use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{TileError, TileResult};

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "chaostile";

/// String values keyed by name. Values are JSON text.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> TileResult<Option<String>>;
    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> TileResult<()>;
    /// Remove `key`. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> TileResult<()>;
}

/// In-process store. Can be told to fail for exercising fallbacks.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `get` fail.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every `set` and `remove` fail.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TileResult<Option<String>> {
        if self.fail_reads {
            return Err(TileError::storage(format!("read of '{key}' refused")));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> TileResult<()> {
        if self.fail_writes {
            return Err(TileError::storage(format!("write of '{key}' refused")));
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> TileResult<()> {
        if self.fail_writes {
            return Err(TileError::storage(format!("remove of '{key}' refused")));
        }
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file (`{"key": "<json text>", ...}`).
///
/// Every write rewrites the file through a temporary sibling and a rename. Reads of a corrupt
/// file fail; the next write replaces it.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/chaostile/<file_name>`.
    pub fn in_config_dir(file_name: &str) -> TileResult<Self> {
        Ok(Self::new(default_dir()?.join(file_name)))
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> TileResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(t) if t.trim().is_empty() => Ok(None),
            Ok(t) => Ok(Some(t)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TileError::storage(format!(
                "read '{}': {e}",
                self.path.display()
            ))),
        }
    }

    fn load(&self) -> TileResult<BTreeMap<String, String>> {
        let Some(text) = self.read()? else {
            return Ok(BTreeMap::new());
        };
        serde_json::from_str(&text).map_err(|e| {
            TileError::storage(format!("parse '{}': {e}", self.path.display()))
        })
    }

    /// Entries to rewrite. A corrupt file is replaced instead of blocking every later write.
    fn load_for_write(&self) -> TileResult<BTreeMap<String, String>> {
        let Some(text) = self.read()? else {
            return Ok(BTreeMap::new());
        };
        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "settings file is corrupt, replacing it");
            BTreeMap::new()
        }))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> TileResult<()> {
        crate::encode::webm::ensure_parent_dir(&self.path)?;
        let text = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)
            .with_context(|| format!("write '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace '{}'", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> TileResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> TileResult<()> {
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> TileResult<()> {
        let mut entries = self.load_for_write()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// `<config dir>/chaostile`.
pub fn default_dir() -> TileResult<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or_else(|| TileError::storage("no config directory on this platform"))
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;
