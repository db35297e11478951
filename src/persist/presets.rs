//! Named snapshots of a full [`StyleConfig`].
//!
//! Presets are stored as one JSON array under [`PRESETS_KEY`]. Each record carries a schema
//! version; older records are migrated on load and any field they lack is filled from the
//! defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::error::{TileError, TileResult};
use crate::persist::store::KeyValueStore;
use crate::style::config::StyleConfig;

/// Store key holding the preset list.
pub const PRESETS_KEY: &str = "presets";

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 2;

/// A saved configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    /// Unique id (UUID v4).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Full configuration snapshot.
    pub config: StyleConfig,
}

impl Preset {
    /// New preset with a fresh id.
    pub fn new(name: impl Into<String>, config: StyleConfig, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            created_at,
            config,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresetRecord {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
    /// Records written before versioning have none; they are v1.
    #[serde(default = "v1")]
    version: u32,
    settings: Value,
}

fn v1() -> u32 {
    1
}

/// Upgrade a stored settings object of schema `version` to a current [`StyleConfig`].
///
/// * v1 → v2: `chaosLevel` became `rotationChaos`.
/// * Every version: missing fields take their default, unknown fields are dropped.
pub fn migrate_settings(version: u32, settings: Value) -> TileResult<StyleConfig> {
    if version == 0 || version > CURRENT_VERSION {
        return Err(TileError::validation(format!(
            "unsupported preset schema version {version}"
        )));
    }
    let Value::Object(mut stored) = settings else {
        return Err(TileError::validation("preset settings must be an object"));
    };

    if version < 2
        && let Some(level) = stored.remove("chaosLevel")
    {
        stored.entry("rotationChaos").or_insert(level);
    }

    let Value::Object(mut filled) = serde_json::to_value(StyleConfig::default())? else {
        return Err(TileError::serde("style config did not serialize to an object"));
    };
    for (key, value) in stored {
        match filled.get_mut(&key) {
            Some(slot) => *slot = value,
            None => tracing::debug!(key = %key, "dropping unknown preset field"),
        }
    }

    let cfg: StyleConfig = serde_json::from_value(Value::Object(filled))?;
    Ok(cfg.sanitized())
}

/// Ordered preset list (insertion order).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresetCollection {
    presets: Vec<Preset>,
}

impl PresetCollection {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the collection from `store`.
    ///
    /// An unreadable list loads as empty; a single bad record is skipped. Both are logged.
    #[tracing::instrument(skip_all)]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(PRESETS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(e) => {
                tracing::warn!(error = %e, "presets unreadable, starting empty");
                return Self::new();
            }
        };
        let records: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "presets are corrupt, starting empty");
                return Self::new();
            }
        };

        let presets = records
            .into_iter()
            .filter_map(|v| match decode_record(v) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable preset");
                    None
                }
            })
            .collect();
        Self { presets }
    }

    /// Write the collection to `store` at the current schema version.
    pub fn store(&self, store: &mut dyn KeyValueStore) -> TileResult<()> {
        let records = self
            .presets
            .iter()
            .map(|p| {
                Ok(PresetRecord {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    created_at: p.created_at,
                    version: CURRENT_VERSION,
                    settings: serde_json::to_value(&p.config)?,
                })
            })
            .collect::<TileResult<Vec<_>>>()?;
        store.set(PRESETS_KEY, &serde_json::to_string(&records)?)
    }

    /// Snapshot `config` under `name` and append it.
    pub fn save(&mut self, name: impl Into<String>, config: &StyleConfig) -> &Preset {
        self.insert(Preset::new(name, config.sanitized(), Utc::now()))
    }

    /// Append an existing preset.
    pub fn insert(&mut self, preset: Preset) -> &Preset {
        tracing::debug!(id = %preset.id, name = %preset.name, "preset saved");
        self.presets.push(preset);
        &self.presets[self.presets.len() - 1]
    }

    /// Remove the preset with `id`.
    pub fn delete(&mut self, id: &str) -> Option<Preset> {
        let pos = self.presets.iter().position(|p| p.id == id)?;
        Some(self.presets.remove(pos))
    }

    /// Preset with `id`.
    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// First preset called `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// All presets, oldest first.
    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    /// Configuration to apply for `id`.
    pub fn apply(&self, id: &str) -> Option<StyleConfig> {
        self.get(id).map(|p| p.config.clone())
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// `true` when there are no presets.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn decode_record(value: Value) -> TileResult<Preset> {
    let record: PresetRecord = serde_json::from_value(value)?;
    let config = migrate_settings(record.version, record.settings)?;
    Ok(Preset {
        id: record.id,
        name: record.name,
        created_at: record.created_at,
        config,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/persist/presets.rs"]
mod tests;
