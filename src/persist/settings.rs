//! One store key per [`StyleConfig`] field.
//!
//! Loading falls back to the default value field by field; a corrupt entry only costs that one
//! setting. Storage failures are logged and absorbed, never surfaced.

use serde_json::{Map, Value};

use crate::foundation::error::TileResult;
use crate::persist::store::KeyValueStore;
use crate::style::config::StyleConfig;

fn to_map(cfg: &StyleConfig) -> TileResult<Map<String, Value>> {
    match serde_json::to_value(cfg)? {
        Value::Object(map) => Ok(map),
        _ => Err(crate::foundation::error::TileError::serde(
            "style config did not serialize to an object",
        )),
    }
}

/// Load every field from `store`, falling back to the default per field.
#[tracing::instrument(skip_all)]
pub fn load_settings(store: &dyn KeyValueStore) -> StyleConfig {
    let defaults = StyleConfig::default();
    let Ok(mut fields) = to_map(&defaults) else {
        return defaults;
    };

    let keys: Vec<String> = fields.keys().cloned().collect();
    for key in keys {
        let raw = match store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "setting unreadable, using default");
                continue;
            }
        };
        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "setting is not valid json, using default");
                continue;
            }
        };

        let previous = fields.insert(key.clone(), value);
        if let Err(e) = serde_json::from_value::<StyleConfig>(Value::Object(fields.clone())) {
            tracing::warn!(key = %key, error = %e, "setting has the wrong shape, using default");
            if let Some(prev) = previous {
                fields.insert(key, prev);
            }
        }
    }

    match serde_json::from_value::<StyleConfig>(Value::Object(fields)) {
        Ok(cfg) => cfg.sanitized(),
        Err(e) => {
            tracing::warn!(error = %e, "stored settings unusable, using defaults");
            defaults
        }
    }
}

/// Write the fields of `next` that differ from `prev`. Returns how many were stored.
pub fn store_changes(store: &mut dyn KeyValueStore, prev: &StyleConfig, next: &StyleConfig) -> usize {
    let (Ok(old), Ok(new)) = (to_map(prev), to_map(next)) else {
        tracing::warn!("style config could not be serialized, nothing stored");
        return 0;
    };
    let mut written = 0;
    for (key, value) in new {
        if old.get(&key) == Some(&value) {
            continue;
        }
        match store.set(&key, &value.to_string()) {
            Ok(()) => written += 1,
            Err(e) => tracing::warn!(key = %key, error = %e, "failed to store setting"),
        }
    }
    written
}

/// Write every field of `cfg`. Returns how many were stored.
pub fn store_all(store: &mut dyn KeyValueStore, cfg: &StyleConfig) -> usize {
    let Ok(fields) = to_map(cfg) else {
        return 0;
    };
    fields
        .into_iter()
        .filter(|(key, value)| match store.set(key, &value.to_string()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to store setting");
                false
            }
        })
        .count()
}

/// Set a single field from JSON text, as the CLI `settings set` does.
///
/// Bare words that are not valid JSON are taken as strings, so `text HELLO` works unquoted.
pub fn set_field(
    store: &mut dyn KeyValueStore,
    current: &StyleConfig,
    key: &str,
    raw: &str,
) -> TileResult<StyleConfig> {
    let mut fields = to_map(current)?;
    if !fields.contains_key(key) {
        return Err(crate::foundation::error::TileError::validation(format!(
            "unknown setting '{key}'"
        )));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    fields.insert(key.to_owned(), value);
    let next = serde_json::from_value::<StyleConfig>(Value::Object(fields))?.sanitized();
    store_changes(store, current, &next);
    Ok(next)
}

#[cfg(test)]
#[path = "../../tests/unit/persist/settings.rs"]
mod tests;
