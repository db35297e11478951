//! Settings and preset persistence over a key-value store.

/// Preset collection and schema migration.
pub mod presets;
/// Per-field settings load/store.
pub mod settings;
/// Key-value stores.
pub mod store;
