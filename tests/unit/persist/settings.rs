use super::*;
use crate::persist::store::MemoryStore;
use crate::style::config::AnimationPreset;

#[test]
fn empty_store_loads_defaults() {
    assert_eq!(load_settings(&MemoryStore::new()), StyleConfig::default());
}

#[test]
fn unreadable_store_loads_defaults() {
    let store = MemoryStore::new().failing_reads();
    assert_eq!(load_settings(&store), StyleConfig::default());
}

#[test]
fn corrupt_entries_fall_back_per_field() {
    let mut store = MemoryStore::new();
    store.set("text", "\"HELLO\"").unwrap();
    store.set("tileSize", "{ broken").unwrap();
    store.set("rotationChaos", "\"lots\"").unwrap();
    store.set("animationPreset", "\"slide\"").unwrap();

    let cfg = load_settings(&store);
    let d = StyleConfig::default();
    assert_eq!(cfg.text, "HELLO");
    assert_eq!(cfg.tile_size, d.tile_size);
    assert_eq!(cfg.rotation_chaos, d.rotation_chaos);
    assert_eq!(cfg.animation_preset, AnimationPreset::Slide);
}

#[test]
fn loaded_values_are_clamped() {
    let mut store = MemoryStore::new();
    store.set("rotationChaos", "400").unwrap();
    assert_eq!(load_settings(&store).rotation_chaos, 15.0);
}

#[test]
fn only_changed_fields_are_written() {
    let mut store = MemoryStore::new();
    let prev = StyleConfig::default();
    let next = StyleConfig {
        tile_gap: 30.0,
        text: "NEW".into(),
        ..prev.clone()
    };
    assert_eq!(store_changes(&mut store, &prev, &next), 2);
    assert_eq!(store.keys(), vec!["text", "tileGap"]);
    assert_eq!(load_settings(&store), next);
}

#[test]
fn write_failures_are_absorbed() {
    let mut store = MemoryStore::new().failing_writes();
    let next = StyleConfig {
        tile_gap: 30.0,
        ..StyleConfig::default()
    };
    assert_eq!(store_changes(&mut store, &StyleConfig::default(), &next), 0);
    assert_eq!(store_all(&mut store, &next), 0);
}

#[test]
fn set_field_accepts_bare_words_and_json() {
    let mut store = MemoryStore::new();
    let cfg = StyleConfig::default();
    let cfg = set_field(&mut store, &cfg, "text", "HELLO").unwrap();
    let cfg = set_field(&mut store, &cfg, "tileGap", "20").unwrap();
    assert_eq!(cfg.text, "HELLO");
    assert_eq!(cfg.tile_gap, 20.0);
    assert_eq!(load_settings(&store), cfg);

    assert!(set_field(&mut store, &cfg, "nope", "1").is_err());
    assert!(set_field(&mut store, &cfg, "tileGap", "wide").is_err());
}
