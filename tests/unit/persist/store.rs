use super::*;

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("chaostile_store_{}_{name}", std::process::id()))
        .join("settings.json")
}

#[test]
fn memory_store_round_trips_and_removes() {
    let mut s = MemoryStore::new();
    assert!(s.is_empty());
    s.set("text", "\"HI\"").unwrap();
    assert_eq!(s.get("text").unwrap().as_deref(), Some("\"HI\""));
    assert_eq!(s.keys(), vec!["text"]);
    s.remove("text").unwrap();
    s.remove("missing").unwrap();
    assert_eq!(s.get("text").unwrap(), None);
}

#[test]
fn memory_store_failure_injection() {
    let s = MemoryStore::new().failing_reads();
    assert!(matches!(s.get("x"), Err(TileError::Storage(_))));
    let mut s = MemoryStore::new().failing_writes();
    assert!(matches!(s.set("x", "1"), Err(TileError::Storage(_))));
    assert!(s.is_empty());
}

#[test]
fn json_file_store_persists_across_instances() {
    let path = temp_file("persist");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());

    let mut a = JsonFileStore::new(&path);
    assert_eq!(a.get("tileSize").unwrap(), None);
    a.set("tileSize", "1.5").unwrap();
    a.set("text", "\"HELLO\"").unwrap();

    let b = JsonFileStore::new(&path);
    assert_eq!(b.get("tileSize").unwrap().as_deref(), Some("1.5"));
    assert_eq!(b.get("text").unwrap().as_deref(), Some("\"HELLO\""));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn json_file_store_reports_corrupt_file() {
    let path = temp_file("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let s = JsonFileStore::new(&path);
    assert!(matches!(s.get("text"), Err(TileError::Storage(_))));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn json_file_store_recovers_from_corrupt_file_on_write() {
    let path = temp_file("recover");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{not json").unwrap();

    let mut s = JsonFileStore::new(&path);
    assert!(matches!(s.get("tileGap"), Err(TileError::Storage(_))));
    s.set("tileGap", "30").unwrap();
    assert_eq!(s.get("tileGap").unwrap().as_deref(), Some("30"));
    s.remove("tileGap").unwrap();
    assert_eq!(s.get("tileGap").unwrap(), None);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
