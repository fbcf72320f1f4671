use tempfile::TempDir;
use tplat_storage::*;

fn open(temp: &TempDir) -> FileBackend {
    FileBackend::builder().root(temp.path()).namespace("targetplatforms").open().unwrap()
}

#[test]
fn test_put_get_roundtrip() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp);

    store.put("cap-5.8", b"record").unwrap();
    assert_eq!(store.get("cap-5.8").unwrap().as_deref(), Some(&b"record"[..]));

    store.put("cap-5.8", b"updated").unwrap();
    assert_eq!(store.get("cap-5.8").unwrap().as_deref(), Some(&b"updated"[..]));
}

#[test]
fn test_missing_record_is_none() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp);

    assert!(store.get("unknown").unwrap().is_none());
}

#[test]
fn test_delete_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp);

    store.put("dm-5.3.0", b"x").unwrap();
    store.delete("dm-5.3.0").unwrap();
    store.delete("dm-5.3.0").unwrap();
    assert!(store.get("dm-5.3.0").unwrap().is_none());
}

#[test]
fn test_keys_cannot_escape_the_sandbox() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp);

    store.put("../../etc/passwd", b"x").unwrap();
    let path = store.record_path("../../etc/passwd").unwrap();
    assert!(path.starts_with(store.namespace_dir()));
    assert_eq!(store.get("../../etc/passwd").unwrap().as_deref(), Some(&b"x"[..]));
}

#[test]
fn test_invalid_keys_are_rejected() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp);

    assert!(matches!(store.put("", b"x"), Err(StorageError::InvalidKey { .. })));
    assert!(matches!(store.get(""), Err(StorageError::InvalidKey { .. })));
}

#[test]
fn test_long_keys_get_bounded_file_names() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp);
    let long = "k".repeat(500);
    let longer = "k".repeat(501);

    store.put(&long, b"first").unwrap();
    store.put(&longer, b"second").unwrap();
    assert_eq!(store.get(&long).unwrap().as_deref(), Some(&b"first"[..]));
    assert_eq!(store.get(&longer).unwrap().as_deref(), Some(&b"second"[..]));

    let path = store.record_path(&long).unwrap();
    assert!(path.starts_with(store.namespace_dir()));
    assert!(path.file_name().unwrap().len() < 255);
    assert_ne!(path, store.record_path(&longer).unwrap());

    store.delete(&long).unwrap();
    assert!(store.get(&long).unwrap().is_none());
    assert!(store.get(&longer).unwrap().is_some());
}

#[test]
fn test_records_survive_reopen() {
    let temp = TempDir::new().unwrap();
    open(&temp).put("cap-5.9.3", b"persisted").unwrap();

    let reopened = open(&temp);
    assert_eq!(reopened.get("cap-5.9.3").unwrap().as_deref(), Some(&b"persisted"[..]));
}

#[test]
fn test_namespaces_are_isolated() {
    let temp = TempDir::new().unwrap();
    let a = FileBackend::builder().root(temp.path()).namespace("a").open().unwrap();
    let b = FileBackend::builder().root(temp.path()).namespace("b").open().unwrap();

    a.put("id", b"a").unwrap();
    assert!(b.get("id").unwrap().is_none());
    assert_eq!(a.name(), "a");
}

#[test]
fn test_store_name_is_kept_and_directory_stays_inside_root() {
    let temp = TempDir::new().unwrap();
    let store = FileBackend::builder().root(temp.path()).namespace("../escape").open().unwrap();

    assert_eq!(store.name(), "../escape");
    let root = temp.path().canonicalize().unwrap();
    assert_eq!(store.namespace_dir().parent(), Some(root.as_path()));

    let empty = FileBackend::builder().root(temp.path()).namespace("").open();
    assert!(matches!(empty, Err(StorageError::PathTraversalAttempt { .. })));
}

#[test]
fn test_clear_wipes_every_record() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp);

    store.put("one", b"1").unwrap();
    store.put("two", b"2").unwrap();
    store.clear().unwrap();

    assert!(store.get("one").unwrap().is_none());
    assert!(store.get("two").unwrap().is_none());
    store.put("three", b"3").unwrap();
    assert!(store.get("three").unwrap().is_some());
}

#[test]
fn test_removed_root_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("data");
    let store = FileBackend::builder().root(&root).open().unwrap();

    std::fs::remove_dir_all(&root).unwrap();
    assert!(matches!(store.get("cap-5.8"), Err(StorageError::Unavailable { .. })));
    assert!(matches!(store.put("cap-5.8", b"x"), Err(StorageError::Unavailable { .. })));
}

#[test]
fn test_memory_backend_contract() {
    let store = MemoryBackend::new("targetplatforms");
    assert_eq!(store.name(), "targetplatforms");

    store.put("cap-5.8", b"x").unwrap();
    let shared = store.clone();
    assert_eq!(shared.get("cap-5.8").unwrap().as_deref(), Some(&b"x"[..]));

    store.delete("absent").unwrap();
    store.clear().unwrap();
    assert!(shared.is_empty());
}

#[test]
fn test_open_without_create_requires_root() {
    let temp = TempDir::new().unwrap();
    let result = FileBackend::builder().root(temp.path().join("missing")).create(false).open();
    assert!(matches!(result, Err(StorageError::Io { .. })));
}
