use osu_collection::{read_database, read_database_with, write_database, CollectionError, Database, DecodeOptions};
use std::fs;
use tempfile::tempdir;

const HASH: &str = "0123456789abcdef0123456789abcdef";

#[test]
fn write_then_read_returns_same_database() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("collection.db");

    let mut db = Database::new();
    db.append_collection("Favorites").unwrap().append_beatmap(HASH).unwrap();
    write_database(&path, &db).expect("write");

    assert_eq!(read_database(&path).expect("read"), db);
}

#[test]
fn failed_encode_leaves_existing_file_untouched() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("collection.db");
    fs::write(&path, b"original").unwrap();

    let err = write_database(&path, &Database::new()).unwrap_err();
    assert!(matches!(err, CollectionError::InvalidState(_)));
    assert_eq!(fs::read(&path).unwrap(), b"original");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = read_database(dir.path().join("absent.db")).unwrap_err();
    assert!(matches!(err, CollectionError::Io(_)));
}

#[test]
fn strict_read_rejects_wrong_header_count() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("collection.db");

    let mut db = Database::new();
    db.append_collection("Favorites").unwrap().append_beatmap(HASH).unwrap();
    write_database(&path, &db).expect("write");

    let mut bytes = fs::read(&path).unwrap();
    bytes[4] = 0x02;
    fs::write(&path, &bytes).unwrap();

    assert_eq!(read_database(&path).expect("lenient read"), db);
    let err = read_database_with(&path, DecodeOptions::strict()).unwrap_err();
    assert!(matches!(err, CollectionError::MalformedInput(_)));
}
