use osu_collection::{Collection, CollectionError, Database, OSU_VERSION};

const HASH: &str = "d41d8cd98f00b204e9800998ecf8427e";
const OTHER: &str = "9e107d9d372bb6826bd81d3542a419d6";

#[test]
fn new_database_uses_default_version() {
    let db = Database::new();
    assert_eq!(db.version(), OSU_VERSION);
    assert_eq!(db.collection_count(), 0);
    assert_eq!(Database::default(), db);
}

#[test]
fn with_version_rejects_out_of_range_values() {
    assert_eq!(Database::with_version(20240101i64).unwrap().version(), 20240101);
    assert_eq!(Database::with_version(u32::MAX).unwrap().version(), u32::MAX);
    assert!(matches!(
        Database::with_version(-1i32),
        Err(CollectionError::InvalidArgument(_))
    ));
    assert!(matches!(
        Database::with_version(u64::from(u32::MAX) + 1),
        Err(CollectionError::InvalidArgument(_))
    ));
}

#[test]
fn collection_name_length_boundaries() {
    let mut db = Database::new();
    assert!(db.append_collection("a".repeat(25)).is_ok());
    assert!(matches!(
        db.append_collection("a".repeat(26)),
        Err(CollectionError::InvalidArgument(_))
    ));
    assert!(matches!(db.append_collection(""), Err(CollectionError::InvalidArgument(_))));
    assert_eq!(db.collection_count(), 1);
}

#[test]
fn hash_must_be_32_lowercase_hex() {
    let mut collection = Collection::new("maps").unwrap();
    for bad in [
        "",
        "a",
        "A".repeat(32).as_str(),
        "z".repeat(32).as_str(),
        "0123456789abcdef0123456789abcdef ",
    ] {
        assert!(
            matches!(collection.append_beatmap(bad), Err(CollectionError::InvalidArgument(_))),
            "{:?} should be rejected",
            bad
        );
    }
    collection.append_beatmap("a".repeat(32)).unwrap();
    assert_eq!(collection.hash_count(), 1);
}

#[test]
fn appending_existing_name_overwrites_in_place() {
    let mut db = Database::new();
    db.append_collection("first").unwrap().append_beatmap(HASH).unwrap();
    db.append_collection("second").unwrap().append_beatmap(HASH).unwrap();
    db.append_collection("first").unwrap().append_beatmap(OTHER).unwrap();

    assert_eq!(db.collection_count(), 2);
    let names: Vec<&str> = db.collections().map(|c| c.name()).collect();
    assert_eq!(names, ["first", "second"]);
    assert_eq!(db.collection("first").unwrap().hashes(), [OTHER]);
}

#[test]
fn remove_collection_detaches_it() {
    let mut db = Database::new();
    db.append_collection("keep").unwrap();
    db.append_collection("drop").unwrap().append_beatmap(HASH).unwrap();

    let removed = db.remove_collection("drop").unwrap();
    assert_eq!(removed.name(), "drop");
    assert_eq!(removed.hashes(), [HASH]);
    assert_eq!(db.collection_count(), 1);
    assert!(!db.contains_collection("drop"));

    assert!(matches!(db.remove_collection("drop"), Err(CollectionError::NotFound(_))));
}

#[test]
fn remove_beatmap_drops_first_occurrence_only() {
    let mut db = Database::new();
    let collection = db.append_collection("dupes").unwrap();
    collection
        .append_beatmap(HASH)
        .unwrap()
        .append_beatmap(OTHER)
        .unwrap()
        .append_beatmap(HASH)
        .unwrap();

    collection.remove_beatmap(HASH).unwrap();
    assert_eq!(collection.hashes(), [OTHER, HASH]);
    assert_eq!(collection.hash_count(), 2);

    collection.remove_beatmap(OTHER).unwrap();
    collection.remove_beatmap(HASH).unwrap();
    assert!(collection.is_empty());
    assert!(matches!(collection.remove_beatmap(HASH), Err(CollectionError::NotFound(_))));
}

#[test]
fn collection_mut_edits_existing_collection() {
    let mut db = Database::new();
    db.append_collection("edit").unwrap();
    db.collection_mut("edit").unwrap().append_beatmap(HASH).unwrap();
    assert!(db.collection("edit").unwrap().contains_beatmap(HASH));
    assert!(db.collection_mut("missing").is_none());
}
