//! Scale store integration tests — YAML persistence and store mutation.

use frequencybot::scale::{
    build_pitch_set, load_store, save_store, ScaleDefinition, ScaleStore, StoreError,
};

#[test]
fn scale_store_yaml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scales.yaml");

    let mut store = ScaleStore::with_defaults();
    store.add(ScaleDefinition::parse("default", "1, 1, 1, 1, 1, 1, 1").unwrap());
    store.add(ScaleDefinition::parse("hirajoshi", "2, 1, 4, 1, 4").unwrap());
    save_store(&path, &store).unwrap();

    let loaded = load_store(&path).unwrap();
    assert_eq!(loaded, store);
    for (name, steps) in store.list() {
        assert_eq!(loaded.get(name).unwrap().steps(), steps);
    }
}

#[test]
fn first_run_seeds_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".frequencybot").join("scales.yaml");
    assert!(!path.exists());

    let store = load_store(&path).unwrap();
    assert!(path.exists());
    assert_eq!(
        store.get("major").unwrap().steps(),
        &[2, 2, 1, 2, 2, 2, 1]
    );
    assert_eq!(
        store.get("mixolydian").unwrap().steps(),
        &[1, 2, 2, 2, 1, 2, 2]
    );

    // Reloading reads the seeded file rather than reseeding.
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("minor"));
    assert_eq!(load_store(&path).unwrap(), store);
}

#[test]
fn add_then_remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scales.yaml");

    let mut store = load_store(&path).unwrap();
    store.add(ScaleDefinition::parse("whole tone", "2,2,2,2,2,2").unwrap());
    save_store(&path, &store).unwrap();
    assert!(load_store(&path).unwrap().contains("whole tone"));

    let mut store = load_store(&path).unwrap();
    store.remove("whole tone").unwrap();
    store.remove("minor").unwrap();
    save_store(&path, &store).unwrap();

    let reloaded = load_store(&path).unwrap();
    assert_eq!(reloaded.names().collect::<Vec<_>>(), vec!["major", "mixolydian"]);
}

#[test]
fn hand_edited_file_with_bad_scale_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scales.yaml");
    std::fs::write(&path, "major: [2, 2, 1, 2, 2, 2, 1]\nempty: []\n").unwrap();

    match load_store(&path) {
        Err(StoreError::Invalid { name, .. }) => assert_eq!(name, "empty"),
        other => panic!("expected invalid scale, got {other:?}"),
    }
}

#[test]
fn loaded_scale_builds_same_pitch_set_every_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scales.yaml");
    let store = load_store(&path).unwrap();
    let minor = store.get("minor").unwrap();

    let first = build_pitch_set(69, minor.steps()).unwrap();
    let second = build_pitch_set(69, minor.steps()).unwrap();
    assert_eq!(first, second);
    assert_eq!(store.get("minor").unwrap(), minor);
}
