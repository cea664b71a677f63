use std::fs;

use nskube::fake::FakeProvider;
use nskube::{load, save, scan, ConnectionTarget, NamespaceEntry, Registry, ScanOptions, StoreError};
use tempfile::TempDir;

fn world() -> FakeProvider {
    FakeProvider::new()
        .with_cluster("p1", "east", "us-east1", &["default", "payments"])
        .with_cluster("p2", "central", "europe-west1", &["default", "billing"])
}

#[test]
fn missing_store_loads_empty() {
    let dir = TempDir::new().unwrap();
    let registry = load(&dir.path().join("namespaces.yaml")).unwrap();
    assert!(registry.is_empty());
}

#[test]
fn empty_store_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("namespaces.yaml");
    fs::write(&path, "\n").unwrap();

    assert!(load(&path).unwrap().is_empty());
}

#[test]
fn corrupt_store_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("namespaces.yaml");
    fs::write(&path, "Namespaces: [ {Name: payments, ConnectionData: 7 ").unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn non_utf8_store_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("namespaces.yaml");
    fs::write(
        &path,
        b"Namespaces:\n- Name: pay\xffments\n  ConnectionData: []\n",
    )
    .unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn unreadable_store_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("namespaces.yaml");
    fs::create_dir(&path).unwrap();

    assert!(load(&path).unwrap().is_empty());
}

#[test]
fn failed_save_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("namespaces.yaml");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), "x").unwrap();
    let mut registry = Registry::new();
    registry.upsert(
        NamespaceEntry::new("payments", ConnectionTarget::new("p1", "east", "us-east1")).unwrap(),
    );

    let err = save(&registry, &path).unwrap_err();

    assert!(matches!(err, StoreError::Write { .. }));
    assert!(!dir.path().join("namespaces.yaml.tmp").exists());
}

#[test]
fn save_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".lmi").join("namespaces.yaml");
    let mut registry = Registry::new();
    registry.upsert(
        NamespaceEntry::new("payments", ConnectionTarget::new("p1", "east", "us-east1")).unwrap(),
    );

    save(&registry, &path).unwrap();

    assert_eq!(load(&path).unwrap(), registry);
    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, ["namespaces.yaml"]);
}

#[test]
fn scan_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("namespaces.yaml");

    let mut registry = Registry::new();
    scan(&mut world(), &mut registry, &ScanOptions::default());
    save(&registry, &path).unwrap();

    let loaded = load(&path).unwrap();
    assert_eq!(loaded, registry);
    let names: Vec<_> = loaded.entries().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["default", "payments", "billing"]);
}

#[test]
fn repeated_scans_only_grow_the_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("namespaces.yaml");

    let mut first = Registry::new();
    scan(&mut world(), &mut first, &ScanOptions::default());
    save(&first, &path).unwrap();

    let mut second = load(&path).unwrap();
    let options = ScanOptions {
        project: Some("p2".to_owned()),
    };
    scan(&mut world(), &mut second, &options);
    save(&second, &path).unwrap();

    let reloaded = load(&path).unwrap();
    for entry in first.entries() {
        let now = &reloaded.find(&entry.name).unwrap().targets;
        assert!(entry.targets.iter().all(|t| now.contains(t)));
        assert!(now.len() >= entry.targets.len());
    }
    assert_eq!(reloaded.find("billing").unwrap().targets.len(), 2);
    assert_eq!(reloaded.find("default").unwrap().targets.len(), 3);
}

#[test]
fn reads_store_written_by_older_versions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("namespaces.yaml");
    fs::write(
        &path,
        "Namespaces:\n\
         - Name: payments\n  \
           ConnectionData:\n  \
           - ProjectName: p1\n    \
             ClusterName: east\n    \
             Region: us-east1\n",
    )
    .unwrap();

    let registry = load(&path).unwrap();
    assert_eq!(
        registry.find("payments").unwrap().targets,
        [ConnectionTarget::new("p1", "east", "us-east1")]
    );
}
